mod common;

use moneytree_invoice::{export_all_members_report, export_member_report};

#[test]
fn member_report_is_written_under_its_name() {
    common::init_logging();
    let dir = common::scratch_dir("member");
    let ledgers = common::roster();

    let path = export_member_report(&ledgers[0], &common::ctx(), &dir).unwrap();
    assert_eq!(path, dir.join("Member_42_Sarah_Johnson.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn batch_report_is_named_by_issue_date() {
    let dir = common::scratch_dir("batch");
    let path = export_all_members_report(&common::roster(), &common::ctx(), &dir).unwrap();
    assert_eq!(path, dir.join("All_Members_Report_2025-03-07.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 3"));

    std::fs::remove_dir_all(&dir).ok();
}
