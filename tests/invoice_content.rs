mod common;

use moneytree_invoice::model::DrawCommand;
use moneytree_invoice::{Document, layout_batch, render_invoice};

fn page_texts(doc: &Document, page: usize) -> Vec<String> {
    doc.pages()[page]
        .texts()
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn invoice_shows_member_and_line_items() {
    let ledgers = common::roster();
    let mut doc = Document::a4();
    render_invoice(&mut doc, &ledgers[0], &common::ctx()).unwrap();
    let texts = page_texts(&doc, 0);

    for expected in [
        "INVOICE",
        "INVOICE TO:",
        "Sarah Johnson",
        "INV-2025-0042",
        "07/03/2025",
        "Principal Amount",
        "Loan Amount Outstanding",
        "Monthly Due Payment",
        "Interest (3% per month)",
        "Amount Paid in Loan",
        "Interest Applied to Loan",
        "SUB TOTAL:",
        "TOTAL:",
        "Payment Info:",
    ] {
        assert!(texts.iter().any(|t| t == expected), "missing {expected:?}");
    }
}

#[test]
fn amounts_use_indian_grouping() {
    let ledgers = common::roster();
    let doc = layout_batch(&ledgers[1..2], &common::ctx()).unwrap();
    let texts = page_texts(&doc, 0);
    // principal, loan, 3% interest, and monthly due + interest
    for expected in ["12,50,000.5", "3,00,000", "9,000", "21,000"] {
        assert!(texts.iter().any(|t| t == expected), "missing {expected:?}");
    }
}

#[test]
fn sparse_record_renders_zeros() {
    let ledgers = common::roster();
    let doc = layout_batch(&ledgers[2..], &common::ctx()).unwrap();
    let texts = page_texts(&doc, 0);
    assert!(texts.iter().any(|t| t == "INV-2025-1003"));
    assert!(texts.iter().any(|t| t == "Anna Sarin"));

    let table = doc.pages()[0]
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Table(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(table.rows.len(), 7);
    assert!(table.rows[1..].iter().all(|r| r.cells[4] == "0"));
}
