use chrono::NaiveDate;

use crate::error::LayoutError;
use crate::invoice::{InvoiceContext, render_invoice};
use crate::ledger::MemberLedger;
use crate::pdf::Document;

/// Lay out one invoice per ledger, in input order, each starting on a fresh
/// page. An empty slice yields a document with a single blank page.
pub fn layout_batch(
    ledgers: &[MemberLedger],
    ctx: &InvoiceContext,
) -> Result<Document, LayoutError> {
    let mut doc = Document::a4();
    for (i, ledger) in ledgers.iter().enumerate() {
        if i > 0 {
            doc.new_page();
        }
        render_invoice(&mut doc, ledger, ctx)?;
    }
    log::debug!(
        "batch of {} ledgers laid out on {} pages",
        ledgers.len(),
        doc.pages().len()
    );
    Ok(doc)
}

pub fn render_batch(ledgers: &[MemberLedger], ctx: &InvoiceContext) -> Result<Vec<u8>, LayoutError> {
    Ok(layout_batch(ledgers, ctx)?.finalize())
}

pub fn render_member(ledger: &MemberLedger, ctx: &InvoiceContext) -> Result<Vec<u8>, LayoutError> {
    render_batch(std::slice::from_ref(ledger), ctx)
}

/// `Member_{account}_{name}.pdf`, whitespace in the name replaced by `_`.
pub fn member_report_filename(ledger: &MemberLedger) -> String {
    let name: String = ledger
        .name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("Member_{}_{}.pdf", ledger.account_number, name)
}

pub fn batch_report_filename(issued_on: NaiveDate) -> String {
    format!("All_Members_Report_{}.pdf", issued_on.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(account_number: u64, name: &str) -> MemberLedger {
        MemberLedger {
            account_number,
            name: name.into(),
            principal: 1000.0,
            loan_taken: 500.0,
            ..Default::default()
        }
    }

    fn ctx() -> InvoiceContext {
        InvoiceContext::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    #[test]
    fn one_page_per_member_in_order() {
        let ledgers = [ledger(3, "Ann Lee"), ledger(1, "Bo Chen"), ledger(2, "Cy Diaz")];
        let doc = layout_batch(&ledgers, &ctx()).unwrap();
        assert_eq!(doc.pages().len(), 3);
        for (page, l) in doc.pages().iter().zip(&ledgers) {
            assert!(page.texts().contains(&l.name.as_str()));
        }
    }

    #[test]
    fn empty_batch_is_one_blank_page() {
        let doc = layout_batch(&[], &ctx()).unwrap();
        assert_eq!(doc.pages().len(), 1);
        assert!(doc.pages()[0].is_empty());
    }

    #[test]
    fn filenames() {
        assert_eq!(
            member_report_filename(&ledger(42, "Sarah  Ann\tJohnson")),
            "Member_42_Sarah__Ann_Johnson.pdf"
        );
        assert_eq!(
            batch_report_filename(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()),
            "All_Members_Report_2025-03-07.pdf"
        );
    }
}
