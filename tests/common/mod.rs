#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use moneytree_invoice::{InvoiceContext, MemberLedger, ledger};

/// Roster in the record source's wire shape: camelCase keys, mixed
/// timestamp encodings, one record with most amounts missing.
pub const ROSTER_JSON: &str = r#"[
    {
        "accountNumber": 42,
        "name": "Sarah Johnson",
        "principal": 25000,
        "loanTaken": 10000,
        "amountPaidInLoan": 2500,
        "monthlyDue": 1500,
        "interestToLoan": 120,
        "interestToPrincipal": 0,
        "totalBalance": 4200,
        "totalDue": 1800,
        "createdAt": "2024-06-01T09:30:00Z",
        "updatedAt": { "seconds": 1735689600, "nanoseconds": 0 }
    },
    {
        "accountNumber": 7,
        "name": "Ravi Kumar",
        "principal": 1250000.5,
        "loanTaken": 300000,
        "amountPaidInLoan": 450000,
        "monthlyDue": 12000,
        "totalBalance": 0
    },
    {
        "accountNumber": 1003,
        "name": "Anna Sarin"
    }
]"#;

pub fn roster() -> Vec<MemberLedger> {
    ledger::parse_bytes(ROSTER_JSON.as_bytes()).expect("fixture roster decodes")
}

pub fn ctx() -> InvoiceContext {
    InvoiceContext::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap())
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "moneytree-invoice-{}-{}",
        test,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
