mod decode;

pub use decode::{parse, parse_bytes};

use chrono::{DateTime, Utc};

/// Flat monthly interest charged on the outstanding loan, in percent.
pub const MONTHLY_INTEREST_PERCENT: f64 = 3.0;
/// A computed total due above this is flagged as high.
pub const HIGH_DUE_THRESHOLD: f64 = 1000.0;
/// Balances below this (and above zero) are low.
pub const LOW_BALANCE_THRESHOLD: f64 = 5000.0;

/// One member's financial record as stored by the record source.
///
/// Monetary fields are non-negative; the decoder enforces that once at the
/// boundary so nothing downstream re-checks it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberLedger {
    pub account_number: u64,
    pub name: String,
    pub principal: f64,
    pub loan_taken: f64,
    pub amount_paid_in_loan: f64,
    pub monthly_due: f64,
    pub interest_to_loan: f64,
    pub interest_to_principal: f64,
    pub total_balance: f64,
    /// As stored. Invoices print the recomputed value from [`DerivedFields`].
    pub total_due: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueSeverity {
    Normal,
    High,
}

impl DueSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            DueSeverity::Normal => "normal",
            DueSeverity::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceSeverity {
    Paid,
    Low,
    Active,
}

impl BalanceSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            BalanceSeverity::Paid => "paid",
            BalanceSeverity::Low => "low",
            BalanceSeverity::Active => "active",
        }
    }
}

/// Display values computed from a ledger. Never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedFields {
    pub interest_amount: f64,
    pub computed_total_due: f64,
    pub progress_percentage: f64,
    pub due_severity: DueSeverity,
    pub balance_severity: BalanceSeverity,
    pub initials: String,
}

impl MemberLedger {
    pub fn derive(&self) -> DerivedFields {
        derive(self)
    }
}

pub fn derive(ledger: &MemberLedger) -> DerivedFields {
    let interest_amount = interest_amount(ledger.loan_taken);
    let computed_total_due = ledger.monthly_due + interest_amount;
    DerivedFields {
        interest_amount,
        computed_total_due,
        progress_percentage: progress_percentage(ledger.amount_paid_in_loan, ledger.loan_taken),
        due_severity: due_severity(computed_total_due),
        balance_severity: balance_severity(ledger.total_balance),
        initials: initials(&ledger.name),
    }
}

pub fn interest_amount(loan_taken: f64) -> f64 {
    // Multiplying before dividing keeps whole-rupee loans exact.
    loan_taken * MONTHLY_INTEREST_PERCENT / 100.0
}

pub fn progress_percentage(amount_paid: f64, loan_taken: f64) -> f64 {
    if loan_taken == 0.0 {
        return 0.0;
    }
    let pct = amount_paid / loan_taken * 100.0;
    if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) }
}

pub fn due_severity(computed_total_due: f64) -> DueSeverity {
    if computed_total_due > HIGH_DUE_THRESHOLD {
        DueSeverity::High
    } else {
        DueSeverity::Normal
    }
}

pub fn balance_severity(total_balance: f64) -> BalanceSeverity {
    if total_balance <= 0.0 {
        BalanceSeverity::Paid
    } else if total_balance < LOW_BALANCE_THRESHOLD {
        BalanceSeverity::Low
    } else {
        BalanceSeverity::Active
    }
}

/// `"Sarah Johnson"` -> `"SJ"`, `"Cher"` -> `"CH"`, `""` -> `"?"`.
pub fn initials(name: &str) -> String {
    let mut tokens = name.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (None, _) => "?".to_string(),
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
        (Some(only), None) => only.chars().take(2).flat_map(char::to_uppercase).collect(),
    }
}
