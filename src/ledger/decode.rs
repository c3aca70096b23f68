use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Error;

use super::MemberLedger;

/// Timestamps arrive either as RFC 3339 strings or as the
/// `{ seconds, nanoseconds }` objects the document database exports.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Rfc3339(DateTime<Utc>),
    Epoch {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl RawTimestamp {
    fn into_utc(self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Rfc3339(dt) => Some(dt),
            RawTimestamp::Epoch {
                seconds,
                nanoseconds,
            } => DateTime::<Utc>::from_timestamp(seconds, nanoseconds),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawLedger {
    account_number: Option<f64>,
    name: Option<String>,
    principal: Option<f64>,
    loan_taken: Option<f64>,
    amount_paid_in_loan: Option<f64>,
    monthly_due: Option<f64>,
    interest_to_loan: Option<f64>,
    interest_to_principal: Option<f64>,
    total_balance: Option<f64>,
    total_due: Option<f64>,
    created_at: Option<RawTimestamp>,
    updated_at: Option<RawTimestamp>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Many(Vec<RawLedger>),
    One(RawLedger),
}

fn amount(field: &str, value: Option<f64>, index: usize) -> Result<f64, Error> {
    let v = value.unwrap_or(0.0);
    if !v.is_finite() || v < 0.0 {
        return Err(Error::InvalidLedger(format!(
            "record {index}: {field} must be a non-negative amount, got {v}"
        )));
    }
    Ok(v)
}

fn account_number(value: Option<f64>, index: usize) -> Result<u64, Error> {
    let Some(v) = value else {
        log::warn!("record {index}: missing accountNumber, using 0");
        return Ok(0);
    };
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > u64::MAX as f64 {
        return Err(Error::InvalidLedger(format!(
            "record {index}: accountNumber must be a whole number, got {v}"
        )));
    }
    Ok(v as u64)
}

impl RawLedger {
    fn into_ledger(self, index: usize) -> Result<MemberLedger, Error> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            log::warn!("record {index}: empty member name");
        }
        Ok(MemberLedger {
            account_number: account_number(self.account_number, index)?,
            name,
            principal: amount("principal", self.principal, index)?,
            loan_taken: amount("loanTaken", self.loan_taken, index)?,
            amount_paid_in_loan: amount("amountPaidInLoan", self.amount_paid_in_loan, index)?,
            monthly_due: amount("monthlyDue", self.monthly_due, index)?,
            interest_to_loan: amount("interestToLoan", self.interest_to_loan, index)?,
            interest_to_principal: amount("interestToPrincipal", self.interest_to_principal, index)?,
            total_balance: amount("totalBalance", self.total_balance, index)?,
            total_due: amount("totalDue", self.total_due, index)?,
            created_at: self.created_at.and_then(RawTimestamp::into_utc),
            updated_at: self.updated_at.and_then(RawTimestamp::into_utc),
        })
    }
}

/// Decode ledgers from JSON: an array of records or a single record object.
pub fn parse_bytes(input: &[u8]) -> Result<Vec<MemberLedger>, Error> {
    let raw: RawInput = serde_json::from_slice(input)
        .map_err(|e| Error::InvalidLedger(format!("not a ledger document: {e}")))?;
    let records = match raw {
        RawInput::Many(records) => records,
        RawInput::One(record) => vec![record],
    };
    let ledgers = records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_ledger(i))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("decoded {} ledger record(s)", ledgers.len());
    Ok(ledgers)
}

pub fn parse(path: &Path) -> Result<Vec<MemberLedger>, Error> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    parse_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_amounts_become_zero() {
        let json = br#"{"accountNumber": 7, "name": "Cher", "loanTaken": null}"#;
        let ledgers = parse_bytes(json).unwrap();
        assert_eq!(ledgers.len(), 1);
        let l = &ledgers[0];
        assert_eq!(l.account_number, 7);
        assert_eq!(l.loan_taken, 0.0);
        assert_eq!(l.principal, 0.0);
        assert!(l.created_at.is_none());
    }

    #[test]
    fn array_with_both_timestamp_shapes() {
        let json = br#"[
            {"accountNumber": 1, "name": "A B", "principal": 1500,
             "createdAt": "2024-01-15T10:00:00Z"},
            {"accountNumber": 2, "name": "C D",
             "updatedAt": {"seconds": 1700000000, "nanoseconds": 5}}
        ]"#;
        let ledgers = parse_bytes(json).unwrap();
        assert_eq!(ledgers.len(), 2);
        assert_eq!(ledgers[0].principal, 1500.0);
        assert_eq!(
            ledgers[0].created_at.map(|t| t.timestamp()),
            Some(1705312800)
        );
        assert_eq!(ledgers[1].updated_at.map(|t| t.timestamp()), Some(1700000000));
    }

    #[test]
    fn negative_amount_rejected() {
        let json = br#"{"accountNumber": 3, "name": "X", "monthlyDue": -5}"#;
        let err = parse_bytes(json).unwrap_err();
        assert!(matches!(err, Error::InvalidLedger(ref m) if m.contains("monthlyDue")));
    }

    #[test]
    fn fractional_account_number_rejected() {
        let json = br#"{"accountNumber": 3.5, "name": "X"}"#;
        assert!(matches!(parse_bytes(json), Err(Error::InvalidLedger(_))));
    }

    #[test]
    fn garbage_is_invalid_ledger() {
        assert!(matches!(parse_bytes(b"not json"), Err(Error::InvalidLedger(_))));
    }
}
