//! Locale formatting for the values printed on an invoice.

use chrono::{Datelike, NaiveDate};

/// Format an amount the way `en-IN` locales print plain numbers: the last
/// three integer digits form one group, every group above that has two
/// digits (`12,34,567`), and at most three fraction digits are kept with
/// trailing zeros dropped.
pub fn amount_en_in(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let grouped = group_indian(int_part);
    let negative = value < 0.0 && (grouped != "0" || !frac.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    // Pairs are counted from the right, so a leading odd digit stands alone.
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Account numbers print with at least four digits (`42` -> `0042`).
pub fn padded_account(account_number: u64) -> String {
    format!("{account_number:04}")
}

/// `en-GB` short date: `dd/mm/yyyy`.
pub fn date_en_gb(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `INV-{year}-{account:04}`.
pub fn invoice_number(issued_on: NaiveDate, account_number: u64) -> String {
    format!("INV-{}-{}", issued_on.year(), padded_account(account_number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping() {
        assert_eq!(amount_en_in(0.0), "0");
        assert_eq!(amount_en_in(999.0), "999");
        assert_eq!(amount_en_in(1000.0), "1,000");
        assert_eq!(amount_en_in(100000.0), "1,00,000");
        assert_eq!(amount_en_in(1234567.0), "12,34,567");
        assert_eq!(amount_en_in(123456789.0), "12,34,56,789");
    }

    #[test]
    fn fraction_digits_trimmed_to_three() {
        assert_eq!(amount_en_in(300.5), "300.5");
        assert_eq!(amount_en_in(1500.25), "1,500.25");
        assert_eq!(amount_en_in(0.1234), "0.123");
        assert_eq!(amount_en_in(2.0004), "2");
    }

    #[test]
    fn negative_and_non_finite() {
        assert_eq!(amount_en_in(-1500.0), "-1,500");
        assert_eq!(amount_en_in(-0.0), "0");
        assert_eq!(amount_en_in(f64::NAN), "0");
    }

    #[test]
    fn account_and_invoice_numbers() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(padded_account(7), "0007");
        assert_eq!(padded_account(12345), "12345");
        assert_eq!(date_en_gb(d), "07/03/2025");
        assert_eq!(invoice_number(d, 42), "INV-2025-0042");
    }
}
