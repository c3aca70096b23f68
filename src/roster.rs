//! Selecting and ordering members before a batch render.

use crate::ledger::MemberLedger;

/// Members whose name contains `term` (case-insensitive) or whose account
/// number contains it as a digit substring. A blank term keeps everyone.
pub fn filter_members(ledgers: &[MemberLedger], term: &str) -> Vec<MemberLedger> {
    let term = term.trim();
    if term.is_empty() {
        return ledgers.to_vec();
    }
    let needle = term.to_lowercase();
    ledgers
        .iter()
        .filter(|l| {
            l.name.to_lowercase().contains(&needle)
                || l.account_number.to_string().contains(term)
        })
        .cloned()
        .collect()
}

/// Stable ascending sort by account number.
pub fn sort_by_account(ledgers: &mut [MemberLedger]) {
    ledgers.sort_by_key(|l| l.account_number);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<MemberLedger> {
        [(12, "Sarah Johnson"), (3, "Ravi Kumar"), (120, "Anna Sarin")]
            .into_iter()
            .map(|(account_number, name)| MemberLedger {
                account_number,
                name: name.into(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn name_match_ignores_case() {
        let hits = filter_members(&roster(), "SAR");
        let names: Vec<_> = hits.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Sarah Johnson", "Anna Sarin"]);
    }

    #[test]
    fn account_digits_match() {
        let hits = filter_members(&roster(), "12");
        let accounts: Vec<_> = hits.iter().map(|l| l.account_number).collect();
        assert_eq!(accounts, [12, 120]);
    }

    #[test]
    fn blank_term_keeps_all() {
        assert_eq!(filter_members(&roster(), "  ").len(), 3);
    }

    #[test]
    fn sorts_by_account() {
        let mut r = roster();
        sort_by_account(&mut r);
        let accounts: Vec<_> = r.iter().map(|l| l.account_number).collect();
        assert_eq!(accounts, [3, 12, 120]);
    }
}
