//! Balance projection with overdraft cascading
//!
//! Accounts are folded one at a time in priority order. When an account's
//! running balance would go negative on some day, it is floored at zero and
//! the negative amount is added to the next account's delta for that same
//! day. That account has not been folded yet, so a shortfall can travel
//! through several accounts on one day in a single pass. The last account
//! is never floored and may end negative.

use crate::deltas::DeltaLedger;
use crate::model::Account;

/// Fold `ledger` into daily balances for each account.
///
/// `accounts` must be the list the ledger was built from. The ledger is
/// consumed in the sense that cascaded shortfalls are written into it.
pub fn project_balances(accounts: &[Account], ledger: &mut DeltaLedger) -> Vec<Vec<i64>> {
    debug_assert_eq!(accounts.len(), ledger.num_accounts());
    let num_days = ledger.num_days();

    accounts
        .iter()
        .enumerate()
        .map(|(slot, account)| {
            let (deltas, mut next) = ledger.split_for_cascade(slot);
            let mut balances = vec![0_i64; num_days];
            let mut cascaded_days = 0_usize;

            if let Some(first) = balances.first_mut() {
                *first = account.start_value + deltas[0];
            }

            for day in 1..num_days {
                let tentative = balances[day - 1] + deltas[day];
                match next.as_deref_mut() {
                    Some(next) if tentative < 0 => {
                        next[day] += tentative;
                        balances[day] = 0;
                        cascaded_days += 1;
                    }
                    _ => balances[day] = tentative,
                }
            }

            tracing::debug!(
                account = %account.name,
                start = account.start_value,
                end = balances.last().copied().unwrap_or_default(),
                cascaded_days,
                "projected account balances"
            );
            balances
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalysisWindow;
    use jiff::civil::date;

    /// Ledger over `days` days with the given per-account deltas
    fn ledger(accounts: &[Account], days: i32, deltas: &[&[(usize, i64)]]) -> DeltaLedger {
        let first = date(2025, 1, 1);
        let window =
            AnalysisWindow::new(first, crate::date_math::add_days(first, days - 1)).unwrap();
        let mut ledger = DeltaLedger::new(accounts, &window).unwrap();
        for (slot, entries) in deltas.iter().enumerate() {
            for &(day, amount) in entries.iter() {
                ledger.add(slot, day, amount);
            }
        }
        ledger
    }

    #[test]
    fn test_single_account_is_never_floored() {
        let accounts = [Account::new("Checking", 100)];
        let mut ledger = ledger(&accounts, 4, &[&[(1, -60), (2, -60), (3, 10)]]);
        let balances = project_balances(&accounts, &mut ledger);
        assert_eq!(balances, vec![vec![100, 40, -20, -10]]);
    }

    #[test]
    fn test_shortfall_moves_to_next_account() {
        let accounts = [Account::new("A", 3), Account::new("B", 100)];
        let mut ledger = ledger(&accounts, 2, &[&[(1, -8)], &[]]);
        let balances = project_balances(&accounts, &mut ledger);

        // A's tentative balance is -5: A floors at 0 and B takes the -5
        assert_eq!(balances[0], vec![3, 0]);
        assert_eq!(ledger.series(1)[1], -5);
        assert_eq!(balances[1], vec![100, 95]);
    }

    #[test]
    fn test_floored_account_recovers_from_zero() {
        let accounts = [Account::new("A", 10), Account::new("B", 0)];
        let mut ledger = ledger(&accounts, 4, &[&[(1, -30), (2, 5), (3, -2)], &[]]);
        let balances = project_balances(&accounts, &mut ledger);
        assert_eq!(balances[0], vec![10, 0, 5, 3]);
        assert_eq!(balances[1], vec![0, -20, -20, -20]);
    }

    #[test]
    fn test_cascade_travels_through_several_accounts_in_one_day() {
        let accounts = [
            Account::new("Checking", 10),
            Account::new("Savings", 20),
            Account::new("Brokerage", 1_000),
        ];
        let mut ledger = ledger(&accounts, 2, &[&[(1, -100)], &[], &[]]);
        let balances = project_balances(&accounts, &mut ledger);

        // Checking passes -90, Savings absorbs 20 and passes -70
        assert_eq!(balances[0], vec![10, 0]);
        assert_eq!(balances[1], vec![20, 0]);
        assert_eq!(balances[2], vec![1_000, 930]);
    }

    #[test]
    fn test_day_zero_is_not_floored() {
        let accounts = [Account::new("A", 5), Account::new("B", 50)];
        let mut ledger = ledger(&accounts, 2, &[&[(0, -20)], &[]]);
        let balances = project_balances(&accounts, &mut ledger);
        assert_eq!(balances[0], vec![-15, 0]);
        assert_eq!(ledger.series(1)[1], -15);
        assert_eq!(balances[1], vec![50, 35]);
    }

    #[test]
    fn test_last_account_may_end_negative() {
        let accounts = [Account::new("A", 0), Account::new("B", 0)];
        let mut ledger = ledger(&accounts, 3, &[&[(1, -10), (2, -10)], &[]]);
        let balances = project_balances(&accounts, &mut ledger);
        assert_eq!(balances[0], vec![0, 0, 0]);
        assert_eq!(balances[1], vec![0, -10, -20]);
    }
}
