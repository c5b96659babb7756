//! Projection results
//!
//! A projection holds one balance per account per day of the window and the
//! final state of every annual aggregate.

use jiff::civil::Date;
use serde::Serialize;

use crate::aggregates::{AnnualAggregates, TAXABLE_INCOME};

use super::window::AnalysisWindow;

/// Daily balances of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSeries {
    pub name: String,
    pub balances: Vec<i64>,
}

impl AccountSeries {
    /// Every `every_n_days`-th balance starting with day 0
    pub fn sample(&self, every_n_days: usize) -> Vec<i64> {
        self.balances
            .iter()
            .step_by(every_n_days.max(1))
            .copied()
            .collect()
    }
}

/// Complete output of one projection run
#[derive(Debug, Clone)]
pub struct Projection {
    pub window: AnalysisWindow,
    /// Account series in priority order
    pub accounts: Vec<AccountSeries>,
    pub aggregates: AnnualAggregates,
}

impl Projection {
    pub fn balances(&self, account: &str) -> Option<&[i64]> {
        self.accounts
            .iter()
            .find(|series| series.name == account)
            .map(|series| series.balances.as_slice())
    }

    pub fn balance_on(&self, account: &str, date: Date) -> Option<i64> {
        let day = self.window.day_index(date)?;
        self.balances(account)?.get(day).copied()
    }

    pub fn final_balance(&self, account: &str) -> Option<i64> {
        self.balances(account)?.last().copied()
    }

    pub fn aggregate(&self, name: &str) -> Option<&[i64]> {
        self.aggregates.series(name)
    }

    pub fn taxable_income(&self) -> &[i64] {
        self.aggregates.series(TAXABLE_INCOME).unwrap_or(&[])
    }
}
