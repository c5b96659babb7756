//! Per-occurrence account deltas
//!
//! Each occurrence adds signed integer amounts to one or more accounts on
//! its day, computed by the event's calculation variant, then books the
//! event's taxable value against the occurrence's year.

use rustc_hash::FxHashMap;

use crate::aggregates::{AnnualAggregates, TAXABLE_INCOME};
use crate::error::ProjectionError;
use crate::marginal::bracket_amounts;
use crate::model::{Account, AccountAmount, AnalysisWindow, Event, EventKind, MarginalDependency};
use crate::schedule::Occurrence;

/// One delta slot per account per window day, zeroed at construction
#[derive(Debug, Clone)]
pub struct DeltaLedger {
    deltas: Vec<Vec<i64>>,
    index: FxHashMap<String, usize>,
}

impl DeltaLedger {
    /// Allocate zeroed series for `accounts`, preserving their order
    pub fn new(accounts: &[Account], window: &AnalysisWindow) -> Result<Self, ProjectionError> {
        let num_days = window.num_days();
        let mut index = FxHashMap::default();
        for (slot, account) in accounts.iter().enumerate() {
            if index.insert(account.name.clone(), slot).is_some() {
                return Err(ProjectionError::DuplicateAccount {
                    name: account.name.clone(),
                });
            }
        }
        Ok(Self {
            deltas: vec![vec![0; num_days]; accounts.len()],
            index,
        })
    }

    pub fn account_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn num_accounts(&self) -> usize {
        self.deltas.len()
    }

    pub fn num_days(&self) -> usize {
        self.deltas.first().map_or(0, Vec::len)
    }

    pub fn series(&self, account: usize) -> &[i64] {
        &self.deltas[account]
    }

    /// Sum of all raw deltas booked against `name`
    pub fn total(&self, name: &str) -> Option<i64> {
        let slot = self.account_index(name)?;
        Some(self.deltas[slot].iter().sum())
    }

    #[inline]
    pub(crate) fn add(&mut self, account: usize, day: usize, amount: i64) {
        self.deltas[account][day] += amount;
    }

    /// This account's deltas alongside mutable access to the next account's,
    /// which receives any shortfall
    pub(crate) fn split_for_cascade(&mut self, account: usize) -> (&[i64], Option<&mut [i64]>) {
        let (head, tail) = self.deltas.split_at_mut(account + 1);
        (head[account].as_slice(), tail.first_mut().map(Vec::as_mut_slice))
    }
}

/// Apply one occurrence of `event` to the ledger and the aggregates.
///
/// Must be called in schedule order: a marginal event reads whatever the
/// aggregates hold at the moment it is applied.
pub fn apply_occurrence(
    event: &Event,
    occurrence: &Occurrence,
    window: &AnalysisWindow,
    ledger: &mut DeltaLedger,
    aggregates: &mut AnnualAggregates,
) -> Result<(), ProjectionError> {
    match &event.kind {
        EventKind::Static { values } => {
            for AccountAmount { account, amount } in values {
                let slot = resolve_account(ledger, event, account)?;
                ledger.add(slot, occurrence.day, *amount);
            }
        }
        EventKind::AnnualBump { base_values, bump } => {
            let factor = bump.powf(occurrence.year as f64);
            for AccountAmount { account, amount } in base_values {
                let slot = resolve_account(ledger, event, account)?;
                ledger.add(slot, occurrence.day, (*amount as f64 * factor) as i64);
            }
        }
        EventKind::MarginalDependent(dependency) => {
            apply_marginal(event, dependency, occurrence, ledger, aggregates)?;
        }
    }

    if !aggregates.add(TAXABLE_INCOME, occurrence.year, event.taxable_value) {
        return Err(ProjectionError::DependencyOutOfRange {
            event: event.name.clone(),
            dependency: TAXABLE_INCOME.to_string(),
            index: occurrence.year,
            len: window.num_years(),
        });
    }

    tracing::trace!(
        event = %event.name,
        date = %occurrence.date,
        taxable = event.taxable_value,
        "applied occurrence"
    );
    Ok(())
}

fn apply_marginal(
    event: &Event,
    dependency: &MarginalDependency,
    occurrence: &Occurrence,
    ledger: &mut DeltaLedger,
    aggregates: &AnnualAggregates,
) -> Result<(), ProjectionError> {
    let slot = resolve_account(ledger, event, &dependency.account)?;
    let year = occurrence.year + i64::from(dependency.offset);

    let value = match aggregates.get(&dependency.dependency, year) {
        Some(Some(value)) => value,
        Some(None) => {
            return Err(ProjectionError::DependencyOutOfRange {
                event: event.name.clone(),
                dependency: dependency.dependency.clone(),
                index: year,
                len: aggregates
                    .series(&dependency.dependency)
                    .map_or(0, <[i64]>::len),
            });
        }
        None => {
            return Err(ProjectionError::UnknownAggregate {
                event: event.name.clone(),
                aggregate: dependency.dependency.clone(),
            });
        }
    };

    for amount in bracket_amounts(value, &dependency.brackets) {
        ledger.add(slot, occurrence.day, amount);
    }
    Ok(())
}

fn resolve_account(
    ledger: &DeltaLedger,
    event: &Event,
    account: &str,
) -> Result<usize, ProjectionError> {
    ledger
        .account_index(account)
        .ok_or_else(|| ProjectionError::UnknownAccount {
            event: event.name.clone(),
            account: account.to_string(),
        })
}
