//! Year-indexed aggregates
//!
//! Each tracked name owns one integer per calendar year of the window.
//! Auxiliary values seed only the first year; every later year starts at
//! zero and grows as occurrences are processed. Reads made by marginal
//! events see exactly the writes of occurrences processed before them.

use rustc_hash::FxHashMap;

use crate::error::ProjectionError;
use crate::model::{AnalysisWindow, AuxiliaryValue};

/// Aggregate every occurrence contributes its taxable value to
pub const TAXABLE_INCOME: &str = "TaxableIncome";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AggregateSeries {
    pub name: String,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct AnnualAggregates {
    /// Series in auxiliary-value order
    series: Vec<AggregateSeries>,
    index: FxHashMap<String, usize>,
}

impl AnnualAggregates {
    /// Allocate one series per auxiliary value, sized to the window's years.
    ///
    /// `TaxableIncome` is always tracked; it is appended zero-seeded when the
    /// auxiliary values don't name it.
    pub fn seeded(
        values: &[AuxiliaryValue],
        window: &AnalysisWindow,
    ) -> Result<Self, ProjectionError> {
        let years = window.num_years();
        let mut aggregates = Self::default();

        for value in values {
            if aggregates.index.contains_key(&value.name) {
                return Err(ProjectionError::DuplicateAggregate {
                    name: value.name.clone(),
                });
            }
            let mut series = vec![0; years];
            series[0] = value.start_value;
            aggregates.push(value.name.clone(), series);
        }

        if !aggregates.index.contains_key(TAXABLE_INCOME) {
            aggregates.push(TAXABLE_INCOME.to_string(), vec![0; years]);
        }

        Ok(aggregates)
    }

    fn push(&mut self, name: String, values: Vec<i64>) {
        self.index.insert(name.clone(), self.series.len());
        self.series.push(AggregateSeries { name, values });
    }

    pub fn series(&self, name: &str) -> Option<&[i64]> {
        let &slot = self.index.get(name)?;
        Some(&self.series[slot].values)
    }

    /// All series in seeding order
    pub fn iter(&self) -> impl Iterator<Item = &AggregateSeries> {
        self.series.iter()
    }

    /// Value of `name` at a possibly out-of-range year index.
    ///
    /// `Some(None)` means the name is tracked but `year` falls outside it.
    pub fn get(&self, name: &str, year: i64) -> Option<Option<i64>> {
        let series = self.series(name)?;
        Some(
            usize::try_from(year)
                .ok()
                .and_then(|y| series.get(y))
                .copied(),
        )
    }

    /// Add `amount` to `name` at `year`. Returns `false` if the name is not
    /// tracked or the year is outside the window.
    pub fn add(&mut self, name: &str, year: i64, amount: i64) -> bool {
        let Some(&slot) = self.index.get(name) else {
            return false;
        };
        let Ok(year) = usize::try_from(year) else {
            return false;
        };
        match self.series[slot].values.get_mut(year) {
            Some(value) => {
                *value += amount;
                true
            }
            None => false,
        }
    }
}
