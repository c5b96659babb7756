//! Sampled projection report
//!
//! Balances are sampled every `sample_days` days starting with the first
//! day of the window. Aggregates are reported in full, one value per year.

use std::fmt;

use firecalc_core::aggregates::TAXABLE_INCOME;
use firecalc_core::model::Projection;
use jiff::civil::Date;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampledSeries {
    pub name: String,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub first_day: Date,
    pub last_day: Date,
    pub sample_days: usize,
    /// Accounts in priority order
    pub accounts: Vec<SampledSeries>,
    /// `TaxableIncome` first, then the others in seeding order
    pub aggregates: Vec<SampledSeries>,
}

impl Report {
    pub fn new(projection: &Projection, sample_days: usize) -> Self {
        let accounts = projection
            .accounts
            .iter()
            .map(|series| SampledSeries {
                name: series.name.clone(),
                values: series.sample(sample_days),
            })
            .collect();

        let mut aggregates: Vec<SampledSeries> = projection
            .aggregates
            .iter()
            .map(|series| SampledSeries {
                name: series.name.clone(),
                values: series.values.clone(),
            })
            .collect();
        aggregates.sort_by_key(|series| series.name != TAXABLE_INCOME);

        Self {
            first_day: projection.window.first_day(),
            last_day: projection.window.last_day(),
            sample_days: sample_days.max(1),
            accounts,
            aggregates,
        }
    }
}

impl fmt::Display for SampledSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} to {}, balances every {} days",
            self.first_day, self.last_day, self.sample_days
        )?;
        for series in self.accounts.iter().chain(&self.aggregates) {
            writeln!(f, "{series}")?;
        }
        Ok(())
    }
}
