//! Scenario input
//!
//! Scenarios come from two places: the three JSON input files (events,
//! accounts, auxiliary values) in their PascalCase field layout, or the
//! builder DSL for tests and embedding.
//!
//! # Builder DSL
//!
//! ```ignore
//! use firecalc_core::config::{EventBuilder, ScenarioBuilder};
//!
//! let (scenario, window) = ScenarioBuilder::new()
//!     .window((2025, 1, 1), (2055, 1, 1))
//!     .account("Checking", 10_000)
//!     .auxiliary("Pension", 0)
//!     .event(EventBuilder::annual_bump("Rent", 1.03)
//!         .rule("FREQ=MONTHLY;BYMONTHDAY=1")
//!         .amount("Checking", -2_000))
//!     .event(EventBuilder::marginal("Income Tax", "TaxableIncome")
//!         .offset(-1)
//!         .to_account("Checking")
//!         .bracket(10_000, -0.10)
//!         .bracket(40_000, -0.12)
//!         .rule("FREQ=YEARLY;BYMONTH=4;BYMONTHDAY=15"))
//!     .build()?;
//! ```

use crate::error::ConfigError;
use crate::model::MarginalBracket;

pub mod builder;
pub mod event_builder;
pub mod files;

pub use builder::{DEFAULT_FIRST_DAY, DEFAULT_LAST_DAY, ScenarioBuilder};
pub use event_builder::EventBuilder;
pub use files::{
    AccountRecord, EventRecord, ValueRecord, load_scenario, parse_accounts, parse_events,
    parse_values, read_json,
};

/// Cutoffs must be positive and strictly increasing
pub(crate) fn check_brackets(event: &str, brackets: &[MarginalBracket]) -> Result<(), ConfigError> {
    let mut previous = 0_i64;
    for bracket in brackets {
        if bracket.cutoff <= previous {
            return Err(ConfigError::BracketOrder {
                event: event.to_string(),
                previous,
                cutoff: bracket.cutoff,
            });
        }
        previous = bracket.cutoff;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket(cutoff: i64) -> MarginalBracket {
        MarginalBracket { cutoff, rate: 0.1 }
    }

    #[test]
    fn test_increasing_cutoffs_accepted() {
        assert!(check_brackets("Tax", &[bracket(1), bracket(5), bracket(9)]).is_ok());
        assert!(check_brackets("Tax", &[]).is_ok());
    }

    #[test]
    fn test_repeated_or_non_positive_cutoffs_rejected() {
        let err = check_brackets("Tax", &[bracket(5), bracket(5)]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BracketOrder {
                previous: 5,
                cutoff: 5,
                ..
            }
        ));
        assert!(check_brackets("Tax", &[bracket(0)]).is_err());
    }
}
