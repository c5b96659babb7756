//! Scenario Builder
//!
//! Collects accounts, auxiliary values and events, then validates them into
//! a `Scenario` and its `AnalysisWindow`.
//!
//! ```ignore
//! use firecalc_core::config::{EventBuilder, ScenarioBuilder};
//!
//! let (scenario, window) = ScenarioBuilder::new()
//!     .window((2025, 1, 1), (2034, 12, 31))
//!     .account("Checking", 5_000)
//!     .account("Savings", 20_000)
//!     .event(EventBuilder::fixed("Groceries")
//!         .rule("FREQ=WEEKLY;BYDAY=SA")
//!         .amount("Checking", -150))
//!     .build()?;
//! ```

use jiff::civil::{Date, date};

use super::event_builder::EventBuilder;
use crate::error::ConfigError;
use crate::model::{Account, AnalysisWindow, AuxiliaryValue, Scenario};

/// Window used when none is given: 2018-11-18 through 2100-11-18
pub const DEFAULT_FIRST_DAY: Date = date(2018, 11, 18);
pub const DEFAULT_LAST_DAY: Date = date(2100, 11, 18);

/// Builder for a complete scenario
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    first_day: Date,
    last_day: Date,
    /// First `(year, month, day)` passed to `window` that is not a date
    invalid_date: Option<(i16, i8, i8)>,
    accounts: Vec<Account>,
    auxiliary_values: Vec<AuxiliaryValue>,
    events: Vec<EventBuilder>,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_day: DEFAULT_FIRST_DAY,
            last_day: DEFAULT_LAST_DAY,
            invalid_date: None,
            accounts: Vec::new(),
            auxiliary_values: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Set both ends of the window as `(year, month, day)`. An invalid
    /// date is reported by `build`.
    #[must_use]
    pub fn window(mut self, first: (i16, i8, i8), last: (i16, i8, i8)) -> Self {
        match (civil_date(first), civil_date(last)) {
            (Ok(first_day), Ok(last_day)) => self.window_dates(first_day, last_day),
            (Err(_), _) => {
                self.invalid_date.get_or_insert(first);
                self
            }
            (_, Err(_)) => {
                self.invalid_date.get_or_insert(last);
                self
            }
        }
    }

    #[must_use]
    pub fn window_dates(mut self, first_day: Date, last_day: Date) -> Self {
        self.first_day = first_day;
        self.last_day = last_day;
        self
    }

    /// Append an account; accounts cascade shortfalls in the order added
    #[must_use]
    pub fn account(mut self, name: impl Into<String>, start_value: i64) -> Self {
        self.accounts.push(Account::new(name, start_value));
        self
    }

    #[must_use]
    pub fn auxiliary(mut self, name: impl Into<String>, start_value: i64) -> Self {
        self.auxiliary_values
            .push(AuxiliaryValue::new(name, start_value));
        self
    }

    /// Append an event; events are processed in the order added
    #[must_use]
    pub fn event(mut self, event: EventBuilder) -> Self {
        self.events.push(event);
        self
    }

    pub fn build(self) -> Result<(Scenario, AnalysisWindow), ConfigError> {
        if let Some(ymd) = self.invalid_date {
            if let Err(source) = civil_date(ymd) {
                return Err(ConfigError::InvalidDate {
                    year: ymd.0,
                    month: ymd.1,
                    day: ymd.2,
                    source,
                });
            }
        }
        let window = AnalysisWindow::new(self.first_day, self.last_day)?;
        let events = self
            .events
            .into_iter()
            .map(EventBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((
            Scenario {
                events,
                accounts: self.accounts,
                auxiliary_values: self.auxiliary_values,
            },
            window,
        ))
    }
}

fn civil_date((year, month, day): (i16, i8, i8)) -> Result<Date, jiff::Error> {
    Date::new(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;

    #[test]
    fn test_default_window() {
        let (scenario, window) = ScenarioBuilder::new().build().unwrap();
        assert!(scenario.events.is_empty());
        assert_eq!(window.first_day(), date(2018, 11, 18));
        assert_eq!(window.last_day(), date(2100, 11, 18));
    }

    #[test]
    fn test_collects_in_order() {
        let (scenario, window) = ScenarioBuilder::new()
            .window((2025, 1, 1), (2025, 12, 31))
            .account("Checking", 100)
            .account("Savings", 200)
            .auxiliary("Pension", 5)
            .event(EventBuilder::fixed("A").rule("FREQ=DAILY"))
            .event(EventBuilder::fixed("B").rule("FREQ=WEEKLY"))
            .build()
            .unwrap();

        assert_eq!(window.num_days(), 365);
        assert_eq!(scenario.accounts[1], Account::new("Savings", 200));
        assert_eq!(scenario.auxiliary_values, vec![AuxiliaryValue::new("Pension", 5)]);
        let names: Vec<&str> = scenario.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_reversed_window_rejected() {
        let err = ScenarioBuilder::new()
            .window((2030, 1, 1), (2029, 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Window(ProjectionError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_impossible_window_date_rejected() {
        let err = ScenarioBuilder::new()
            .window((2025, 2, 30), (2026, 1, 1))
            .account("Checking", 0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDate {
                year: 2025,
                month: 2,
                day: 30,
                ..
            }
        ));

        let err = ScenarioBuilder::new()
            .window((2025, 1, 1), (2025, 13, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate { month: 13, .. }));
    }
}
