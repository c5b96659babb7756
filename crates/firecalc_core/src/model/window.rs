//! The analysis window and its day/year indexing

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{add_days, days_between};
use crate::error::ProjectionError;

/// Closed date interval `[first_day, last_day]` the projection covers.
///
/// Day index `d` is `first_day + d days`; year index `y` is calendar year
/// `first_day.year() + y`. Both ends are part of the window, so an event
/// occurring on `last_day` has a slot of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct AnalysisWindow {
    first_day: Date,
    last_day: Date,
}

#[derive(Deserialize)]
struct RawWindow {
    first_day: Date,
    last_day: Date,
}

impl TryFrom<RawWindow> for AnalysisWindow {
    type Error = ProjectionError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        AnalysisWindow::new(raw.first_day, raw.last_day)
    }
}

impl AnalysisWindow {
    pub fn new(first_day: Date, last_day: Date) -> Result<Self, ProjectionError> {
        if last_day < first_day {
            return Err(ProjectionError::InvalidWindow {
                first_day,
                last_day,
            });
        }
        Ok(Self {
            first_day,
            last_day,
        })
    }

    pub fn first_day(&self) -> Date {
        self.first_day
    }

    pub fn last_day(&self) -> Date {
        self.last_day
    }

    /// Number of day slots, counting both ends
    pub fn num_days(&self) -> usize {
        days_between(self.first_day, self.last_day) as usize + 1
    }

    /// Number of calendar years touched by the window
    pub fn num_years(&self) -> usize {
        (self.last_day.year() - self.first_day.year()) as usize + 1
    }

    pub fn contains(&self, date: Date) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    pub fn day_index(&self, date: Date) -> Option<usize> {
        self.contains(date)
            .then(|| days_between(self.first_day, date) as usize)
    }

    /// Calendar years between the window's first year and `date`'s year.
    /// Negative for dates before the window.
    pub fn year_index(&self, date: Date) -> i64 {
        i64::from(date.year()) - i64::from(self.first_day.year())
    }

    pub fn date_at(&self, day_index: usize) -> Date {
        add_days(self.first_day, day_index as i32)
    }

    pub fn first_year(&self) -> i16 {
        self.first_day.year()
    }
}
