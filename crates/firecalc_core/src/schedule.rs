//! Occurrence schedule
//!
//! Marginal events read aggregates that earlier occurrences write, so the
//! order occurrences are applied in is part of the result. The schedule
//! fixes it: events in list order, and within one event its dates in
//! ascending order. It is never re-sorted by date across events.

use jiff::civil::Date;

use crate::error::ProjectionError;
use crate::model::{AnalysisWindow, Event};
use crate::recurrence;

/// One date on which one event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Position of the event in the scenario's event list
    pub event: usize,
    pub date: Date,
    /// Day index within the window
    pub day: usize,
    /// Calendar years since the window's first year
    pub year: i64,
}

/// Expand every event's rule over the window, in processing order.
///
/// The first rule that fails to parse aborts the whole schedule.
pub fn schedule(
    events: &[Event],
    window: &AnalysisWindow,
) -> Result<Vec<Occurrence>, ProjectionError> {
    let mut occurrences = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let dates = recurrence::expand(&event.rule, window.first_day(), window.last_day())
            .map_err(|source| ProjectionError::MalformedRule {
                event: event.name.clone(),
                source,
            })?;

        tracing::debug!(
            event = %event.name,
            kind = event.kind.label(),
            occurrences = dates.len(),
            "expanded recurrence rule"
        );

        occurrences.extend(dates.into_iter().filter_map(|date| {
            Some(Occurrence {
                event: index,
                date,
                day: window.day_index(date)?,
                year: window.year_index(date),
            })
        }));
    }

    Ok(occurrences)
}
