use crate::aggregates::AnnualAggregates;
use crate::balances::project_balances;
use crate::deltas::{DeltaLedger, apply_occurrence};
use crate::error::ProjectionError;
use crate::model::{AccountSeries, AnalysisWindow, Projection, Scenario};
use crate::schedule::schedule;

/// Project every account's daily balance across `window`.
///
/// Runs the whole horizon from scratch: expand each event's rule, apply the
/// occurrences event by event, then fold the deltas into balances. The first
/// error aborts the run.
pub fn project(scenario: &Scenario, window: &AnalysisWindow) -> Result<Projection, ProjectionError> {
    let _span = tracing::info_span!(
        "project",
        first_day = %window.first_day(),
        last_day = %window.last_day(),
    )
    .entered();

    let mut ledger = DeltaLedger::new(&scenario.accounts, window)?;
    let mut aggregates = AnnualAggregates::seeded(&scenario.auxiliary_values, window)?;

    let occurrences = schedule(&scenario.events, window)?;
    for occurrence in &occurrences {
        let event = &scenario.events[occurrence.event];
        apply_occurrence(event, occurrence, window, &mut ledger, &mut aggregates)?;
    }

    let balances = project_balances(&scenario.accounts, &mut ledger);

    tracing::info!(
        events = scenario.events.len(),
        occurrences = occurrences.len(),
        accounts = scenario.accounts.len(),
        days = window.num_days(),
        "projection complete"
    );

    Ok(Projection {
        window: *window,
        accounts: scenario
            .accounts
            .iter()
            .zip(balances)
            .map(|(account, balances)| AccountSeries {
                name: account.name.clone(),
                balances,
            })
            .collect(),
        aggregates,
    })
}
