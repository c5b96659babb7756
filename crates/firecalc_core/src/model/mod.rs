mod accounts;
mod events;
mod results;
mod window;

pub use accounts::{Account, AuxiliaryValue};
pub use events::{AccountAmount, Event, EventKind, MarginalBracket, MarginalDependency};
pub use results::{AccountSeries, Projection};
pub use window::AnalysisWindow;

use serde::{Deserialize, Serialize};

/// The three input collections of a projection run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Processed in this order; marginal events observe aggregates written by
    /// earlier entries
    pub events: Vec<Event>,
    /// Overdraft priority order
    pub accounts: Vec<Account>,
    pub auxiliary_values: Vec<AuxiliaryValue>,
}
