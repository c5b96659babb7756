//! Recurring events and their calculation variants
//!
//! An event pairs a recurrence rule with one way of turning each occurrence
//! into account deltas. Every occurrence also adds the event's taxable value
//! to that year's taxable income, whatever the variant.

use serde::{Deserialize, Serialize};

/// A fixed signed amount booked against one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAmount {
    pub account: String,
    pub amount: i64,
}

impl AccountAmount {
    pub fn new(account: impl Into<String>, amount: i64) -> Self {
        Self {
            account: account.into(),
            amount,
        }
    }
}

/// One progressive bracket: the slice of the dependent value between the
/// previous cutoff and this one is multiplied by `rate`.
///
/// Rates are single precision so that truncated bracket amounts come out
/// the same as in existing projections built on float32 rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginalBracket {
    pub cutoff: i64,
    pub rate: f32,
}

/// Payload of a marginal-bracket event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalDependency {
    /// Aggregate the brackets are applied to (e.g. "TaxableIncome")
    pub dependency: String,
    /// Year offset added to the occurrence's year index before reading the
    /// aggregate; negative values look back
    pub offset: i32,
    /// Account that receives the bracket amounts
    pub account: String,
    /// Brackets in strictly increasing cutoff order
    pub brackets: Vec<MarginalBracket>,
}

/// How an occurrence turns into account deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Same amounts at every occurrence
    Static { values: Vec<AccountAmount> },

    /// Base amounts compounded by `bump` once per calendar year elapsed
    /// since the start of the analysis window
    AnnualBump {
        base_values: Vec<AccountAmount>,
        bump: f64,
    },

    /// Progressive allocation of another tracked aggregate
    MarginalDependent(MarginalDependency),
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Static { .. } => "Static",
            EventKind::AnnualBump { .. } => "AnnualBump",
            EventKind::MarginalDependent(_) => "MarginalDependent",
        }
    }
}

/// A named recurring event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    /// RFC 5545 style recurrence rule
    pub rule: String,
    /// Added to the occurrence year's taxable income at every occurrence
    pub taxable_value: i64,
    pub kind: EventKind,
}
