//! Day-by-day account balance projection
//!
//! This crate projects the balance of a set of named accounts over a
//! multi-decade window, driven by recurring events. It supports:
//! - RFC 5545 style recurrence rules expanded to concrete dates
//! - Static, annually-bumped, and marginal-bracket event amounts
//! - Year-indexed aggregates (taxable income and user-supplied values)
//! - Overdraft cascading from each account to the next in priority order
//!
//! # Builder DSL
//!
//! ```ignore
//! use firecalc_core::config::{EventBuilder, ScenarioBuilder};
//!
//! let (scenario, window) = ScenarioBuilder::new()
//!     .window((2025, 1, 1), (2055, 1, 1))
//!     .account("Checking", 10_000)
//!     .account("Savings", 50_000)
//!     .event(EventBuilder::fixed("Salary")
//!         .rule("FREQ=MONTHLY;BYMONTHDAY=1")
//!         .amount("Checking", 8_000)
//!         .taxable(8_000))
//!     .build()?;
//!
//! let projection = firecalc_core::project(&scenario, &window)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregates;
pub mod balances;
pub mod date_math;
pub mod deltas;
pub mod error;
pub mod marginal;
pub mod projection;
pub mod recurrence;
pub mod schedule;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{EventBuilder, ScenarioBuilder};
pub use error::{ConfigError, ProjectionError, RuleError};
pub use projection::project;
