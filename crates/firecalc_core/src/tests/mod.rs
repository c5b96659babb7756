//! Scenario tests for the projection engine
//!
//! Tests are organized by topic:
//! - `projection` - End-to-end runs over the three calculation variants
//! - `cascade` - Overdraft hand-off between accounts
//! - `ordering` - Event-then-occurrence processing order
//! - `errors` - Runs that abort on the first error
//! - `files` - Loading the JSON input files from disk
