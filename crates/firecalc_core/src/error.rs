use std::path::PathBuf;

use jiff::civil::Date;

/// Errors raised while parsing a recurrence rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("recurrence rule is empty")]
    Empty,
    #[error("rule part {part:?} is not of the form NAME=VALUE")]
    MalformedPart { part: String },
    #[error("rule part {name} appears more than once")]
    DuplicatePart { name: String },
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("{message}")]
    Rejected { message: String },
}

impl RuleError {
    pub(crate) fn invalid(name: &'static str, value: &str, reason: &'static str) -> Self {
        RuleError::InvalidValue {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Errors that abort a projection run
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("event {event:?} has a malformed recurrence rule: {source}")]
    MalformedRule {
        event: String,
        #[source]
        source: RuleError,
    },
    #[error("event {event:?} references unknown account {account:?}")]
    UnknownAccount { event: String, account: String },
    #[error("event {event:?} references unknown aggregate {aggregate:?}")]
    UnknownAggregate { event: String, aggregate: String },
    #[error(
        "event {event:?} reads {dependency:?} at year index {index}, outside 0..{len}"
    )]
    DependencyOutOfRange {
        event: String,
        dependency: String,
        index: i64,
        len: usize,
    },
    #[error("account {name:?} is defined more than once")]
    DuplicateAccount { name: String },
    #[error("auxiliary value {name:?} is defined more than once")]
    DuplicateAggregate { name: String },
    #[error("analysis window ends ({last_day}) before it starts ({first_day})")]
    InvalidWindow { first_day: Date, last_day: Date },
}

/// Errors raised while loading or converting scenario input
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("event {event:?} has unrecognized calculation kind {kind:?}")]
    UnknownValueType { event: String, kind: String },
    #[error("event {event:?} of kind {kind} is missing {field}")]
    MissingPayload {
        event: String,
        kind: &'static str,
        field: &'static str,
    },
    #[error("event {event:?} of kind {kind} does not take {setting}")]
    InapplicableSetting {
        event: String,
        kind: &'static str,
        setting: &'static str,
    },
    #[error("event {event:?} has bracket cutoff {cutoff} not above the previous {previous}")]
    BracketOrder {
        event: String,
        previous: i64,
        cutoff: i64,
    },
    #[error("{year:04}-{month:02}-{day:02} is not a valid date")]
    InvalidDate {
        year: i16,
        month: i8,
        day: i8,
        #[source]
        source: jiff::Error,
    },
    #[error(transparent)]
    Window(#[from] ProjectionError),
    #[error("invalid scenario JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
