//! Error types for civil time handling.

use thiserror::Error;

/// Errors from parsing or localising a civil date/time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// A date, time, zone or JD field could not be parsed or is out of range.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    /// The wall-clock time falls in a gap skipped by a DST transition.
    #[error("local time {local} does not exist in {zone}")]
    NonexistentLocalTime { local: String, zone: String },
}

impl TimeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
