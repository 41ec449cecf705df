//! Error types for Vedic calculations.

use thiserror::Error;

/// Errors from Vedic base calculations.
///
/// The math in this crate is total over finite longitudes; the only failure
/// mode is a caller handing in something outside a documented range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// An argument was outside its documented range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
