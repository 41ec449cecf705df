//! Error type for birth chart assembly.

use kundali_config::ConfigError;
use kundali_time::TimeError;
use kundali_vedic_base::VedicError;
use thiserror::Error;

/// Errors surfaced to the caller of [`crate::compute_birth_chart`].
///
/// Timezone lookup misses and sunrise/sunset failures never appear here:
/// they are recovered in place and recorded on the resulting chart.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Geocoding found no match for the place name.
    #[error("location not found: {0}")]
    LocationNotFound(String),
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    /// The ephemeris provider could not supply a position.
    #[error("ephemeris error: {0}")]
    Ephemeris(String),
    #[error(transparent)]
    Vedic(#[from] VedicError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
