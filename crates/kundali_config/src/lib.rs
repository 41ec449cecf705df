//! Configuration file for chart defaults and the offline gazetteer.
//!
//! ```toml
//! [chart]
//! default_timezone = "Asia/Kolkata"
//! dasha_depth = 3
//! daytime_cutoff_hour = 18
//!
//! [places."chennai"]
//! latitude = 13.0827
//! longitude = 80.2707
//! timezone = "Asia/Kolkata"
//! address = "Chennai, Tamil Nadu, India"
//! ```
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::collections::BTreeMap;
use std::path::Path;

use kundali_vedic_base::{DEFAULT_DASHA_DEPTH, DEFAULT_DAYTIME_CUTOFF_HOUR, MAX_DASHA_DEPTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zone used when coordinate→zone lookup fails.
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Errors from loading or validating a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// `[chart]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSettings {
    pub default_timezone: String,
    pub dasha_depth: u8,
    pub daytime_cutoff_hour: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            dasha_depth: DEFAULT_DASHA_DEPTH,
            daytime_cutoff_hour: DEFAULT_DAYTIME_CUTOFF_HOUR,
        }
    }
}

/// One `[places."name"]` gazetteer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceEntry {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KundaliConfig {
    pub chart: ChartSettings,
    pub places: BTreeMap<String, PlaceEntry>,
}

impl KundaliConfig {
    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!(
            "loaded config {} ({} places)",
            path.display(),
            config.places.len()
        );
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and zone names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chart = &self.chart;
        if !(1..=MAX_DASHA_DEPTH).contains(&chart.dasha_depth) {
            return Err(ConfigError::Invalid(format!(
                "chart.dasha_depth must be 1..={MAX_DASHA_DEPTH}, got {}",
                chart.dasha_depth
            )));
        }
        if chart.daytime_cutoff_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "chart.daytime_cutoff_hour must be 0..=23, got {}",
                chart.daytime_cutoff_hour
            )));
        }
        kundali_time::parse_timezone(&chart.default_timezone)
            .map_err(|e| ConfigError::Invalid(format!("chart.default_timezone: {e}")))?;

        for (name, place) in &self.places {
            if !(-90.0..=90.0).contains(&place.latitude) {
                return Err(ConfigError::Invalid(format!(
                    "places.{name}.latitude must be within [-90, 90]"
                )));
            }
            if !(-180.0..=180.0).contains(&place.longitude) {
                return Err(ConfigError::Invalid(format!(
                    "places.{name}.longitude must be within [-180, 180]"
                )));
            }
            if let Some(tz) = &place.timezone {
                kundali_time::parse_timezone(tz)
                    .map_err(|e| ConfigError::Invalid(format!("places.{name}.timezone: {e}")))?;
            }
        }
        Ok(())
    }

    /// Gazetteer entry by name, case-insensitive, surrounding whitespace ignored.
    pub fn lookup_place(&self, name: &str) -> Option<(&str, &PlaceEntry)> {
        let wanted = name.trim();
        self.places
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(wanted))
            .map(|(key, entry)| (key.as_str(), entry))
    }
}
