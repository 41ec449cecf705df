//! External collaborators: positions, places, zones and daylight.
//!
//! The chart pipeline only sees these traits. Default implementations for
//! offline use live in [`crate::manual`].

use kundali_time::LocalInstant;
use kundali_vedic_base::{GeoLocation, Graha};
use serde::Serialize;

use crate::error::ChartError;

/// Sidereal positions for an instant (JD UTC).
pub trait SiderealEphemeris {
    /// Sidereal longitude of a graha. Ketu is never requested; it is
    /// always derived from Rahu.
    fn sidereal_longitude(&self, graha: Graha, jd_utc: f64) -> Result<f64, ChartError>;

    /// Sidereal ascendant and the 12 house cusps.
    fn ascendant_and_cusps(
        &self,
        jd_utc: f64,
        location: &GeoLocation,
    ) -> Result<(f64, [f64; 12]), ChartError>;
}

/// A place name resolved to coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlace {
    pub address: String,
    pub location: GeoLocation,
    /// Zone known for this place, if the geocoder has one.
    pub timezone: Option<String>,
}

/// Place name → coordinates. Fails with [`ChartError::LocationNotFound`].
pub trait Geocoder {
    fn geocode(&self, place: &str) -> Result<ResolvedPlace, ChartError>;
}

/// Coordinates → IANA zone name. `None` when the lookup misses.
pub trait TimezoneLookup {
    fn timezone_of(&self, location: &GeoLocation) -> Option<String>;
}

/// Day/night determination. `None` when it cannot be decided (for example
/// polar day or night), in which case the hour heuristic is used.
pub trait DaylightOracle {
    fn is_daytime(&self, instant: &LocalInstant, location: &GeoLocation) -> Option<bool>;
}
