//! Sunrise/sunset from the closed-form sunrise equation.
//!
//! Low-precision (about a minute at mid latitudes) but free of any
//! ephemeris dependency. The Sun's apparent position comes from a
//! mean-anomaly series; the hour angle is solved at the standard −0°50'
//! altitude (34' refraction + 16' semidiameter). All times are JD UTC.

use serde::Serialize;

use crate::error::VedicError;
use crate::util::require_finite;

/// J2000.0 epoch as a Julian day.
const J2000: f64 = 2_451_545.0;

/// Mean obliquity used by the series, degrees.
const OBLIQUITY_DEG: f64 = 23.4397;

/// Altitude of the Sun's centre at apparent rise/set, degrees.
pub const SUNRISE_ALTITUDE_DEG: f64 = -50.0 / 60.0;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
}

impl GeoLocation {
    /// Validated location.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, VedicError> {
        let lat = require_finite(latitude_deg, "latitude must be finite")?;
        let lon = require_finite(longitude_deg, "longitude must be finite")?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(VedicError::InvalidInput("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(VedicError::InvalidInput("longitude must be within [-180, 180]"));
        }
        Ok(Self {
            latitude_deg: lat,
            longitude_deg: lon,
        })
    }
}

/// Outcome of a sunrise/sunset computation for one civil date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SunEvents {
    /// Sun rises and sets at the given JD UTC values.
    Events { sunrise_jd: f64, sunset_jd: f64 },
    /// Sun never rises during this solar day (polar night).
    NeverRises,
    /// Sun never sets during this solar day (midnight sun).
    NeverSets,
}

/// Sunrise and sunset around local noon of the civil date starting at
/// `jd_ut_midnight` (0h UT of that date).
pub fn sun_events(jd_ut_midnight: f64, location: &GeoLocation) -> SunEvents {
    // Mean solar noon in days since J2000.
    let day_number = (jd_ut_midnight + 0.5 - J2000).round();
    let j_star = day_number - location.longitude_deg / 360.0;
    solve(j_star, location.latitude_deg)
}

/// Whether `jd_utc` is daytime by the "before sunset" rule: any instant of
/// the civil date earlier than that date's sunset counts as day. `None` when
/// the date has no sunset or sunrise (polar day or night).
pub fn is_before_sunset(jd_utc: f64, events: SunEvents) -> Option<bool> {
    match events {
        SunEvents::Events { sunset_jd, .. } => Some(jd_utc < sunset_jd),
        SunEvents::NeverRises | SunEvents::NeverSets => None,
    }
}

fn solve(j_star: f64, latitude_deg: f64) -> SunEvents {
    let m = (357.5291 + 0.985_600_28 * j_star).rem_euclid(360.0).to_radians();
    let c = 1.9148 * m.sin() + 0.0200 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin();
    let lambda = (m.to_degrees() + c + 180.0 + 102.9372)
        .rem_euclid(360.0)
        .to_radians();
    let transit = J2000 + j_star + 0.0053 * m.sin() - 0.0069 * (2.0 * lambda).sin();

    let sin_dec = lambda.sin() * OBLIQUITY_DEG.to_radians().sin();
    let cos_dec = (1.0 - sin_dec * sin_dec).sqrt();
    let phi = latitude_deg.to_radians();
    let cos_h0 = (SUNRISE_ALTITUDE_DEG.to_radians().sin() - phi.sin() * sin_dec)
        / (phi.cos() * cos_dec);

    if cos_h0 > 1.0 {
        return SunEvents::NeverRises;
    }
    if cos_h0 < -1.0 || !cos_h0.is_finite() {
        return SunEvents::NeverSets;
    }
    let half_day = cos_h0.acos().to_degrees() / 360.0;
    SunEvents::Events {
        sunrise_jd: transit - half_day,
        sunset_jd: transit + half_day,
    }
}
