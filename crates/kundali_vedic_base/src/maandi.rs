//! Maandi (Gulika) sensitive point.
//!
//! Maandi is placed at a fixed arc from the Sun. The arc depends on the
//! weekday and on whether the birth falls in the day or the night segment;
//! each weekday has one arc for the day and one for the night.
//!
//! The day/night flag normally comes from a sunrise/sunset computation that
//! lives outside this crate. When that is unavailable the flag falls back
//! to an hour threshold (`hour < 18` by default), and the result records
//! which of the two produced it.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::error::VedicError;
use crate::util::{normalize_360, require_finite};

/// Default local hour at which the hour heuristic switches from day to night.
pub const DEFAULT_DAYTIME_CUTOFF_HOUR: u32 = 18;

/// (day arc, night arc) in degrees from the Sun, Sunday = 0 .. Saturday = 6.
pub const MAANDI_OFFSETS: [(f64, f64); 7] = [
    (156.0, 240.0), // Sunday
    (132.0, 216.0), // Monday
    (108.0, 192.0), // Tuesday
    (84.0, 336.0),  // Wednesday
    (60.0, 312.0),  // Thursday
    (36.0, 288.0),  // Friday
    (12.0, 264.0),  // Saturday
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// English name of a weekday number (0 = Sunday).
pub fn weekday_name(weekday: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(weekday as usize).copied()
}

/// Whether the birth falls in the day or the night segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DaySegment {
    Day,
    Night,
}

impl Display for DaySegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => f.write_str("day"),
            Self::Night => f.write_str("night"),
        }
    }
}

/// How the day/night segment was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DaySegmentBasis {
    /// From an actual sunrise/sunset computation.
    SunriseSunset,
    /// From the local-hour threshold, because sunrise/sunset was unavailable.
    HourHeuristic { cutoff_hour: u32 },
}

/// Maandi position plus the inputs that selected its arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaandiInfo {
    /// Sidereal longitude in [0, 360).
    pub longitude: f64,
    /// Weekday used for the lookup (0 = Sunday).
    pub weekday: u8,
    pub segment: DaySegment,
    pub basis: DaySegmentBasis,
    /// Arc added to the Sun's longitude.
    pub offset_deg: f64,
}

/// Day/night from the local hour alone.
pub fn segment_from_hour(local_hour: u32, cutoff_hour: u32) -> DaySegment {
    if local_hour < cutoff_hour {
        DaySegment::Day
    } else {
        DaySegment::Night
    }
}

/// Arc from the Sun for a weekday and segment.
pub fn maandi_offset(weekday: u8, segment: DaySegment) -> Result<f64, VedicError> {
    let (day, night) = *MAANDI_OFFSETS
        .get(weekday as usize)
        .ok_or(VedicError::InvalidInput("weekday must be 0 (Sunday) ..= 6 (Saturday)"))?;
    Ok(match segment {
        DaySegment::Day => day,
        DaySegment::Night => night,
    })
}

/// Maandi longitude: `(sun + offset) mod 360`.
pub fn maandi_longitude(
    sun_sidereal_lon: f64,
    weekday: u8,
    segment: DaySegment,
) -> Result<f64, VedicError> {
    let sun = require_finite(sun_sidereal_lon, "Sun longitude must be finite")?;
    let offset = maandi_offset(weekday, segment)?;
    Ok(normalize_360(sun + offset))
}

/// Locate Maandi, falling back to the hour threshold when the external
/// day/night determination is unavailable (`is_daytime == None`).
pub fn locate_maandi(
    sun_sidereal_lon: f64,
    weekday: u8,
    local_hour: u32,
    is_daytime: Option<bool>,
    cutoff_hour: u32,
) -> Result<MaandiInfo, VedicError> {
    if local_hour > 23 {
        return Err(VedicError::InvalidInput("local hour must be 0..=23"));
    }
    let (segment, basis) = match is_daytime {
        Some(true) => (DaySegment::Day, DaySegmentBasis::SunriseSunset),
        Some(false) => (DaySegment::Night, DaySegmentBasis::SunriseSunset),
        None => {
            let segment = segment_from_hour(local_hour, cutoff_hour);
            log::warn!(
                "sunrise/sunset unavailable; treating {local_hour:02}h as {segment} (cutoff {cutoff_hour}h)"
            );
            (segment, DaySegmentBasis::HourHeuristic { cutoff_hour })
        }
    };
    let offset_deg = maandi_offset(weekday, segment)?;
    let longitude = maandi_longitude(sun_sidereal_lon, weekday, segment)?;
    log::debug!("maandi: weekday {weekday}, {segment}, sun + {offset_deg} = {longitude:.4}");
    Ok(MaandiInfo {
        longitude,
        weekday,
        segment,
        basis,
        offset_deg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_day_adds_156() {
        let lon = maandi_longitude(10.0, 0, DaySegment::Day).unwrap();
        assert!((lon - 166.0).abs() < 1e-12);
    }

    #[test]
    fn wednesday_night_wraps() {
        // 100 + 336 = 436 → 76
        let lon = maandi_longitude(100.0, 3, DaySegment::Night).unwrap();
        assert!((lon - 76.0).abs() < 1e-12);
    }

    #[test]
    fn saturday_day_and_night() {
        assert_eq!(maandi_offset(6, DaySegment::Day).unwrap(), 12.0);
        assert_eq!(maandi_offset(6, DaySegment::Night).unwrap(), 264.0);
    }

    #[test]
    fn weekday_out_of_range() {
        assert!(maandi_longitude(0.0, 7, DaySegment::Day).is_err());
    }

    #[test]
    fn hour_heuristic_threshold() {
        assert_eq!(segment_from_hour(17, 18), DaySegment::Day);
        assert_eq!(segment_from_hour(18, 18), DaySegment::Night);
        assert_eq!(segment_from_hour(0, 18), DaySegment::Day);
    }

    #[test]
    fn fallback_is_declared_in_result() {
        let info = locate_maandi(0.0, 1, 20, None, DEFAULT_DAYTIME_CUTOFF_HOUR).unwrap();
        assert_eq!(info.segment, DaySegment::Night);
        assert_eq!(
            info.basis,
            DaySegmentBasis::HourHeuristic { cutoff_hour: 18 }
        );
        assert!((info.longitude - 216.0).abs() < 1e-12);
    }

    #[test]
    fn sunrise_flag_overrides_hour() {
        // 20h but the oracle says it is still day (e.g. high-latitude summer).
        let info = locate_maandi(0.0, 1, 20, Some(true), DEFAULT_DAYTIME_CUTOFF_HOUR).unwrap();
        assert_eq!(info.segment, DaySegment::Day);
        assert_eq!(info.basis, DaySegmentBasis::SunriseSunset);
        assert!((info.longitude - 132.0).abs() < 1e-12);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(0), Some("Sunday"));
        assert_eq!(weekday_name(6), Some("Saturday"));
        assert_eq!(weekday_name(7), None);
    }
}
