//! Rashi (zodiac sign) and DMS (degrees-minutes-seconds) computation.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each.
//! Given a sidereal longitude, we identify which rashi the point falls in
//! and express the position as degrees-minutes-seconds within that sign.
//!
//! 12 rashis of 30 deg each, starting from Mesha (Aries) at 0 deg. A point
//! exactly on a 30 deg boundary belongs to the later sign.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::error::VedicError;
use crate::util::{divide_arc, normalize_360, require_finite};

/// Span of one rashi in degrees.
pub const RASHI_SPAN: f64 = 30.0;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi at a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Rashi {
        ALL_RASHIS[(index % 12) as usize]
    }
}

impl Display for Rashi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    /// Whole degrees (0..29 within a rashi, or 0..359 standalone).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

/// Renders as `12° 05' 07.25"`.
impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}° {:02}' {:05.2}\"",
            self.degrees, self.minutes, self.seconds
        )
    }
}

/// Full rashi position result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RashiInfo {
    /// The rashi (zodiac sign).
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Position within the rashi as DMS.
    pub dms: Dms,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Degrees and minutes truncate; seconds carry the residual fraction.
/// Handles negative input by taking absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.trunc() as u16;
    let remainder = (d - total_degrees as f64) * 60.0;
    let minutes = remainder.trunc() as u8;
    let seconds = (d - total_degrees as f64 - minutes as f64 / 60.0) * 3600.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

/// Largest magnitude [`deg_to_dms`] represents without saturating degrees.
pub const MAX_DMS_DEGREES: f64 = u16::MAX as f64 + 1.0;

/// [`deg_to_dms`] for untrusted input: rejects non-finite values and
/// magnitudes whose whole degrees do not fit in [`Dms::degrees`].
pub fn try_deg_to_dms(deg: f64) -> Result<Dms, VedicError> {
    let deg = require_finite(deg, "angle must be finite")?;
    if deg.abs() >= MAX_DMS_DEGREES {
        return Err(VedicError::InvalidInput("angle must be below 65536 deg"));
    }
    Ok(deg_to_dms(deg))
}

/// Display string for a full ecliptic longitude, e.g. `95° 30' 00.00"`.
pub fn format_dms(lon_deg: f64) -> String {
    deg_to_dms(lon_deg).to_string()
}

/// Display string for the degree within the sign, e.g. `5° 30' 00.00"` for 95.5 deg.
pub fn format_rashi_dms(lon_deg: f64) -> String {
    deg_to_dms(lon_deg.rem_euclid(RASHI_SPAN)).to_string()
}

/// Determine rashi from sidereal ecliptic longitude.
///
/// The input is a sidereal longitude in degrees (tropical minus ayanamsha).
/// Each rashi spans exactly 30 degrees: Mesha = [0, 30), Vrishabha = [30, 60), etc.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let (count, degrees_in_rashi) = divide_arc(lon, RASHI_SPAN);
    // Clamp to 11 in case of floating point edge (exactly 360.0)
    let rashi_idx = (count as u8).min(11);
    let rashi = ALL_RASHIS[rashi_idx as usize];
    let dms = deg_to_dms(degrees_in_rashi);

    RashiInfo {
        rashi,
        rashi_index: rashi_idx,
        dms,
        degrees_in_rashi,
    }
}
