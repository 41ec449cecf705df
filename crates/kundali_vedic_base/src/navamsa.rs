//! Navamsha (D9) divisional sign.
//!
//! Each 30 deg rashi is split into 9 equal parts of 3 deg 20'. The parts are
//! laid end to end across the zodiac (108 in all) and mapped in sequence
//! onto the 12-sign cycle, so the navamsha of part `n` is sign `n mod 12`.
//! This is the same mapping as the element rule (fire signs start from
//! Mesha, earth from Makara, air from Tula, water from Karka).

use serde::Serialize;

use crate::rashi::{RASHI_SPAN, Rashi};
use crate::util::{divide_arc, normalize_360};

/// Number of navamsha parts in one rashi.
pub const NAVAMSA_PARTS: u8 = 9;

/// Span of one navamsha part: 30/9 = 3.3333... degrees.
pub const NAVAMSA_SPAN: f64 = RASHI_SPAN / NAVAMSA_PARTS as f64;

/// Result of a navamsha lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavamsaInfo {
    /// The navamsha sign.
    pub rashi: Rashi,
    /// 0-based index of the navamsha sign (0 = Mesha).
    pub rashi_index: u8,
    /// Which of the 9 parts of the natal rashi the point falls in (0..8).
    pub part: u8,
}

/// Navamsha sign of a sidereal longitude.
pub fn navamsa_from_longitude(sidereal_lon_deg: f64) -> NavamsaInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let (sign_count, offset) = divide_arc(lon, RASHI_SPAN);
    let sign = sign_count.min(11);
    let (part_count, _) = divide_arc(offset, NAVAMSA_SPAN);
    let part = part_count.min(NAVAMSA_PARTS as u32 - 1);
    let idx = ((sign * NAVAMSA_PARTS as u32 + part) % 12) as u8;
    NavamsaInfo {
        rashi: Rashi::from_index(idx),
        rashi_index: idx,
        part: part as u8,
    }
}
