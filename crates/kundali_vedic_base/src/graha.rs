//! Vedic planet (graha) enum, rashi lordship and the per-chart longitude set.
//!
//! The 9 grahas form the foundation of all Vedic jyotish calculations.
//! Each rashi has a planetary lord, which is a universal Vedic convention.
//! Rahu and Ketu are antipodal: Ketu is always derived from Rahu, never
//! looked up independently.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::error::VedicError;
use crate::rashi::Rashi;
use crate::util::{normalize_360, require_finite};

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in canonical chart order: Sun, Moon, Mars, Mercury,
/// Jupiter, Venus, Saturn, Rahu, Ketu.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// The 7 classical grahas (sapta grahas), excluding Rahu and Ketu.
pub const SAPTA_GRAHAS: [Graha; 7] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Two-letter chart abbreviation.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Surya => "Su",
            Self::Chandra => "Mo",
            Self::Mangal => "Ma",
            Self::Buddh => "Me",
            Self::Guru => "Ju",
            Self::Shukra => "Ve",
            Self::Shani => "Sa",
            Self::Rahu => "Ra",
            Self::Ketu => "Ke",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

/// Get the planetary lord of a rashi.
///
/// - Mesha/Vrischika → Mangal (Mars)
/// - Vrishabha/Tula → Shukra (Venus)
/// - Mithuna/Kanya → Buddh (Mercury)
/// - Karka → Chandra (Moon)
/// - Simha → Surya (Sun)
/// - Dhanu/Meena → Guru (Jupiter)
/// - Makara/Kumbha → Shani (Saturn)
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha | Rashi::Vrischika => Graha::Mangal,
        Rashi::Vrishabha | Rashi::Tula => Graha::Shukra,
        Rashi::Mithuna | Rashi::Kanya => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Dhanu | Rashi::Meena => Graha::Guru,
        Rashi::Makara | Rashi::Kumbha => Graha::Shani,
    }
}

/// Ketu's longitude: exactly opposite Rahu.
pub fn ketu_from_rahu(rahu_lon_deg: f64) -> f64 {
    normalize_360(rahu_lon_deg + 180.0)
}

/// Sidereal longitudes of all 9 grahas, indexed in [`ALL_GRAHAS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrahaLongitudes {
    pub longitudes: [f64; 9],
}

impl GrahaLongitudes {
    /// Build from the seven sapta-graha longitudes (Sun..Saturn, in
    /// [`SAPTA_GRAHAS`] order) plus Rahu. Every value is normalized to
    /// [0, 360) and Ketu is derived from Rahu.
    pub fn from_sapta_and_rahu(sapta: [f64; 7], rahu: f64) -> Result<Self, VedicError> {
        let mut longitudes = [0.0; 9];
        for (slot, lon) in longitudes.iter_mut().zip(sapta) {
            *slot = normalize_360(require_finite(lon, "graha longitude must be finite")?);
        }
        let rahu = normalize_360(require_finite(rahu, "Rahu longitude must be finite")?);
        longitudes[Graha::Rahu.index() as usize] = rahu;
        longitudes[Graha::Ketu.index() as usize] = ketu_from_rahu(rahu);
        Ok(Self { longitudes })
    }

    /// Sidereal longitude of one graha.
    pub fn longitude(&self, graha: Graha) -> f64 {
        self.longitudes[graha.index() as usize]
    }

    /// `(graha, longitude)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Graha, f64)> + '_ {
        ALL_GRAHAS.iter().map(move |&g| (g, self.longitude(g)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rashi::ALL_RASHIS;

    #[test]
    fn graha_indices_sequential() {
        for (i, g) in ALL_GRAHAS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
        }
    }

    #[test]
    fn rashi_lords_cover_sapta_grahas_only() {
        for r in ALL_RASHIS {
            let lord = rashi_lord(r);
            assert!(SAPTA_GRAHAS.contains(&lord), "{r:?}");
        }
    }

    #[test]
    fn vrischika_is_ruled_by_mars() {
        assert_eq!(rashi_lord(Rashi::Vrischika), Graha::Mangal);
        assert_eq!(rashi_lord(Rashi::Vrischika).english_name(), "Mars");
    }

    #[test]
    fn ketu_is_opposite_rahu() {
        for rahu in [0.0, 12.25, 179.999, 180.0, 270.5, 359.75] {
            let ketu = ketu_from_rahu(rahu);
            assert_eq!(ketu, (rahu + 180.0) % 360.0, "rahu {rahu}");
        }
    }

    #[test]
    fn longitudes_normalize_and_derive_ketu() {
        let g = GrahaLongitudes::from_sapta_and_rahu(
            [370.0, -20.0, 10.0, 20.0, 30.0, 40.0, 50.0],
            200.0,
        )
        .unwrap();
        assert!((g.longitude(Graha::Surya) - 10.0).abs() < 1e-12);
        assert!((g.longitude(Graha::Chandra) - 340.0).abs() < 1e-12);
        assert_eq!(g.longitude(Graha::Ketu), 20.0);
        assert_eq!(g.iter().count(), 9);
    }

    #[test]
    fn tiny_negative_longitude_is_stored_as_zero() {
        let g = GrahaLongitudes::from_sapta_and_rahu([-1e-14, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], -1e-14)
            .unwrap();
        assert_eq!(g.longitude(Graha::Surya), 0.0);
        assert_eq!(g.longitude(Graha::Rahu), 0.0);
        assert_eq!(g.longitude(Graha::Ketu), 180.0);
    }

    #[test]
    fn longitudes_reject_nan() {
        let r = GrahaLongitudes::from_sapta_and_rahu([f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.0);
        assert!(r.is_err());
    }
}
