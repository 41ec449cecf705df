//! Birth balance: how much of the first mahadasha remains at birth.
//!
//! The Moon's nakshatra picks the starting lord; the fraction of that
//! nakshatra already traversed is the fraction of the lord's period
//! already spent.

use serde::Serialize;

use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::{NAKSHATRA_SPAN_27, Nakshatra, nakshatra_from_longitude};
use crate::util::require_finite;

use super::vimshottari::{VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_YEARS};

/// Birth balance of the first mahadasha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaBalance {
    pub nakshatra: Nakshatra,
    /// 0-based nakshatra index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Index of the starting lord in the 9-sequence: `nakshatra_index mod 9`.
    pub lord_index: u8,
    pub lord: Graha,
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub elapsed_fraction: f64,
    /// Remaining years of the starting lord's period.
    pub balance_years: f64,
}

/// Compute the Vimshottari birth balance from the Moon's sidereal longitude.
pub fn vimshottari_balance(moon_sidereal_lon: f64) -> Result<DashaBalance, VedicError> {
    let lon = require_finite(moon_sidereal_lon, "Moon longitude must be finite")?;
    let nak = nakshatra_from_longitude(lon);
    let lord_index = nak.nakshatra_index % 9;
    let elapsed_fraction = nak.degrees_in_nakshatra / NAKSHATRA_SPAN_27;
    let full_years = VIMSHOTTARI_YEARS[lord_index as usize];
    let balance_years = (1.0 - elapsed_fraction) * full_years;
    log::debug!(
        "dasha balance: {} (#{}) lord {}, elapsed {:.6}, {:.6} of {} years remain",
        nak.nakshatra,
        nak.nakshatra_index,
        VIMSHOTTARI_SEQUENCE[lord_index as usize],
        elapsed_fraction,
        balance_years,
        full_years
    );
    Ok(DashaBalance {
        nakshatra: nak.nakshatra,
        nakshatra_index: nak.nakshatra_index,
        lord_index,
        lord: VIMSHOTTARI_SEQUENCE[lord_index as usize],
        elapsed_fraction,
        balance_years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_at_start_of_nakshatra() {
        let b = vimshottari_balance(0.0).unwrap();
        assert_eq!(b.nakshatra_index, 0);
        assert_eq!(b.lord, Graha::Ketu);
        assert!(b.elapsed_fraction.abs() < 1e-12);
        assert!((b.balance_years - 7.0).abs() < 1e-12);
    }

    #[test]
    fn balance_at_midpoint() {
        let b = vimshottari_balance(NAKSHATRA_SPAN_27 / 2.0).unwrap();
        assert_eq!(b.nakshatra_index, 0);
        assert!((b.elapsed_fraction - 0.5).abs() < 1e-10);
        assert!((b.balance_years - 3.5).abs() < 1e-9);
    }

    #[test]
    fn moon_at_45_deg() {
        let b = vimshottari_balance(45.0).unwrap();
        assert_eq!(b.nakshatra, Nakshatra::Rohini);
        assert_eq!(b.lord_index, 3);
        assert_eq!(b.lord, Graha::Chandra);
        assert!((b.elapsed_fraction - 0.375).abs() < 1e-9);
        assert!((b.balance_years - 6.25).abs() < 1e-9);
    }

    #[test]
    fn lordship_cycles_three_times() {
        // Magha (9) and Mula (18) share Ashwini's lord.
        for lon in [0.5, 9.0 * NAKSHATRA_SPAN_27 + 0.5, 18.0 * NAKSHATRA_SPAN_27 + 0.5] {
            assert_eq!(vimshottari_balance(lon).unwrap().lord, Graha::Ketu);
        }
    }

    #[test]
    fn balance_wraps_negative() {
        let b = vimshottari_balance(-1.0).unwrap();
        assert_eq!(b.nakshatra, Nakshatra::Revati);
        assert_eq!(b.lord, Graha::Buddh);
    }

    #[test]
    fn balance_rejects_nan() {
        assert!(vimshottari_balance(f64::NAN).is_err());
    }
}
