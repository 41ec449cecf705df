//! Whole-sign house (bhava) table.
//!
//! House 1 is the ascendant's sign; each following house is the next sign.
//! The navamsha shown for a house is that of the sign's 15 deg midpoint, a
//! single representative value rather than a cusp-based one.

use serde::Serialize;

use crate::graha::{Graha, rashi_lord};
use crate::navamsa::navamsa_from_longitude;
use crate::rashi::{RASHI_SPAN, Rashi, rashi_from_longitude};

/// One row of the house table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HouseRow {
    /// House number, 1..=12.
    pub house: u8,
    pub rashi: Rashi,
    pub lord: Graha,
    /// Navamsha of the sign's midpoint.
    pub navamsa: Rashi,
}

/// Sign of house `house` (1-based) for an ascendant in `asc_rashi_index`.
pub fn house_rashi(asc_rashi_index: u8, house: u8) -> Rashi {
    Rashi::from_index(((asc_rashi_index as u32 + house as u32 + 11) % 12) as u8)
}

/// Midpoint longitude of a sign.
pub fn rashi_midpoint(rashi: Rashi) -> f64 {
    rashi.index() as f64 * RASHI_SPAN + RASHI_SPAN / 2.0
}

/// Twelve house rows for the given ascendant longitude.
pub fn house_table(ascendant_lon: f64) -> [HouseRow; 12] {
    let asc = rashi_from_longitude(ascendant_lon).rashi_index;
    std::array::from_fn(|i| {
        let house = i as u8 + 1;
        let rashi = house_rashi(asc, house);
        HouseRow {
            house,
            rashi,
            lord: rashi_lord(rashi),
            navamsa: navamsa_from_longitude(rashi_midpoint(rashi)).rashi,
        }
    })
}
