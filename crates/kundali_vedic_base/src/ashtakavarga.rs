//! Simplified sign-occupancy Ashtakavarga.
//!
//! This is not the BPHS benefic-offset scheme: each of the eight contributors
//! (Sun through Saturn, plus Lagna) gives a single bindu to the sign it
//! occupies. The per-sign totals form the sarva row.

use serde::Serialize;

use crate::chart::{ChartInputs, ChartPoint};
use crate::graha::SAPTA_GRAHAS;
use crate::rashi::rashi_from_longitude;

/// Number of contributors: 7 grahas + Lagna.
pub const CONTRIBUTORS: usize = 8;

/// Contributors in column order.
pub const CONTRIBUTOR_POINTS: [ChartPoint; CONTRIBUTORS] = [
    ChartPoint::Graha(SAPTA_GRAHAS[0]),
    ChartPoint::Graha(SAPTA_GRAHAS[1]),
    ChartPoint::Graha(SAPTA_GRAHAS[2]),
    ChartPoint::Graha(SAPTA_GRAHAS[3]),
    ChartPoint::Graha(SAPTA_GRAHAS[4]),
    ChartPoint::Graha(SAPTA_GRAHAS[5]),
    ChartPoint::Graha(SAPTA_GRAHAS[6]),
    ChartPoint::Lagna,
];

/// Bindu table: `bindus[rashi][contributor]`, plus per-rashi totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancyAshtakavarga {
    pub bindus: [[u8; CONTRIBUTORS]; 12],
    pub totals: [u8; 12],
}

impl OccupancyAshtakavarga {
    /// Sum of all totals; always equals the number of contributors.
    pub fn grand_total(&self) -> u32 {
        self.totals.iter().map(|&t| t as u32).sum()
    }
}

/// Build the simplified table from chart inputs.
pub fn occupancy_ashtakavarga(inputs: &ChartInputs) -> OccupancyAshtakavarga {
    let mut bindus = [[0u8; CONTRIBUTORS]; 12];
    for (col, point) in CONTRIBUTOR_POINTS.iter().enumerate() {
        let lon = match point {
            ChartPoint::Graha(g) => inputs.grahas.longitude(*g),
            ChartPoint::Lagna => inputs.ascendant,
            ChartPoint::Maandi => continue,
        };
        let sign = rashi_from_longitude(lon).rashi_index as usize;
        bindus[sign][col] += 1;
    }
    let totals = bindus.map(|row| row.iter().sum::<u8>());
    OccupancyAshtakavarga { bindus, totals }
}
