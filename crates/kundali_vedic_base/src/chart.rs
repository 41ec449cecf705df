//! Chart composition: position table and sign-chart occupancy.
//!
//! Every output here is derived from the same three inputs: the nine graha
//! longitudes, the ascendant (Lagna) and the Maandi longitude. Rows and
//! cell occupants always follow chart order: Lagna, then the grahas in
//! [`ALL_GRAHAS`] order, then Maandi.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::error::VedicError;
use crate::graha::{ALL_GRAHAS, Graha, GrahaLongitudes};
use crate::nakshatra::{Nakshatra, nakshatra_from_longitude};
use crate::navamsa::navamsa_from_longitude;
use crate::rashi::{Rashi, format_dms, format_rashi_dms, rashi_from_longitude};
use crate::util::{normalize_360, require_finite};

/// A point placed on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartPoint {
    Lagna,
    Graha(Graha),
    Maandi,
}

impl ChartPoint {
    /// Display name (English for grahas).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lagna => "Lagna",
            Self::Graha(g) => g.english_name(),
            Self::Maandi => "Maandi",
        }
    }

    /// Short label used inside chart cells.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Lagna => "As",
            Self::Graha(g) => g.abbreviation(),
            Self::Maandi => "m",
        }
    }
}

impl Display for ChartPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Raw longitudes a chart is composed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartInputs {
    pub grahas: GrahaLongitudes,
    pub ascendant: f64,
    pub maandi: f64,
}

impl ChartInputs {
    pub fn new(grahas: GrahaLongitudes, ascendant: f64, maandi: f64) -> Result<Self, VedicError> {
        let ascendant = require_finite(ascendant, "ascendant longitude must be finite")?;
        let maandi = require_finite(maandi, "Maandi longitude must be finite")?;
        Ok(Self {
            grahas,
            ascendant: normalize_360(ascendant),
            maandi: normalize_360(maandi),
        })
    }

    /// All eleven points with their longitudes, in chart order.
    pub fn points(&self) -> Vec<(ChartPoint, f64)> {
        let mut points = Vec::with_capacity(ALL_GRAHAS.len() + 2);
        points.push((ChartPoint::Lagna, self.ascendant));
        points.extend(self.grahas.iter().map(|(g, lon)| (ChartPoint::Graha(g), lon)));
        points.push((ChartPoint::Maandi, self.maandi));
        points
    }
}

/// One row of the full position table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRow {
    pub point: ChartPoint,
    pub longitude: f64,
    /// Full longitude as `D° MM' SS.ss"`.
    pub longitude_dms: String,
    /// Degree within the sign as `D° MM' SS.ss"`.
    pub rashi_dms: String,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub rashi: Rashi,
    pub navamsa: Rashi,
}

/// Classify a single longitude into a position row.
pub fn position_row(point: ChartPoint, longitude: f64) -> PositionRow {
    let nak = nakshatra_from_longitude(longitude);
    PositionRow {
        point,
        longitude,
        longitude_dms: format_dms(longitude),
        rashi_dms: format_rashi_dms(longitude),
        nakshatra: nak.nakshatra,
        pada: nak.pada,
        rashi: rashi_from_longitude(longitude).rashi,
        navamsa: navamsa_from_longitude(longitude).rashi,
    }
}

/// Full position table: Lagna, the nine grahas, Maandi.
pub fn position_table(inputs: &ChartInputs) -> Vec<PositionRow> {
    inputs
        .points()
        .into_iter()
        .map(|(point, lon)| position_row(point, lon))
        .collect()
}

/// Which sign a point is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    /// Natal sign (D1).
    Rasi,
    /// Navamsha sign (D9).
    Navamsa,
}

impl ChartKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rasi => "Rasi",
            Self::Navamsa => "Navamsa",
        }
    }

    fn sign_of(self, longitude: f64) -> Rashi {
        match self {
            Self::Rasi => rashi_from_longitude(longitude).rashi,
            Self::Navamsa => navamsa_from_longitude(longitude).rashi,
        }
    }
}

/// Occupants of each of the 12 signs, indexed by rashi.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignChart {
    pub kind: ChartKind,
    pub cells: [Vec<ChartPoint>; 12],
}

impl SignChart {
    /// Points in one sign, in chart order.
    pub fn occupants(&self, rashi: Rashi) -> &[ChartPoint] {
        &self.cells[rashi.index() as usize]
    }

    /// Space-separated abbreviations for one sign, e.g. `As Su Me`.
    pub fn cell_label(&self, rashi: Rashi) -> String {
        self.occupants(rashi)
            .iter()
            .map(|p| p.abbreviation())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Place every point into its Rasi or Navamsa sign.
pub fn sign_chart(inputs: &ChartInputs, kind: ChartKind) -> SignChart {
    let mut cells: [Vec<ChartPoint>; 12] = std::array::from_fn(|_| Vec::new());
    for (point, lon) in inputs.points() {
        cells[kind.sign_of(lon).index() as usize].push(point);
    }
    SignChart { kind, cells }
}

/// South-Indian chart: 4×4 grid read row-major, each entry the rashi index
/// drawn in that square. `None` marks the four centre squares, which hold
/// the chart label instead of a sign.
///
/// ```text
/// Meena     Mesha  Vrishabha  Mithuna
/// Kumbha    [    label    ]   Karka
/// Makara    [             ]   Simha
/// Dhanu     Vrischika  Tula   Kanya
/// ```
pub const SOUTH_INDIAN_LAYOUT: [Option<u8>; 16] = [
    Some(11),
    Some(0),
    Some(1),
    Some(2),
    Some(10),
    None,
    None,
    Some(3),
    Some(9),
    None,
    None,
    Some(4),
    Some(8),
    Some(7),
    Some(6),
    Some(5),
];

/// Grid side length of the South-Indian layout.
pub const SOUTH_INDIAN_GRID: usize = 4;

/// Top-left (row, column) of the centre label block.
pub const SOUTH_INDIAN_CENTRE: (usize, usize) = (1, 1);

/// Rows and columns spanned by the centre label block.
pub const SOUTH_INDIAN_CENTRE_SPAN: usize = 2;

/// Rashi drawn at `(row, col)` in the South-Indian grid, `None` for the centre.
pub fn south_indian_rashi_at(row: usize, col: usize) -> Option<Rashi> {
    if row >= SOUTH_INDIAN_GRID || col >= SOUTH_INDIAN_GRID {
        return None;
    }
    SOUTH_INDIAN_LAYOUT[row * SOUTH_INDIAN_GRID + col].map(Rashi::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> ChartInputs {
        // Su 10 (Mesha), Mo 45 (Vrishabha), Ma 95 (Karka), Me 15 (Mesha),
        // Ju 200 (Tula), Ve 340 (Meena), Sa 290 (Makara), Ra 100 (Karka),
        // Ke 280 (Makara), asc 5 (Mesha), maandi 166 (Kanya).
        let grahas = GrahaLongitudes::from_sapta_and_rahu(
            [10.0, 45.0, 95.0, 15.0, 200.0, 340.0, 290.0],
            100.0,
        )
        .unwrap();
        ChartInputs::new(grahas, 5.0, 166.0).unwrap()
    }

    #[test]
    fn position_table_order() {
        let rows = position_table(&sample_inputs());
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].point, ChartPoint::Lagna);
        assert_eq!(rows[1].point, ChartPoint::Graha(Graha::Surya));
        assert_eq!(rows[9].point, ChartPoint::Graha(Graha::Ketu));
        assert_eq!(rows[10].point, ChartPoint::Maandi);
    }

    #[test]
    fn position_row_fields() {
        let row = position_row(ChartPoint::Graha(Graha::Chandra), 45.0);
        assert_eq!(row.rashi, Rashi::Vrishabha);
        assert_eq!(row.nakshatra, Nakshatra::Rohini);
        assert_eq!(row.pada, 2);
        assert_eq!(row.longitude_dms, "45° 00' 00.00\"");
        assert_eq!(row.rashi_dms, "15° 00' 00.00\"");
        // 45 = Vrishabha part 4 → (1*9 + 4) % 12 = 1
        assert_eq!(row.navamsa, Rashi::Vrishabha);
    }

    #[test]
    fn rasi_chart_accumulates_in_chart_order() {
        let chart = sign_chart(&sample_inputs(), ChartKind::Rasi);
        assert_eq!(
            chart.occupants(Rashi::Mesha),
            &[
                ChartPoint::Lagna,
                ChartPoint::Graha(Graha::Surya),
                ChartPoint::Graha(Graha::Buddh)
            ]
        );
        assert_eq!(chart.cell_label(Rashi::Mesha), "As Su Me");
        assert_eq!(chart.cell_label(Rashi::Karka), "Ma Ra");
        assert_eq!(chart.cell_label(Rashi::Makara), "Sa Ke");
        assert_eq!(chart.cell_label(Rashi::Kanya), "m");
        assert!(chart.occupants(Rashi::Dhanu).is_empty());
    }

    #[test]
    fn every_point_lands_once() {
        let inputs = sample_inputs();
        for kind in [ChartKind::Rasi, ChartKind::Navamsa] {
            let chart = sign_chart(&inputs, kind);
            let total: usize = chart.cells.iter().map(Vec::len).sum();
            assert_eq!(total, 11, "{kind:?}");
        }
    }

    #[test]
    fn navamsa_chart_uses_d9_sign() {
        let chart = sign_chart(&sample_inputs(), ChartKind::Navamsa);
        // Moon at 45 deg: Vrishabha part 4 → (9 + 4) % 12 = Vrishabha.
        assert!(
            chart
                .occupants(Rashi::Vrishabha)
                .contains(&ChartPoint::Graha(Graha::Chandra))
        );
        // Mars at 95 deg: Karka part 1 → (27 + 1) % 12 = Simha.
        assert!(
            chart
                .occupants(Rashi::Simha)
                .contains(&ChartPoint::Graha(Graha::Mangal))
        );
    }

    #[test]
    fn south_layout_covers_each_sign_once() {
        let mut seen = [0u8; 12];
        for cell in SOUTH_INDIAN_LAYOUT.iter().flatten() {
            seen[*cell as usize] += 1;
        }
        assert_eq!(seen, [1; 12]);
        assert_eq!(SOUTH_INDIAN_LAYOUT.iter().filter(|c| c.is_none()).count(), 4);
    }

    #[test]
    fn south_layout_fixed_corners() {
        assert_eq!(south_indian_rashi_at(0, 0), Some(Rashi::Meena));
        assert_eq!(south_indian_rashi_at(0, 1), Some(Rashi::Mesha));
        assert_eq!(south_indian_rashi_at(3, 3), Some(Rashi::Kanya));
        assert_eq!(south_indian_rashi_at(3, 0), Some(Rashi::Dhanu));
        assert_eq!(south_indian_rashi_at(1, 1), None);
        assert_eq!(south_indian_rashi_at(4, 0), None);
    }

    #[test]
    fn centre_block_is_empty_in_layout() {
        let (r0, c0) = SOUTH_INDIAN_CENTRE;
        for r in r0..r0 + SOUTH_INDIAN_CENTRE_SPAN {
            for c in c0..c0 + SOUTH_INDIAN_CENTRE_SPAN {
                assert_eq!(south_indian_rashi_at(r, c), None);
            }
        }
    }

    #[test]
    fn chart_point_labels() {
        assert_eq!(ChartPoint::Lagna.abbreviation(), "As");
        assert_eq!(ChartPoint::Maandi.abbreviation(), "m");
        assert_eq!(ChartPoint::Graha(Graha::Shani).to_string(), "Saturn");
    }

    #[test]
    fn inputs_reject_nan_ascendant() {
        let grahas = GrahaLongitudes::from_sapta_and_rahu([0.0; 7], 0.0).unwrap();
        assert!(ChartInputs::new(grahas, f64::NAN, 0.0).is_err());
    }
}
