//! Core types for Vimshottari dasha (planetary period) calculations.

use serde::Serialize;

use crate::graha::Graha;

use super::balance::DashaBalance;

/// Year length for dasha period calculations (Julian year).
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Full Vimshottari cycle length in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Deepest supported level (Prana).
pub const MAX_DASHA_DEPTH: u8 = 5;

/// Default depth for chart output (Mahadasha, Bhukti, Antara).
pub const DEFAULT_DASHA_DEPTH: u8 = 3;

/// The 5 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 1,
    Bhukti = 2,
    Antara = 3,
    Sukshma = 4,
    Prana = 5,
}

impl DashaLevel {
    /// Level at a 1-based depth.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Self::Mahadasha),
            2 => Some(Self::Bhukti),
            3 => Some(Self::Antara),
            4 => Some(Self::Sukshma),
            5 => Some(Self::Prana),
            _ => None,
        }
    }

    /// 1-based depth of this level.
    pub const fn depth(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Bhukti => "Bhukti",
            Self::Antara => "Antara",
            Self::Sukshma => "Sukshma",
            Self::Prana => "Prana",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Bhukti),
            Self::Bhukti => Some(Self::Antara),
            Self::Antara => Some(Self::Sukshma),
            Self::Sukshma => Some(Self::Prana),
            Self::Prana => None,
        }
    }
}

/// A dasha period and its materialised sub-periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaPeriod {
    /// Ruling graha.
    pub lord: Graha,
    pub level: DashaLevel,
    /// JD UTC, inclusive.
    pub start_jd: f64,
    /// JD UTC, exclusive.
    pub end_jd: f64,
    /// Nominal length in years.
    pub years: f64,
    /// Sub-periods in order; empty at the deepest requested level.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Half-open containment: `start_jd <= jd < end_jd`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }

    /// This period without its sub-periods.
    pub fn summary(&self) -> ActivePeriod {
        ActivePeriod {
            lord: self.lord,
            level: self.level,
            start_jd: self.start_jd,
            end_jd: self.end_jd,
            years: self.years,
        }
    }

    /// Number of deepest-level periods under (and including) this one.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(DashaPeriod::leaf_count).sum()
        }
    }
}

/// A single period, detached from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivePeriod {
    pub lord: Graha,
    pub level: DashaLevel,
    pub start_jd: f64,
    pub end_jd: f64,
    pub years: f64,
}

/// Complete Vimshottari tree, built once from birth inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VimshottariTree {
    /// Birth JD UTC.
    pub birth_jd: f64,
    /// Moon's sidereal longitude at birth.
    pub moon_longitude: f64,
    /// Number of materialised levels (1..=5).
    pub depth: u8,
    pub balance: DashaBalance,
    /// The 9 mahadashas with their sub-periods.
    pub periods: Vec<DashaPeriod>,
}

impl VimshottariTree {
    /// Level-1 table: the 9 mahadashas without sub-periods.
    pub fn mahadashas(&self) -> Vec<ActivePeriod> {
        self.periods.iter().map(DashaPeriod::summary).collect()
    }

    /// JD where the tree starts (the birth instant).
    pub fn start_jd(&self) -> f64 {
        self.periods.first().map_or(self.birth_jd, |p| p.start_jd)
    }

    /// JD where the last mahadasha ends (exclusive).
    pub fn end_jd(&self) -> f64 {
        self.periods.last().map_or(self.birth_jd, |p| p.end_jd)
    }

    /// Total years covered by the mahadashas.
    pub fn total_years(&self) -> f64 {
        self.periods.iter().map(|p| p.years).sum()
    }

    /// Number of deepest-level periods.
    pub fn leaf_count(&self) -> usize {
        self.periods.iter().map(DashaPeriod::leaf_count).sum()
    }
}

/// Active periods at a specific instant, one per resolved level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaSnapshot {
    /// The queried JD UTC.
    pub query_jd: f64,
    /// periods[0] = active mahadasha, [1] = active bhukti, etc.
    pub periods: Vec<ActivePeriod>,
}

impl DashaSnapshot {
    /// Active period at `level`, if resolved.
    pub fn at_level(&self, level: DashaLevel) -> Option<&ActivePeriod> {
        self.periods.get(level.depth() as usize - 1)
    }

    /// The (mahadasha, bhukti, antara) lords.
    pub fn active(&self) -> ActiveDasha {
        let lord = |level| self.at_level(level).map(|p| p.lord);
        ActiveDasha {
            mahadasha: lord(DashaLevel::Mahadasha),
            bhukti: lord(DashaLevel::Bhukti),
            antara: lord(DashaLevel::Antara),
        }
    }
}

/// Lords of the active dasha, bhukti and antara. All `None` outside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActiveDasha {
    pub mahadasha: Option<Graha>,
    pub bhukti: Option<Graha>,
    pub antara: Option<Graha>,
}
