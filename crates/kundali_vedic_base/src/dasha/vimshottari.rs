//! Vimshottari engine: 120-year cycle over 9 lords.
//!
//! Two entry points:
//! - [`vimshottari_tree`]: materialise all levels down to a depth.
//! - [`vimshottari_snapshot`]: only the chain of active periods at one
//!   instant, O(depth * 9) instead of O(9^depth).

use crate::error::VedicError;
use crate::graha::Graha;

use super::balance::vimshottari_balance;
use super::query::find_active_period;
use super::subperiod::proportional_children;
use super::types::{
    DAYS_PER_YEAR, DashaLevel, DashaPeriod, DashaSnapshot, MAX_DASHA_DEPTH, VimshottariTree,
};

/// Lord order of the cycle.
pub const VIMSHOTTARI_SEQUENCE: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Full period of each lord in years, parallel to [`VIMSHOTTARI_SEQUENCE`].
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// Position of a graha in [`VIMSHOTTARI_SEQUENCE`].
pub fn sequence_index(graha: Graha) -> usize {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|&g| g == graha)
        .unwrap_or(0)
}

/// Full period of a lord in years.
pub fn full_years(graha: Graha) -> f64 {
    VIMSHOTTARI_YEARS[sequence_index(graha)]
}

fn check_depth(depth: u8) -> Result<(), VedicError> {
    if (1..=MAX_DASHA_DEPTH).contains(&depth) {
        Ok(())
    } else {
        Err(VedicError::InvalidInput("dasha depth must be 1..=5"))
    }
}

fn check_birth_jd(birth_jd: f64) -> Result<(), VedicError> {
    if birth_jd.is_finite() {
        Ok(())
    } else {
        Err(VedicError::InvalidInput("birth JD must be finite"))
    }
}

/// The 9 mahadashas from birth, first one shortened to the birth balance.
///
/// `levels` counts materialised levels including this one.
fn mahadashas(
    birth_jd: f64,
    start_index: usize,
    balance_years: f64,
    levels: u8,
) -> Vec<DashaPeriod> {
    let n = VIMSHOTTARI_SEQUENCE.len();
    let mut periods = Vec::with_capacity(n);
    let mut cursor = birth_jd;

    for offset in 0..n {
        let idx = (start_index + offset) % n;
        let years = if offset == 0 {
            balance_years
        } else {
            VIMSHOTTARI_YEARS[idx]
        };
        let end = cursor + years * DAYS_PER_YEAR;
        let children = if levels > 1 {
            proportional_children(cursor, end, years, idx, DashaLevel::Bhukti, levels - 1)
        } else {
            Vec::new()
        };
        periods.push(DashaPeriod {
            lord: VIMSHOTTARI_SEQUENCE[idx],
            level: DashaLevel::Mahadasha,
            start_jd: cursor,
            end_jd: end,
            years,
            children,
        });
        cursor = end;
    }
    periods
}

/// Build the Vimshottari tree to `depth` levels (1 = mahadashas only,
/// 5 = down to prana).
pub fn vimshottari_tree(
    birth_jd: f64,
    moon_sidereal_lon: f64,
    depth: u8,
) -> Result<VimshottariTree, VedicError> {
    check_depth(depth)?;
    check_birth_jd(birth_jd)?;
    let balance = vimshottari_balance(moon_sidereal_lon)?;
    let periods = mahadashas(
        birth_jd,
        balance.lord_index as usize,
        balance.balance_years,
        depth,
    );
    log::debug!(
        "vimshottari tree: depth {depth}, {} mahadashas from {}",
        periods.len(),
        balance.lord
    );
    Ok(VimshottariTree {
        birth_jd,
        moon_longitude: crate::util::normalize_360(moon_sidereal_lon),
        depth,
        balance,
        periods,
    })
}

/// Active periods at `query_jd` down to `depth` levels, without
/// materialising the tree. Empty when `query_jd` is outside the tree.
pub fn vimshottari_snapshot(
    birth_jd: f64,
    moon_sidereal_lon: f64,
    query_jd: f64,
    depth: u8,
) -> Result<DashaSnapshot, VedicError> {
    check_depth(depth)?;
    check_birth_jd(birth_jd)?;
    let balance = vimshottari_balance(moon_sidereal_lon)?;
    let mut level_periods = mahadashas(
        birth_jd,
        balance.lord_index as usize,
        balance.balance_years,
        1,
    );
    let mut active = Vec::with_capacity(depth as usize);

    for _ in 0..depth {
        let Some(idx) = find_active_period(&level_periods, query_jd) else {
            break;
        };
        let parent = &level_periods[idx];
        active.push(parent.summary());
        let Some(child_level) = parent.level.child_level() else {
            break;
        };
        level_periods = proportional_children(
            parent.start_jd,
            parent.end_jd,
            parent.years,
            sequence_index(parent.lord),
            child_level,
            1,
        );
    }

    Ok(DashaSnapshot {
        query_jd,
        periods: active,
    })
}
