//! Point-in-time lookup over a built dasha tree.
//!
//! Sibling periods are contiguous and sorted, so each level is a binary
//! search. Periods are half-open: an instant exactly on a boundary belongs
//! to the later period.

use super::types::{ActiveDasha, DashaPeriod, DashaSnapshot, VimshottariTree};

/// Index of the period containing `jd`, if any.
pub fn find_active_period(periods: &[DashaPeriod], jd: f64) -> Option<usize> {
    let after = periods.partition_point(|p| p.start_jd <= jd);
    let idx = after.checked_sub(1)?;
    periods[idx].contains(jd).then_some(idx)
}

/// Active period at every materialised level of `tree`.
pub fn snapshot_from_tree(tree: &VimshottariTree, query_jd: f64) -> DashaSnapshot {
    let mut periods = Vec::with_capacity(tree.depth as usize);
    let mut level: &[DashaPeriod] = &tree.periods;
    while let Some(idx) = find_active_period(level, query_jd) {
        periods.push(level[idx].summary());
        level = &level[idx].children;
    }
    DashaSnapshot { query_jd, periods }
}

/// Active (mahadasha, bhukti, antara) lords at `query_jd`. Levels not
/// materialised in `tree`, or outside its span, are `None`.
pub fn active_dasha(tree: &VimshottariTree, query_jd: f64) -> ActiveDasha {
    snapshot_from_tree(tree, query_jd).active()
}
