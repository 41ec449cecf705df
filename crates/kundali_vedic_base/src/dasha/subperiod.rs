//! Proportional sub-period generation.
//!
//! A parent of `P` years ruled by sequence index `k` is split into 9
//! children ruled by `k, k+1, .., k+8 (mod 9)`, each lasting
//! `P * years(child) / 120`. Each level re-anchors at its own parent's
//! lord; the anchor is passed explicitly down the recursion.

use super::types::{DashaLevel, DashaPeriod, VIMSHOTTARI_TOTAL_YEARS};
use super::vimshottari::{VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_YEARS};

/// Snap the last child's end_jd to the parent's end_jd to absorb floating-point drift.
pub fn snap_last_child_end(children: &mut [DashaPeriod], parent_end_jd: f64) {
    if let Some(last) = children.last_mut() {
        last.end_jd = parent_end_jd;
    }
}

/// The 9 children of a parent spanning `[start_jd, end_jd)`.
///
/// `anchor` is the parent's index in [`VIMSHOTTARI_SEQUENCE`].
/// `levels` counts the levels to materialise starting at `level`: 1 builds
/// only these 9 children, 2 also builds their children, and so on.
pub fn proportional_children(
    start_jd: f64,
    end_jd: f64,
    parent_years: f64,
    anchor: usize,
    level: DashaLevel,
    levels: u8,
) -> Vec<DashaPeriod> {
    let n = VIMSHOTTARI_SEQUENCE.len();
    let parent_days = end_jd - start_jd;
    let mut children = Vec::with_capacity(n);
    let mut cursor = start_jd;

    for offset in 0..n {
        let idx = (anchor + offset) % n;
        let share = VIMSHOTTARI_YEARS[idx] / VIMSHOTTARI_TOTAL_YEARS;
        let end = cursor + parent_days * share;
        children.push(DashaPeriod {
            lord: VIMSHOTTARI_SEQUENCE[idx],
            level,
            start_jd: cursor,
            end_jd: end,
            years: parent_years * share,
            children: Vec::new(),
        });
        cursor = end;
    }
    snap_last_child_end(&mut children, end_jd);

    if levels > 1 {
        if let Some(next) = level.child_level() {
            for (offset, child) in children.iter_mut().enumerate() {
                child.children = proportional_children(
                    child.start_jd,
                    child.end_jd,
                    child.years,
                    (anchor + offset) % n,
                    next,
                    levels - 1,
                );
            }
        }
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::Graha;
    use crate::dasha::types::DAYS_PER_YEAR;

    #[test]
    fn children_start_at_parent_lord() {
        // Venus mahadasha (index 1).
        let years = 20.0;
        let children = proportional_children(0.0, years * DAYS_PER_YEAR, years, 1, DashaLevel::Bhukti, 1);
        let lords: Vec<Graha> = children.iter().map(|c| c.lord).collect();
        assert_eq!(
            lords,
            [
                Graha::Shukra,
                Graha::Surya,
                Graha::Chandra,
                Graha::Mangal,
                Graha::Rahu,
                Graha::Guru,
                Graha::Shani,
                Graha::Buddh,
                Graha::Ketu,
            ]
        );
        // Venus/Venus bhukti: 20 * 20 / 120 = 3.333.. years.
        assert!((children[0].years - 20.0 * 20.0 / 120.0).abs() < 1e-12);
    }

    #[test]
    fn children_are_contiguous_and_sum_to_parent() {
        let start = 2_451_545.0;
        let end = start + 18.0 * DAYS_PER_YEAR;
        let children = proportional_children(start, end, 18.0, 5, DashaLevel::Bhukti, 1);
        assert_eq!(children.len(), 9);
        assert_eq!(children[0].start_jd, start);
        assert_eq!(children[8].end_jd, end);
        for w in children.windows(2) {
            assert_eq!(w[0].end_jd, w[1].start_jd);
        }
        let years: f64 = children.iter().map(|c| c.years).sum();
        assert!((years - 18.0).abs() < 1e-9);
    }

    #[test]
    fn each_level_anchors_to_its_own_parent() {
        // Ketu mahadasha (index 0); its Sun bhukti (index 2) must start its
        // antaras from the Sun, not from Ketu.
        let years = 7.0;
        let bhuktis = proportional_children(0.0, years * DAYS_PER_YEAR, years, 0, DashaLevel::Bhukti, 2);
        let sun = &bhuktis[2];
        assert_eq!(sun.lord, Graha::Surya);
        assert_eq!(sun.children[0].lord, Graha::Surya);
        assert_eq!(sun.children[1].lord, Graha::Chandra);
        assert_eq!(sun.children[8].lord, Graha::Shukra);
        assert_eq!(sun.children[0].level, DashaLevel::Antara);
    }

    #[test]
    fn levels_limit_recursion() {
        let bhuktis = proportional_children(0.0, 100.0, 1.0, 0, DashaLevel::Bhukti, 1);
        assert!(bhuktis.iter().all(|b| b.children.is_empty()));
    }

    #[test]
    fn prana_never_recurses() {
        let pranas = proportional_children(0.0, 100.0, 1.0, 0, DashaLevel::Prana, 3);
        assert!(pranas.iter().all(|p| p.children.is_empty()));
    }
}
