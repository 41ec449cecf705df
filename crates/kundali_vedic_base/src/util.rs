//! Shared utility functions for vedic calculations.

use crate::error::VedicError;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0.
    if r >= 360.0 { 0.0 } else { r }
}

/// Split a non-negative arc into whole `span`-wide divisions and the remainder.
///
/// The count and the remainder are derived from the same `fmod`, so they
/// always agree: `count * span + remainder` reconstructs `value`, and a value
/// that lands a hair below a boundary in binary arithmetic stays in the
/// earlier division with a remainder just under `span`.
pub fn divide_arc(value: f64, span: f64) -> (u32, f64) {
    let remainder = value.rem_euclid(span);
    let count = ((value - remainder) / span).round();
    (count as u32, remainder)
}

/// Reject NaN and infinite longitudes before they reach index arithmetic.
pub fn require_finite(deg: f64, what: &'static str) -> Result<f64, VedicError> {
    if deg.is_finite() {
        Ok(deg)
    } else {
        Err(VedicError::InvalidInput(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_360() {
        for deg in [-1e-14, -1e-300, -f64::MIN_POSITIVE] {
            let n = normalize_360(deg);
            assert!((0.0..360.0).contains(&n), "{deg} -> {n}");
        }
    }

    #[test]
    fn normalize_large_negative() {
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn divide_arc_exact_boundary_goes_forward() {
        let (count, rem) = divide_arc(30.0, 30.0);
        assert_eq!(count, 1);
        assert_eq!(rem, 0.0);
    }

    #[test]
    fn divide_arc_reconstructs_value() {
        for v in [0.0, 12.5, 45.0, 95.0, 213.75, 359.999] {
            let (count, rem) = divide_arc(v, 360.0 / 27.0);
            let back = count as f64 * (360.0 / 27.0) + rem;
            assert!((back - v).abs() < 1e-9, "{v} -> {back}");
            assert!(rem >= 0.0 && rem < 360.0 / 27.0);
        }
    }

    #[test]
    fn divide_arc_just_below_boundary_stays_in_earlier_division() {
        // 40.0 is a hair below 3 * (360/27) in binary, so fmod sees it as the
        // tail of division 2 rather than the start of division 3.
        let span = 360.0 / 27.0;
        let (count, rem) = divide_arc(40.0, span);
        assert_eq!(count, 2);
        assert!(rem > span - 1e-9);
    }

    #[test]
    fn require_finite_rejects_nan() {
        assert!(require_finite(f64::NAN, "lon").is_err());
        assert!(require_finite(f64::INFINITY, "lon").is_err());
        assert_eq!(require_finite(12.0, "lon"), Ok(12.0));
    }
}
