//! Depth ratio and water table corrections.
//!
//! Water level is a depth below the ground surface. `None` means no water
//! table within the zone of influence, and both corrections are then exactly
//! 1.0. Both corrections are capped at 1.0.

/// Depth-to-width term used by the depth factors
///
/// # Formulas
/// ```text
/// k = D/B           for D/B ≤ 1
/// k = arctan(D/B)   for D/B > 1   (radians)
/// ```
///
/// The arctan branch is in radians. Tools that take it in degrees report much
/// larger depth factors for deep footings.
///
/// # Example
/// ```
/// use bearing_core::equations::depth_ratio;
/// assert_eq!(depth_ratio(1.5, 2.0), 0.75);
/// assert_eq!(depth_ratio(2.0, 2.0), 1.0);
/// assert!((depth_ratio(3.0, 2.0) - 1.5f64.atan()).abs() < 1e-12);
/// ```
#[inline]
pub fn depth_ratio(depth: f64, width: f64) -> f64 {
    let ratio = depth / width;
    if ratio <= 1.0 {
        ratio
    } else {
        ratio.atan()
    }
}

/// Water correction applied to the surcharge (Nq) term
///
/// # Formulas
/// ```text
/// a   = max(D - Dw, 0)
/// swc = min(1 - 0.5·a/D, 1)
/// ```
///
/// A water table at or above the base halves the effective overburden at the
/// ground surface, linearly decreasing to no reduction at the footing base.
#[inline]
pub fn surcharge_water_correction(depth: f64, water_level: Option<f64>) -> f64 {
    match water_level {
        None => 1.0,
        Some(wl) => {
            let a = (depth - wl).max(0.0);
            (1.0 - 0.5 * a / depth).min(1.0)
        }
    }
}

/// Water correction applied to the embedment (Nγ) term
///
/// # Formulas
/// ```text
/// b   = max(Dw - D, 0)
/// ewc = min(0.5 + 0.5·b/B, 1)
/// ```
///
/// where B is the effective footing width. Full correction (0.5) when the
/// water table is at or above the base, none once it sits B below it.
#[inline]
pub fn embedment_water_correction(depth: f64, width: f64, water_level: Option<f64>) -> f64 {
    match water_level {
        None => 1.0,
        Some(wl) => {
            let b = (wl - depth).max(0.0);
            (0.5 + 0.5 * b / width).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_depth_ratio_boundary_uses_raw_ratio() {
        assert_eq!(depth_ratio(2.0, 2.0), 1.0);
        // Just past the boundary the arctan branch takes over
        let k = depth_ratio(2.2, 2.0);
        assert!((k - 1.1f64.atan()).abs() < EPSILON, "k = {}", k);
        assert!(k < 1.0);
    }

    #[test]
    fn test_deep_footing_ratio_is_in_radians() {
        let k = depth_ratio(10.0, 1.0);
        assert!((k - 1.4711276743).abs() < 1e-9, "k = {}", k);
        assert!(k < std::f64::consts::FRAC_PI_2);
        assert!(depth_ratio(1000.0, 1.0) < std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_no_water_table() {
        assert_eq!(surcharge_water_correction(1.5, None), 1.0);
        assert_eq!(embedment_water_correction(1.5, 2.0, None), 1.0);
    }

    #[test]
    fn test_water_above_base() {
        let swc = surcharge_water_correction(1.5, Some(0.4));
        assert!((swc - 0.633_333_333).abs() < 1e-6, "swc = {}", swc);
        assert_eq!(embedment_water_correction(1.5, 2.0, Some(0.4)), 0.5);
    }

    #[test]
    fn test_water_at_surface_halves_surcharge() {
        assert_eq!(surcharge_water_correction(1.5, Some(0.0)), 0.5);
    }

    #[test]
    fn test_water_below_base() {
        assert_eq!(surcharge_water_correction(1.5, Some(2.5)), 1.0);
        assert_eq!(embedment_water_correction(1.5, 2.0, Some(2.5)), 0.75);
        // Deep water table is capped at no correction
        assert_eq!(embedment_water_correction(1.5, 2.0, Some(10.0)), 1.0);
        assert_eq!(embedment_water_correction(1.5, 2.0, Some(f64::INFINITY)), 1.0);
    }

    #[test]
    fn test_corrections_never_exceed_one() {
        for wl in [0.0, 0.5, 1.0, 1.5, 2.0, 3.0, 5.0, 100.0] {
            assert!(surcharge_water_correction(1.5, Some(wl)) <= 1.0);
            assert!(embedment_water_correction(1.5, 2.0, Some(wl)) <= 1.0);
        }
    }
}
