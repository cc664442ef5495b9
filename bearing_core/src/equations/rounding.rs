//! Engine precision and float comparison helpers.
//!
//! Every factor, term and final capacity leaves the engine rounded to
//! [`DECIMAL_PLACES`]. Rounding is half away from zero and never yields `-0.0`.

/// Number of decimal places applied to every reported value
pub const DECIMAL_PLACES: i32 = 2;

/// Absolute tolerance (degrees) under which an angle is treated as zero
pub const ANGLE_TOLERANCE: f64 = 1e-6;

/// Relative tolerance used by [`is_close`]
pub const REL_TOLERANCE: f64 = 1e-9;

/// Round `value` to [`DECIMAL_PLACES`]
///
/// # Example
/// ```
/// use bearing_core::equations::round_to;
/// assert_eq!(round_to(2114.5879), 2114.59);
/// assert_eq!(round_to(-0.001), 0.0);
/// ```
#[inline]
pub fn round_to(value: f64) -> f64 {
    round_dp(value, DECIMAL_PLACES)
}

/// Round `value` to `places` decimal places, half away from zero
#[inline]
pub fn round_dp(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor + 0.0
}

/// Round an SPT blow count to a whole number, ties to even
///
/// `22.5` reports as `22` and `23.5` as `24`.
#[inline]
pub fn round_blows(value: f64) -> f64 {
    value.round_ties_even() + 0.0
}

/// Float comparison with both a relative and an absolute tolerance
#[inline]
pub fn is_close(a: f64, b: f64, abs_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= abs_tol || diff <= REL_TOLERANCE * a.abs().max(b.abs())
}

/// Whether an angle in degrees is zero within [`ANGLE_TOLERANCE`]
#[inline]
pub fn is_zero_angle(deg: f64) -> bool {
    is_close(deg, 0.0, ANGLE_TOLERANCE)
}
