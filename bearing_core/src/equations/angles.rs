//! Trigonometric helpers for angles in degrees.

/// Tangent of an angle in degrees
#[inline]
pub fn tan(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// Cotangent of an angle in degrees
///
/// Infinite at 0°; callers special-case φ ≈ 0 before reaching this.
#[inline]
pub fn cot(deg: f64) -> f64 {
    1.0 / tan(deg)
}

/// Sine of an angle in degrees
#[inline]
pub fn sin(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// Cosine of an angle in degrees
#[inline]
pub fn cos(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Arc tangent of `x`, returned in degrees
#[inline]
pub fn arctan(x: f64) -> f64 {
    x.atan().to_degrees()
}
