//! Terzaghi (1943) bearing capacity.
//!
//! Terzaghi carries the footing shape through the leading coefficients of
//! the cohesion and self-weight terms, so every shape, depth and inclination
//! factor is 1.0. Nγ has no closed form in the original theory; two common
//! approximations are offered through [`TerzaghiVariant`].

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{BearingCapacityMethod, CorrectionFactors, FactorContext};
use crate::cache::FactorKey;
use crate::equations::{cos, cot, is_zero_angle, round_to, tan};
use crate::errors::{BearingError, BearingResult};
use crate::foundation::Shape;

/// Nc at φ = 0 (Terzaghi's 1.5π + 1)
pub const N_C_AT_ZERO: f64 = 5.7;

/// Approximation used for Terzaghi's Nγ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum TerzaghiVariant {
    /// Nγ = (Nq - 1)·tan(1.4φ)
    #[default]
    Meyerhof,
    /// Nγ = 1.8·(Nq - 1)·tan φ
    Hansen,
}

impl TerzaghiVariant {
    pub const ALL: [TerzaghiVariant; 2] = [TerzaghiVariant::Meyerhof, TerzaghiVariant::Hansen];

    pub fn display_name(&self) -> &'static str {
        match self {
            TerzaghiVariant::Meyerhof => "Meyerhof",
            TerzaghiVariant::Hansen => "Hansen",
        }
    }

    /// Parse a variant name, ignoring case.
    ///
    /// # Example
    /// ```
    /// use bearing_core::ultimate::TerzaghiVariant;
    /// assert_eq!(TerzaghiVariant::from_str_flexible("HANSEN").unwrap(), TerzaghiVariant::Hansen);
    /// assert!(TerzaghiVariant::from_str_flexible("vesic").is_err());
    /// ```
    pub fn from_str_flexible(s: &str) -> BearingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "meyerhof" => Ok(TerzaghiVariant::Meyerhof),
            "hansen" => Ok(TerzaghiVariant::Hansen),
            _ => Err(BearingError::invalid_variant(s)),
        }
    }
}

impl std::fmt::Display for TerzaghiVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl TryFrom<String> for TerzaghiVariant {
    type Error = BearingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str_flexible(&s)
    }
}

impl From<TerzaghiVariant> for String {
    fn from(variant: TerzaghiVariant) -> Self {
        variant.display_name().to_lowercase()
    }
}

// ============================================================================
// Factor formulas
// ============================================================================

fn n_q_unrounded(phi: f64) -> f64 {
    ((3.0 * PI / 2.0 - phi.to_radians()) * tan(phi)).exp() / (2.0 * cos(45.0 + phi / 2.0).powi(2))
}

/// # Formulas
/// ```text
/// Nq = e^((3π/2 - φ)·tan φ) / (2·cos²(45° + φ/2))
/// ```
pub fn n_q(phi: f64) -> f64 {
    round_to(n_q_unrounded(phi))
}

/// # Formulas
/// ```text
/// Nc = cot φ·(Nq - 1)    (5.7 at φ = 0)
/// ```
pub fn n_c(phi: f64) -> f64 {
    if is_zero_angle(phi) {
        return N_C_AT_ZERO;
    }
    round_to(cot(phi) * (n_q_unrounded(phi) - 1.0))
}

pub fn n_gamma(phi: f64, variant: TerzaghiVariant) -> f64 {
    let nq = n_q_unrounded(phi);
    match variant {
        TerzaghiVariant::Meyerhof => round_to((nq - 1.0) * tan(1.4 * phi)),
        TerzaghiVariant::Hansen => round_to(1.8 * (nq - 1.0) * tan(phi)),
    }
}

/// Leading constants (coef_c, coef_γ) by declared shape.
///
/// Rectangles interpolate between strip and square with B'/L. Square and
/// circular footings keep their own constants under eccentricity, which only
/// reduces B'.
pub fn leading_coefficients(shape: Shape, width_to_length: f64) -> (f64, f64) {
    match shape {
        Shape::Strip => (1.0, 0.5),
        Shape::Square => (1.3, 0.4),
        Shape::Circle => (1.3, 0.3),
        Shape::Rectangle => (
            1.0 + 0.3 * width_to_length,
            0.5 * (1.0 - 0.2 * width_to_length),
        ),
    }
}

// ============================================================================
// Method
// ============================================================================

/// Terzaghi's method with a chosen Nγ approximation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Terzaghi {
    pub variant: TerzaghiVariant,
}

pub(crate) static MEYERHOF: Terzaghi = Terzaghi {
    variant: TerzaghiVariant::Meyerhof,
};

pub(crate) static HANSEN: Terzaghi = Terzaghi {
    variant: TerzaghiVariant::Hansen,
};

impl Terzaghi {
    pub fn new(variant: TerzaghiVariant) -> Self {
        Self { variant }
    }
}

impl BearingCapacityMethod for Terzaghi {
    fn name(&self) -> &'static str {
        "terzaghi"
    }

    fn factor_key(&self) -> FactorKey {
        FactorKey::Terzaghi(self.variant)
    }

    fn n_c(&self, friction_angle: f64) -> f64 {
        n_c(friction_angle)
    }

    fn n_q(&self, friction_angle: f64) -> f64 {
        n_q(friction_angle)
    }

    fn n_gamma(&self, friction_angle: f64) -> f64 {
        n_gamma(friction_angle, self.variant)
    }

    fn shape_factors(&self, _ctx: &FactorContext) -> CorrectionFactors {
        CorrectionFactors::UNITY
    }

    fn depth_factors(&self, _ctx: &FactorContext) -> CorrectionFactors {
        CorrectionFactors::UNITY
    }

    fn inclination_factors(&self, _ctx: &FactorContext) -> CorrectionFactors {
        CorrectionFactors::UNITY
    }

    fn leading_coefficients(&self, ctx: &FactorContext) -> (f64, f64) {
        leading_coefficients(ctx.declared_shape, ctx.width_to_length())
    }
}
