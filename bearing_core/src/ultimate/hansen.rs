//! Hansen (1970) bearing capacity.
//!
//! Adds explicit shape, depth and inclination factors to the three-term
//! equation. Leading coefficients are 1.0 and 0.5 for every shape.

use std::f64::consts::PI;

use super::{BearingCapacityMethod, CorrectionFactors, FactorContext, MAX_LOAD_ANGLE};
use crate::cache::FactorKey;
use crate::equations::{cot, is_close, is_zero_angle, round_to, sin, tan};
use crate::errors::{BearingError, BearingResult};
use crate::foundation::Shape;

/// Nc at φ = 0 (Prandtl's π + 2)
pub const N_C_AT_ZERO: f64 = 5.14;

/// Friction angle above which Dq takes the value of Dc
const DQ_FRICTION_LIMIT: f64 = 25.0;

pub(crate) fn n_q_unrounded(phi: f64) -> f64 {
    tan(45.0 + phi / 2.0).powi(2) * (PI * tan(phi)).exp()
}

/// # Formulas
/// ```text
/// Nq = tan²(45° + φ/2)·e^(π·tan φ)
/// ```
pub fn n_q(phi: f64) -> f64 {
    round_to(n_q_unrounded(phi))
}

/// # Formulas
/// ```text
/// Nc = cot φ·(Nq - 1)    (5.14 at φ = 0)
/// ```
pub fn n_c(phi: f64) -> f64 {
    if is_zero_angle(phi) {
        return N_C_AT_ZERO;
    }
    round_to(cot(phi) * (n_q_unrounded(phi) - 1.0))
}

/// # Formulas
/// ```text
/// Nγ = 1.8·(Nq - 1)·tan φ
/// ```
pub fn n_gamma(phi: f64) -> f64 {
    round_to(1.8 * (n_q_unrounded(phi) - 1.0) * tan(phi))
}

/// Shape factors (Sc, Sq, Sγ)
///
/// # Formulas
///
/// | Shape     | Sc          | Sq          | Sγ          |
/// |-----------|-------------|-------------|-------------|
/// | Strip     | 1.0         | 1.0         | 1.0         |
/// | Square    | 1.3         | 1.2         | 0.8         |
/// | Circle    | 1.3         | 1.2         | 0.6         |
/// | Rectangle | 1 + 0.2·B/L | 1 + 0.2·B/L | 1 - 0.4·B/L |
pub fn shape_factors(shape: Shape, width_to_length: f64) -> CorrectionFactors {
    match shape {
        Shape::Strip => CorrectionFactors::UNITY,
        Shape::Square => CorrectionFactors::new(1.3, 1.2, 0.8),
        Shape::Circle => CorrectionFactors::new(1.3, 1.2, 0.6),
        Shape::Rectangle => {
            let s = round_to(1.0 + 0.2 * width_to_length);
            CorrectionFactors::new(s, s, round_to(1.0 - 0.4 * width_to_length))
        }
    }
}

/// Depth factors (Dc, Dq, Dγ) for depth term `k`
///
/// # Formulas
/// ```text
/// Dc = 1 + 0.4·k
/// Dq = Dc                          for φ > 25°
/// Dq = 1 + 2·tan φ·(1 - sin φ)²·k  otherwise
/// Dγ = 1
/// ```
pub fn depth_factors(phi: f64, k: f64) -> CorrectionFactors {
    let d_c = round_to(1.0 + 0.4 * k);
    let d_q = if phi > DQ_FRICTION_LIMIT {
        d_c
    } else {
        round_to(1.0 + 2.0 * tan(phi) * (1.0 - sin(phi)).powi(2) * k)
    };
    CorrectionFactors::new(d_c, d_q, 1.0)
}

/// Inclination factors (Ic, Iq, Iγ)
///
/// # Formulas
/// ```text
/// Ic = 1 - sin α / (2·c·B·L)    (1.0 when α or c is zero)
/// Iq = 1 - 1.5·tan α
/// Iγ = Iq²
/// ```
///
/// Iq turns negative once α exceeds arctan(2/3) ≈ 33.7° and diverges at 90°;
/// [`Hansen`] rejects α = 90°.
pub fn inclination_factors(cohesion: f64, load_angle: f64, width: f64, length: f64) -> CorrectionFactors {
    let i_c = if is_zero_angle(load_angle) || is_close(cohesion, 0.0, f64::EPSILON) {
        1.0
    } else {
        round_to(1.0 - sin(load_angle) / (2.0 * cohesion * width * length))
    };
    let i_q = round_to(1.0 - 1.5 * tan(load_angle));
    CorrectionFactors::new(i_c, i_q, round_to(i_q.powi(2)))
}

/// Hansen's method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hansen;

impl BearingCapacityMethod for Hansen {
    fn name(&self) -> &'static str {
        "hansen"
    }

    fn factor_key(&self) -> FactorKey {
        FactorKey::Hansen
    }

    fn n_c(&self, friction_angle: f64) -> f64 {
        n_c(friction_angle)
    }

    fn n_q(&self, friction_angle: f64) -> f64 {
        n_q(friction_angle)
    }

    fn n_gamma(&self, friction_angle: f64) -> f64 {
        n_gamma(friction_angle)
    }

    fn shape_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        shape_factors(ctx.shape, ctx.width_to_length())
    }

    fn depth_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        depth_factors(ctx.friction_angle, ctx.depth_ratio())
    }

    fn inclination_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        inclination_factors(ctx.cohesion, ctx.load_angle, ctx.effective_width, ctx.length)
    }

    /// tan α is unbounded at 90°
    fn check_load_angle(&self, load_angle: f64) -> BearingResult<()> {
        if load_angle >= MAX_LOAD_ANGLE {
            return Err(BearingError::InvalidLoadAngle { angle: load_angle });
        }
        Ok(())
    }
}
