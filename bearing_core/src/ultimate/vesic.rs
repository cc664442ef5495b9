//! Vesic (1973) bearing capacity.
//!
//! Shares Nc and Nq with Hansen. Nγ, the shape factors and the inclination
//! factors follow Vesic's own expressions.

use super::hansen;
use super::{BearingCapacityMethod, CorrectionFactors, FactorContext};
use crate::cache::FactorKey;
use crate::equations::{is_zero_angle, round_to, sin, tan};
use crate::foundation::Shape;

/// # Formulas
/// ```text
/// Nγ = 2·(Nq + 1)·tan φ
/// ```
pub fn n_gamma(phi: f64) -> f64 {
    round_to(2.0 * (hansen::n_q_unrounded(phi) + 1.0) * tan(phi))
}

/// Shape factors (Sc, Sq, Sγ); `nq_over_nc` is the ratio of the rounded factors
///
/// # Formulas
///
/// | Shape           | Sc              | Sq              | Sγ          |
/// |-----------------|-----------------|-----------------|-------------|
/// | Strip           | 1.0             | 1.0             | 1.0         |
/// | Square / Circle | 1 + Nq/Nc       | 1 + tan φ       | 0.6         |
/// | Rectangle       | 1 + (B/L)·Nq/Nc | 1 + (B/L)·tan φ | 1 - 0.4·B/L |
pub fn shape_factors(shape: Shape, phi: f64, width_to_length: f64, nq_over_nc: f64) -> CorrectionFactors {
    match shape {
        Shape::Strip => CorrectionFactors::UNITY,
        Shape::Square | Shape::Circle => {
            CorrectionFactors::new(round_to(1.0 + nq_over_nc), round_to(1.0 + tan(phi)), 0.6)
        }
        Shape::Rectangle => CorrectionFactors::new(
            round_to(1.0 + width_to_length * nq_over_nc),
            round_to(1.0 + width_to_length * tan(phi)),
            round_to(1.0 - 0.4 * width_to_length),
        ),
    }
}

/// Depth factors (Dc, Dq, Dγ) for depth term `k`
///
/// # Formulas
/// ```text
/// Dc = 1 + 0.4·k
/// Dq = 1 + 2·tan φ·(1 - sin φ)²·k
/// Dγ = 1
/// ```
pub fn depth_factors(phi: f64, k: f64) -> CorrectionFactors {
    CorrectionFactors::new(
        round_to(1.0 + 0.4 * k),
        round_to(1.0 + 2.0 * tan(phi) * (1.0 - sin(phi)).powi(2) * k),
        1.0,
    )
}

/// Inclination factors (Ic, Iq, Iγ)
///
/// # Formulas
/// ```text
/// Ic = Iq = (1 - α/90)²
/// Iγ = (1 - α/φ)²        (1.0 when φ is zero)
/// ```
pub fn inclination_factors(phi: f64, load_angle: f64) -> CorrectionFactors {
    let i_cq = round_to((1.0 - load_angle / 90.0).powi(2));
    let i_gamma = if is_zero_angle(phi) {
        1.0
    } else {
        round_to((1.0 - load_angle / phi).powi(2))
    };
    CorrectionFactors::new(i_cq, i_cq, i_gamma)
}

/// Vesic's method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vesic;

impl BearingCapacityMethod for Vesic {
    fn name(&self) -> &'static str {
        "vesic"
    }

    fn factor_key(&self) -> FactorKey {
        FactorKey::Vesic
    }

    fn n_c(&self, friction_angle: f64) -> f64 {
        hansen::n_c(friction_angle)
    }

    fn n_q(&self, friction_angle: f64) -> f64 {
        hansen::n_q(friction_angle)
    }

    fn n_gamma(&self, friction_angle: f64) -> f64 {
        n_gamma(friction_angle)
    }

    fn shape_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        let phi = ctx.friction_angle;
        let nq_over_nc = self.n_q(phi) / self.n_c(phi);
        shape_factors(ctx.shape, phi, ctx.width_to_length(), nq_over_nc)
    }

    fn depth_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        depth_factors(ctx.friction_angle, ctx.depth_ratio())
    }

    fn inclination_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        inclination_factors(ctx.friction_angle, ctx.load_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::create_foundation;
    use crate::soil::SoilProperties;
    use crate::ultimate::{AnalysisOptions, UltimateBearingCapacity};

    const EPSILON: f64 = 0.011;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_n_gamma_table() {
        assert_eq!(n_gamma(0.0), 0.0);
        for (phi, expected) in [(10.0, 1.22), (20.0, 5.39), (35.0, 48.03), (45.0, 271.75)] {
            let ng = n_gamma(phi);
            assert!(approx_eq(ng, expected), "Nγ({}) = {} (expected {})", phi, ng, expected);
        }
    }

    #[test]
    fn test_shares_nc_nq_with_hansen() {
        for phi in [0.0, 15.0, 30.0] {
            assert_eq!(Vesic.n_c(phi), hansen::n_c(phi));
            assert_eq!(Vesic.n_q(phi), hansen::n_q(phi));
        }
    }

    #[test]
    fn test_inclination_factors() {
        let i = inclination_factors(30.0, 10.0);
        assert_eq!(i.c, 0.79);
        assert_eq!(i.q, 0.79);
        assert_eq!(i.gamma, 0.44);
        // Undrained soil: Iγ is not defined, taken as 1.0
        assert_eq!(inclination_factors(0.0, 10.0).gamma, 1.0);
    }

    #[test]
    fn test_eccentric_square_on_clay() {
        let soil = SoilProperties::new(0.0, 100.0, 21.0).unwrap();
        let fs = create_foundation(1.0, 1.5, None, Some(0.2), "square").unwrap();
        let ubc = UltimateBearingCapacity::new(soil, fs, Vesic).unwrap();
        assert_eq!(ubc.s_c(), 1.14);
        assert_eq!(ubc.s_gamma(), 0.71);
        assert_eq!(ubc.d_c(), 1.27);
        let q = ubc.bearing_capacity();
        assert!(approx_eq(q, 765.17), "q_ult = {} (expected 765.17)", q);
    }

    #[test]
    fn test_inclined_circle() {
        let soil = SoilProperties::new(30.0, 5.0, 18.0).unwrap();
        let fs = create_foundation(1.0, 2.0, None, None, "circle").unwrap();
        let options = AnalysisOptions::default().with_load_angle(10.0);
        let ubc = UltimateBearingCapacity::with_options(soil, fs, Vesic, options).unwrap();
        assert_eq!(ubc.s_gamma(), 0.6);
        let q = ubc.bearing_capacity();
        assert!(approx_eq(q, 807.73), "q_ult = {} (expected 807.73)", q);
    }

    #[test]
    fn test_strip_with_deep_water_table() {
        let soil = SoilProperties::new(25.0, 10.0, 19.0).unwrap();
        let fs = create_foundation(3.0, 2.0, None, None, "strip").unwrap();
        let options = AnalysisOptions::default().with_water_level(3.5);
        let ubc = UltimateBearingCapacity::with_options(soil, fs, Vesic, options).unwrap();
        assert_eq!(ubc.water_corrections().embedment, 0.625);
        let q = ubc.bearing_capacity();
        assert!(approx_eq(q, 1213.19), "q_ult = {} (expected 1213.19)", q);
    }
}
