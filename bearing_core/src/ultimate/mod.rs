//! # Ultimate Bearing Capacity
//!
//! Three-term superposition of cohesion, surcharge and self-weight
//! contributions, each scaled by bearing capacity factors and shape, depth
//! and inclination corrections:
//!
//! ```text
//! q_ult = coef_c·c·Nc·Sc·Dc·Ic
//!       + γ·D·Nq·Sq·Dq·Iq·w_q
//!       + coef_γ·γ·B'·Nγ·Sγ·Dγ·Iγ·w_γ
//! ```
//!
//! Each method (Terzaghi, Hansen, Vesic) implements [`BearingCapacityMethod`];
//! [`UltimateBearingCapacity`] is the single aggregator generic over it.
//! Factors are recomputed on every accessor call and never stored.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::foundation::create_foundation;
//! use bearing_core::soil::SoilProperties;
//! use bearing_core::ultimate::{hansen::Hansen, UltimateBearingCapacity};
//!
//! let soil = SoilProperties::new(20.0, 20.0, 18.0).unwrap();
//! let fs = create_foundation(1.5, 2.0, None, None, "square").unwrap();
//! let ubc = UltimateBearingCapacity::new(soil, fs, Hansen).unwrap();
//! assert!((ubc.bearing_capacity() - 809.36).abs() < 0.05);
//! ```

pub mod hansen;
pub mod terzaghi;
pub mod vesic;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cache::{FactorCache, FactorKey};
use crate::equations::{
    depth_ratio, embedment_water_correction, round_to, surcharge_water_correction,
};
use crate::errors::{BearingError, BearingResult};
use crate::foundation::{FoundationSize, Shape};
use crate::soil::SoilProperties;

pub use hansen::Hansen;
pub use terzaghi::{Terzaghi, TerzaghiVariant};
pub use vesic::Vesic;

/// Maximum load inclination from the vertical (degrees)
pub const MAX_LOAD_ANGLE: f64 = 90.0;

// ============================================================================
// Factor records
// ============================================================================

/// Bearing capacity factors Nc, Nq, Nγ for one friction angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingCapacityFactors {
    pub n_c: f64,
    pub n_q: f64,
    pub n_gamma: f64,
}

/// One set of correction factors (shape, depth or inclination) for the
/// cohesion, surcharge and self-weight terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactors {
    pub c: f64,
    pub q: f64,
    pub gamma: f64,
}

impl CorrectionFactors {
    /// No correction on any term
    pub const UNITY: CorrectionFactors = CorrectionFactors {
        c: 1.0,
        q: 1.0,
        gamma: 1.0,
    };

    pub fn new(c: f64, q: f64, gamma: f64) -> Self {
        Self { c, q, gamma }
    }
}

/// Water table corrections for the surcharge and self-weight terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterCorrections {
    pub surcharge: f64,
    pub embedment: f64,
}

/// Every intermediate value of one analysis, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityFactors {
    pub bearing: BearingCapacityFactors,
    pub shape: CorrectionFactors,
    pub depth: CorrectionFactors,
    pub inclination: CorrectionFactors,
    pub water: WaterCorrections,
    pub cohesion_term: f64,
    pub surcharge_term: f64,
    pub embedment_term: f64,
}

impl CapacityFactors {
    /// Rounded sum of the three terms (kPa)
    pub fn total(&self) -> f64 {
        round_to(self.cohesion_term + self.surcharge_term + self.embedment_term)
    }
}

/// Inputs every factor function may draw on.
///
/// `friction_angle` and `cohesion` already reflect the local shear view when
/// it is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorContext {
    pub friction_angle: f64,
    pub cohesion: f64,
    /// Effective shape (eccentric squares become rectangles)
    pub shape: Shape,
    /// Shape of the footing as declared, before eccentricity
    pub declared_shape: Shape,
    /// Nominal width B
    pub width: f64,
    /// Effective width B' = B - 2e
    pub effective_width: f64,
    /// Length L; infinite for strips
    pub length: f64,
    pub depth: f64,
    /// Load inclination from the vertical (degrees)
    pub load_angle: f64,
}

impl FactorContext {
    /// B'/L; zero for strips
    pub fn width_to_length(&self) -> f64 {
        self.effective_width / self.length
    }

    /// Depth term k of the depth factors, on the nominal width
    pub fn depth_ratio(&self) -> f64 {
        depth_ratio(self.depth, self.width)
    }
}

// ============================================================================
// Method trait
// ============================================================================

/// A bearing capacity formulation.
///
/// Factor values are rounded to the engine precision by the implementation.
pub trait BearingCapacityMethod {
    /// Short method name for logs and reports
    fn name(&self) -> &'static str;

    /// Key identifying this formulation's Nc/Nq/Nγ in a [`FactorCache`]
    fn factor_key(&self) -> FactorKey;

    fn n_c(&self, friction_angle: f64) -> f64;

    fn n_q(&self, friction_angle: f64) -> f64;

    fn n_gamma(&self, friction_angle: f64) -> f64;

    fn bearing_capacity_factors(&self, friction_angle: f64) -> BearingCapacityFactors {
        BearingCapacityFactors {
            n_c: self.n_c(friction_angle),
            n_q: self.n_q(friction_angle),
            n_gamma: self.n_gamma(friction_angle),
        }
    }

    fn shape_factors(&self, ctx: &FactorContext) -> CorrectionFactors;

    fn depth_factors(&self, ctx: &FactorContext) -> CorrectionFactors;

    fn inclination_factors(&self, ctx: &FactorContext) -> CorrectionFactors;

    /// Leading constants (coef_c, coef_γ) of the cohesion and self-weight terms
    fn leading_coefficients(&self, _ctx: &FactorContext) -> (f64, f64) {
        (1.0, 0.5)
    }

    /// Method-specific limits on the load angle, checked after the general
    /// 0..=90° range.
    fn check_load_angle(&self, _load_angle: f64) -> BearingResult<()> {
        Ok(())
    }
}

// ============================================================================
// Runtime method selection
// ============================================================================

/// Method chosen at runtime (JSON requests, CLI).
///
/// ## JSON Example
///
/// ```json
/// { "name": "terzaghi", "variant": "hansen" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Method {
    Terzaghi {
        #[serde(default)]
        variant: TerzaghiVariant,
    },
    #[default]
    Hansen,
    Vesic,
}

impl Method {
    /// Parse a method name, ignoring case. Terzaghi uses the default Nγ variant.
    pub fn from_str_flexible(s: &str) -> BearingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "terzaghi" => Ok(Method::Terzaghi {
                variant: TerzaghiVariant::default(),
            }),
            "hansen" => Ok(Method::Hansen),
            "vesic" => Ok(Method::Vesic),
            _ => Err(BearingError::invalid_variant(s)),
        }
    }

    fn inner(&self) -> &dyn BearingCapacityMethod {
        match self {
            Method::Terzaghi { variant } => match variant {
                TerzaghiVariant::Meyerhof => &terzaghi::MEYERHOF,
                TerzaghiVariant::Hansen => &terzaghi::HANSEN,
            },
            Method::Hansen => &Hansen,
            Method::Vesic => &Vesic,
        }
    }
}

impl BearingCapacityMethod for Method {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn factor_key(&self) -> FactorKey {
        self.inner().factor_key()
    }

    fn n_c(&self, friction_angle: f64) -> f64 {
        self.inner().n_c(friction_angle)
    }

    fn n_q(&self, friction_angle: f64) -> f64 {
        self.inner().n_q(friction_angle)
    }

    fn n_gamma(&self, friction_angle: f64) -> f64 {
        self.inner().n_gamma(friction_angle)
    }

    fn shape_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        self.inner().shape_factors(ctx)
    }

    fn depth_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        self.inner().depth_factors(ctx)
    }

    fn inclination_factors(&self, ctx: &FactorContext) -> CorrectionFactors {
        self.inner().inclination_factors(ctx)
    }

    fn leading_coefficients(&self, ctx: &FactorContext) -> (f64, f64) {
        self.inner().leading_coefficients(ctx)
    }

    fn check_load_angle(&self, load_angle: f64) -> BearingResult<()> {
        self.inner().check_load_angle(load_angle)
    }
}

// ============================================================================
// Analysis options
// ============================================================================

/// Site and loading conditions of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Depth of the water table below ground surface (m); `None` if absent
    pub water_level: Option<f64>,
    /// Load inclination from the vertical (degrees)
    pub load_angle: f64,
    /// Use reduced strength parameters for local shear failure
    pub apply_local_shear: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            water_level: None,
            load_angle: 0.0,
            apply_local_shear: false,
        }
    }
}

impl AnalysisOptions {
    pub fn with_water_level(mut self, water_level: f64) -> Self {
        self.water_level = Some(water_level);
        self
    }

    pub fn with_load_angle(mut self, load_angle: f64) -> Self {
        self.load_angle = load_angle;
        self
    }

    pub fn with_local_shear(mut self, apply: bool) -> Self {
        self.apply_local_shear = apply;
        self
    }

    pub fn validate(&self) -> BearingResult<()> {
        if !self.load_angle.is_finite() || !(0.0..=MAX_LOAD_ANGLE).contains(&self.load_angle) {
            return Err(BearingError::InvalidLoadAngle {
                angle: self.load_angle,
            });
        }
        if let Some(wl) = self.water_level {
            if wl.is_nan() || wl < 0.0 {
                return Err(BearingError::invalid_input(
                    "water_level",
                    wl.to_string(),
                    "Water level is a depth below ground surface and cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Ultimate bearing capacity of a shallow foundation for one method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UltimateBearingCapacity<M> {
    soil: SoilProperties,
    foundation: FoundationSize,
    method: M,
    options: AnalysisOptions,
}

impl<M: BearingCapacityMethod> UltimateBearingCapacity<M> {
    /// Analysis with no water table, vertical load and general shear failure.
    pub fn new(soil: SoilProperties, foundation: FoundationSize, method: M) -> BearingResult<Self> {
        Self::with_options(soil, foundation, method, AnalysisOptions::default())
    }

    /// # Errors
    /// - `InvalidLoadAngle` if the load angle is outside 0..=90°, or outside
    ///   the method's own range
    /// - `InvalidInput` for a negative water level
    /// - `InvalidGeometry` if the eccentricity leaves no effective width
    pub fn with_options(
        soil: SoilProperties,
        foundation: FoundationSize,
        method: M,
        options: AnalysisOptions,
    ) -> BearingResult<Self> {
        options.validate()?;
        method.check_load_angle(options.load_angle)?;
        if !foundation.is_effective_width_positive() {
            return Err(BearingError::invalid_geometry(
                "effective_width",
                foundation.effective_width(),
                "Eccentricity leaves no effective width (B - 2e must be positive)",
            ));
        }
        Ok(Self {
            soil,
            foundation,
            method,
            options,
        })
    }

    pub fn soil(&self) -> &SoilProperties {
        &self.soil
    }

    pub fn foundation(&self) -> &FoundationSize {
        &self.foundation
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Factor inputs for this analysis
    pub fn context(&self) -> FactorContext {
        let strength = self.soil.shear_strength(self.options.apply_local_shear);
        FactorContext {
            friction_angle: strength.friction_angle,
            cohesion: strength.cohesion,
            shape: self.foundation.effective_shape(),
            declared_shape: self.foundation.shape(),
            width: self.foundation.width(),
            effective_width: self.foundation.effective_width(),
            length: self.foundation.length(),
            depth: self.foundation.depth(),
            load_angle: self.options.load_angle,
        }
    }

    pub fn n_c(&self) -> f64 {
        self.method.n_c(self.context().friction_angle)
    }

    pub fn n_q(&self) -> f64 {
        self.method.n_q(self.context().friction_angle)
    }

    pub fn n_gamma(&self) -> f64 {
        self.method.n_gamma(self.context().friction_angle)
    }

    pub fn s_c(&self) -> f64 {
        self.method.shape_factors(&self.context()).c
    }

    pub fn s_q(&self) -> f64 {
        self.method.shape_factors(&self.context()).q
    }

    pub fn s_gamma(&self) -> f64 {
        self.method.shape_factors(&self.context()).gamma
    }

    pub fn d_c(&self) -> f64 {
        self.method.depth_factors(&self.context()).c
    }

    pub fn d_q(&self) -> f64 {
        self.method.depth_factors(&self.context()).q
    }

    pub fn d_gamma(&self) -> f64 {
        self.method.depth_factors(&self.context()).gamma
    }

    pub fn i_c(&self) -> f64 {
        self.method.inclination_factors(&self.context()).c
    }

    pub fn i_q(&self) -> f64 {
        self.method.inclination_factors(&self.context()).q
    }

    pub fn i_gamma(&self) -> f64 {
        self.method.inclination_factors(&self.context()).gamma
    }

    /// Water table corrections; both exactly 1.0 without a water table
    pub fn water_corrections(&self) -> WaterCorrections {
        let depth = self.foundation.depth();
        let water_level = self.options.water_level;
        WaterCorrections {
            surcharge: surcharge_water_correction(depth, water_level),
            embedment: embedment_water_correction(depth, self.foundation.effective_width(), water_level),
        }
    }

    pub fn cohesion_term(&self) -> f64 {
        self.factors().cohesion_term
    }

    pub fn surcharge_term(&self) -> f64 {
        self.factors().surcharge_term
    }

    pub fn embedment_term(&self) -> f64 {
        self.factors().embedment_term
    }

    /// Every factor and term of the analysis
    pub fn factors(&self) -> CapacityFactors {
        let bearing = self.method.bearing_capacity_factors(self.context().friction_angle);
        self.combine(bearing)
    }

    /// Ultimate bearing capacity q_ult (kPa)
    pub fn bearing_capacity(&self) -> f64 {
        let q_ult = self.factors().total();
        debug!(
            "event=ultimate_capacity method={} shape={} q_ult={}",
            self.method.name(),
            self.foundation.effective_shape().code(),
            q_ult
        );
        q_ult
    }

    /// Same as [`Self::bearing_capacity`], reading Nc/Nq/Nγ through `cache`.
    pub fn bearing_capacity_with_cache(&self, cache: &FactorCache) -> f64 {
        let bearing = cache.get_or_compute(&self.method, self.context().friction_angle);
        self.combine(bearing).total()
    }

    fn combine(&self, bearing: BearingCapacityFactors) -> CapacityFactors {
        let ctx = self.context();
        let shape = self.method.shape_factors(&ctx);
        let depth = self.method.depth_factors(&ctx);
        let inclination = self.method.inclination_factors(&ctx);
        let (coef_c, coef_gamma) = self.method.leading_coefficients(&ctx);
        let water = self.water_corrections();
        let gamma = self.soil.moist_unit_weight();

        let cohesion_term =
            round_to(coef_c * ctx.cohesion * bearing.n_c * shape.c * depth.c * inclination.c);
        let surcharge_term = round_to(
            gamma * ctx.depth * bearing.n_q * shape.q * depth.q * inclination.q * water.surcharge,
        );
        let embedment_term = round_to(
            coef_gamma
                * gamma
                * ctx.effective_width
                * bearing.n_gamma
                * shape.gamma
                * depth.gamma
                * inclination.gamma
                * water.embedment,
        );

        CapacityFactors {
            bearing,
            shape,
            depth,
            inclination,
            water,
            cohesion_term,
            surcharge_term,
            embedment_term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::create_foundation;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn test_soil() -> SoilProperties {
        SoilProperties::new(20.0, 20.0, 18.0).unwrap()
    }

    fn square_footing() -> FoundationSize {
        create_foundation(1.5, 2.0, None, None, "square").unwrap()
    }

    #[test]
    fn test_load_angle_validation() {
        for angle in [-1.0, 90.5, f64::NAN, f64::INFINITY] {
            let options = AnalysisOptions::default().with_load_angle(angle);
            let err = UltimateBearingCapacity::with_options(test_soil(), square_footing(), Hansen, options)
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_LOAD_ANGLE");
        }
        let edge = AnalysisOptions::default().with_load_angle(90.0);
        assert!(UltimateBearingCapacity::with_options(test_soil(), square_footing(), Vesic, edge).is_ok());
    }

    #[test]
    fn test_negative_water_level_rejected() {
        let options = AnalysisOptions::default().with_water_level(-0.5);
        let err = UltimateBearingCapacity::with_options(test_soil(), square_footing(), Vesic, options).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_no_effective_width_rejected() {
        let fs = create_foundation(1.0, 1.0, None, Some(0.5), "square").unwrap();
        let err = UltimateBearingCapacity::new(test_soil(), fs, Hansen).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_water_corrections_without_water_table() {
        let ubc = UltimateBearingCapacity::new(test_soil(), square_footing(), Hansen).unwrap();
        let water = ubc.water_corrections();
        assert_eq!(water.surcharge, 1.0);
        assert_eq!(water.embedment, 1.0);
    }

    #[test]
    fn test_infinite_water_level_means_no_water_table() {
        let options = AnalysisOptions::default().with_water_level(f64::INFINITY);
        let wet = UltimateBearingCapacity::with_options(test_soil(), square_footing(), Hansen, options).unwrap();
        let dry = UltimateBearingCapacity::new(test_soil(), square_footing(), Hansen).unwrap();
        assert_eq!(wet.bearing_capacity(), dry.bearing_capacity());
    }

    #[test]
    fn test_bearing_capacity_is_idempotent() {
        let options = AnalysisOptions::default().with_water_level(1.0).with_load_angle(10.0);
        let ubc = UltimateBearingCapacity::with_options(test_soil(), square_footing(), Vesic, options).unwrap();
        let first = ubc.bearing_capacity();
        let second = ubc.bearing_capacity();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_terms_sum_to_capacity() {
        let ubc = UltimateBearingCapacity::new(test_soil(), square_footing(), Hansen).unwrap();
        let sum = ubc.cohesion_term() + ubc.surcharge_term() + ubc.embedment_term();
        assert!(approx_eq(round_to(sum), ubc.bearing_capacity(), 1e-9));
    }

    #[test]
    fn test_cached_capacity_matches_uncached() {
        let cache = FactorCache::new();
        let ubc = UltimateBearingCapacity::new(test_soil(), square_footing(), Hansen).unwrap();
        assert_eq!(ubc.bearing_capacity_with_cache(&cache), ubc.bearing_capacity());
        assert_eq!(ubc.bearing_capacity_with_cache(&cache), ubc.bearing_capacity());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_method_enum_dispatch_matches_concrete() {
        let concrete = UltimateBearingCapacity::new(test_soil(), square_footing(), Hansen).unwrap();
        let dynamic = UltimateBearingCapacity::new(test_soil(), square_footing(), Method::Hansen).unwrap();
        assert_eq!(concrete.bearing_capacity(), dynamic.bearing_capacity());

        let terzaghi = Method::Terzaghi {
            variant: TerzaghiVariant::Meyerhof,
        };
        let a = UltimateBearingCapacity::new(test_soil(), square_footing(), terzaghi).unwrap();
        let b = UltimateBearingCapacity::new(test_soil(), square_footing(), Terzaghi::default()).unwrap();
        assert_eq!(a.bearing_capacity(), b.bearing_capacity());
    }

    #[test]
    fn test_method_json() {
        let method: Method = serde_json::from_str(r#"{"name": "terzaghi", "variant": "Hansen"}"#).unwrap();
        assert_eq!(
            method,
            Method::Terzaghi {
                variant: TerzaghiVariant::Hansen
            }
        );
        let default_variant: Method = serde_json::from_str(r#"{"name": "terzaghi"}"#).unwrap();
        assert_eq!(default_variant, Method::from_str_flexible("Terzaghi").unwrap());
        let vesic: Method = serde_json::from_str(r#"{"name": "vesic"}"#).unwrap();
        assert_eq!(vesic, Method::Vesic);
        assert!(serde_json::from_str::<Method>(r#"{"name": "terzaghi", "variant": "bishop"}"#).is_err());
    }

    #[test]
    fn test_unknown_method_name() {
        let err = Method::from_str_flexible("meyerhof").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VARIANT");
    }

    #[test]
    fn test_options_json_defaults() {
        let options: AnalysisOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AnalysisOptions::default());
        let options: AnalysisOptions = serde_json::from_str(r#"{"water_level": 0.4}"#).unwrap();
        assert_eq!(options.water_level, Some(0.4));
        assert_eq!(options.load_angle, 0.0);
    }
}
