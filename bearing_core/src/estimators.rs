//! # Soil Parameter Estimators
//!
//! Empirical correlations from the energy-corrected SPT N-value (N60) to the
//! soil parameters an ultimate capacity analysis needs.
//!
//! ## Correlations
//!
//! - Friction angle: Wolff (1989), Kulhawy & Mayne (1990)
//! - Unit weights: moist, saturated and submerged from N60
//! - Undrained shear strength: Stroud (1974), Skempton (1957)
//!
//! Friction angles and strengths are reported to 3 decimal places, unit
//! weights to 2.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::estimators::{cohesionless_soil_from_spt, wolff_friction_angle};
//!
//! assert_eq!(wolff_friction_angle(20.0).unwrap(), 32.884);
//! let soil = cohesionless_soil_from_spt(20.0).unwrap();
//! assert_eq!(soil.moist_unit_weight(), 18.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::rounding::round_dp;
use crate::equations::{arctan, is_close, round_to};
use crate::errors::{BearingError, BearingResult};
use crate::soil::SoilProperties;

const ESTIMATE_PLACES: i32 = 3;

/// Stroud's constant k, lower bound and default
pub const STROUD_K_MIN: f64 = 3.5;

/// Stroud's constant k, upper bound
pub const STROUD_K_MAX: f64 = 6.5;

fn check_spt_n_60(spt_n_60: f64) -> BearingResult<()> {
    if !spt_n_60.is_finite() || spt_n_60 < 0.0 {
        return Err(BearingError::invalid_input(
            "spt_n_60",
            spt_n_60.to_string(),
            "SPT N60 must be a non-negative number",
        ));
    }
    Ok(())
}

fn check_overburden(eop: f64) -> BearingResult<()> {
    if !eop.is_finite() || eop < 0.0 {
        return Err(BearingError::invalid_input(
            "eop",
            eop.to_string(),
            "Effective overburden pressure cannot be negative",
        ));
    }
    Ok(())
}

// ============================================================================
// Friction angle
// ============================================================================

/// Friction angle of granular soil, Wolff (1989), degrees
///
/// # Formulas
/// ```text
/// φ = 27.1 + 0.3·N60 - 0.00054·N60²
/// ```
pub fn wolff_friction_angle(spt_n_60: f64) -> BearingResult<f64> {
    check_spt_n_60(spt_n_60)?;
    Ok(round_dp(27.1 + 0.3 * spt_n_60 - 0.00054 * spt_n_60.powi(2), ESTIMATE_PLACES))
}

/// Friction angle of cohesionless soil, Kulhawy & Mayne (1990), degrees
///
/// # Formulas
/// ```text
/// φ = arctan[(N60 / (12.2 + 20.3·σ'/pa))^0.34]
/// ```
///
/// `eop` and `atm_pressure` must share a unit.
///
/// # Errors
/// `InvalidInput` when the atmospheric pressure is zero or negative, or
/// either pressure is negative.
pub fn kulhawy_mayne_friction_angle(spt_n_60: f64, eop: f64, atm_pressure: f64) -> BearingResult<f64> {
    check_spt_n_60(spt_n_60)?;
    check_overburden(eop)?;
    if !atm_pressure.is_finite() || atm_pressure < 0.0 || is_close(atm_pressure, 0.0, f64::EPSILON) {
        return Err(BearingError::invalid_input(
            "atm_pressure",
            atm_pressure.to_string(),
            "Atmospheric pressure must be positive",
        ));
    }
    let ratio = spt_n_60 / (12.2 + 20.3 * (eop / atm_pressure));
    Ok(round_dp(arctan(ratio.powf(0.34)), ESTIMATE_PLACES))
}

/// The lower of the Wolff and Kulhawy & Mayne friction angles
pub fn friction_angle(spt_n_60: f64, eop: f64, atm_pressure: f64) -> BearingResult<f64> {
    let wolff = wolff_friction_angle(spt_n_60)?;
    let kulhawy_mayne = kulhawy_mayne_friction_angle(spt_n_60, eop, atm_pressure)?;
    Ok(wolff.min(kulhawy_mayne))
}

// ============================================================================
// Unit weight
// ============================================================================

/// Unit weights estimated from N60 (kN/m³)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitWeights {
    /// Moist unit weight of cohesionless soil
    pub moist: f64,
    /// Saturated unit weight of cohesive soil
    pub saturated: f64,
    /// Submerged unit weight of cohesionless soil
    pub submerged: f64,
}

impl UnitWeights {
    /// # Formulas
    /// ```text
    /// γ_moist = 16.0 + 0.1·N60
    /// γ_sat   = 16.8 + 0.15·N60
    /// γ_sub   = 8.8 + 0.01·N60
    /// ```
    pub fn from_spt(spt_n_60: f64) -> BearingResult<Self> {
        check_spt_n_60(spt_n_60)?;
        Ok(Self {
            moist: round_to(16.0 + 0.1 * spt_n_60),
            saturated: round_to(16.8 + 0.15 * spt_n_60),
            submerged: round_to(8.8 + 0.01 * spt_n_60),
        })
    }
}

// ============================================================================
// Undrained shear strength
// ============================================================================

/// Undrained shear strength, Stroud (1974) (kPa)
///
/// `cu = k·N60`, with 3.5 ≤ k ≤ 6.5.
pub fn stroud_undrained_shear_strength(spt_n_60: f64, k: f64) -> BearingResult<f64> {
    check_spt_n_60(spt_n_60)?;
    if !(STROUD_K_MIN..=STROUD_K_MAX).contains(&k) {
        return Err(BearingError::invalid_input(
            "k",
            k.to_string(),
            "Stroud constant must lie between 3.5 and 6.5",
        ));
    }
    Ok(round_dp(k * spt_n_60, ESTIMATE_PLACES))
}

/// Undrained shear strength of normally consolidated clay, Skempton (1957) (kPa)
///
/// `cu = σ'·(0.11 + 0.0037·PI)`
pub fn skempton_undrained_shear_strength(eop: f64, plasticity_index: f64) -> BearingResult<f64> {
    check_overburden(eop)?;
    if !plasticity_index.is_finite() || plasticity_index < 0.0 {
        return Err(BearingError::invalid_input(
            "plasticity_index",
            plasticity_index.to_string(),
            "Plasticity index cannot be negative",
        ));
    }
    Ok(round_dp(eop * (0.11 + 0.0037 * plasticity_index), ESTIMATE_PLACES))
}

// ============================================================================
// Soil records
// ============================================================================

/// Cohesionless soil from N60: Wolff friction angle, zero cohesion and the
/// moist unit weight.
pub fn cohesionless_soil_from_spt(spt_n_60: f64) -> BearingResult<SoilProperties> {
    let phi = wolff_friction_angle(spt_n_60)?;
    let weights = UnitWeights::from_spt(spt_n_60)?;
    SoilProperties::new(phi, 0.0, weights.moist)
}

/// Undrained (φ = 0) cohesive soil from N60: Stroud strength and the
/// saturated unit weight.
pub fn cohesive_soil_from_spt(spt_n_60: f64, k: f64) -> BearingResult<SoilProperties> {
    let cu = stroud_undrained_shear_strength(spt_n_60, k)?;
    let weights = UnitWeights::from_spt(spt_n_60)?;
    SoilProperties::new(0.0, cu, weights.saturated)
}
