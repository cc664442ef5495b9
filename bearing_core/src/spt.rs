//! # SPT N-Value Corrections
//!
//! Standard Penetration Test corrections that turn a recorded blow count
//! into the corrected N-value consumed by [`crate::allowable`].
//!
//! The usual chain is:
//!
//! 1. [`EnergyCorrection`] - standardise the field value to N60
//! 2. [`OverburdenCorrection`] - normalise for effective overburden pressure
//! 3. [`dilatancy_correction`] - fine or silty sands below the water table
//! 4. A design value over the influence zone ([`SptDesignMethod`])
//!
//! Blow counts are reported as whole numbers (ties to even).
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::spt::{EnergyCorrection, OverburdenCorrection};
//!
//! let n60 = EnergyCorrection::new(30.0).corrected_spt_number().unwrap();
//! assert_eq!(n60, 22.0);
//! let n1 = OverburdenCorrection::Skempton.corrected_spt_number(22.5, 100.0).unwrap();
//! assert_eq!(n1, 22.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{is_close, round_blows};
use crate::errors::{BearingError, BearingResult};

// ============================================================================
// Design N-value
// ============================================================================

fn validate_series(spt_numbers: &[f64]) -> BearingResult<()> {
    if spt_numbers.is_empty() {
        return Err(BearingError::invalid_input(
            "spt_numbers",
            "[]",
            "At least one SPT N-value is required",
        ));
    }
    if let Some(bad) = spt_numbers.iter().find(|n| !n.is_finite() || **n < 0.0) {
        return Err(BearingError::invalid_input(
            "spt_numbers",
            bad.to_string(),
            "SPT N-values must be non-negative",
        ));
    }
    Ok(())
}

/// Weighted design N-value, giving the most weight to the value closest to
/// the footing base.
///
/// # Formulas
/// ```text
/// N_design = Σ(Nᵢ/i²) / Σ(1/i²)
/// ```
pub fn weighted_spt_n_design(spt_numbers: &[f64]) -> BearingResult<f64> {
    validate_series(spt_numbers)?;
    let (sum, weights) = spt_numbers
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, weights), (i, n)| {
            let w = 1.0 / ((i + 1) as f64).powi(2);
            (sum + w * n, weights + w)
        });
    Ok(round_blows(sum / weights))
}

/// Arithmetic mean of the N-values in the influence zone
pub fn average_spt_n_design(spt_numbers: &[f64]) -> BearingResult<f64> {
    validate_series(spt_numbers)?;
    let mean = spt_numbers.iter().sum::<f64>() / spt_numbers.len() as f64;
    Ok(round_blows(mean))
}

/// Lowest N-value in the influence zone (Terzaghi & Peck)
pub fn minimum_spt_n_design(spt_numbers: &[f64]) -> BearingResult<f64> {
    validate_series(spt_numbers)?;
    let min = spt_numbers.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(round_blows(min))
}

/// How a design N-value is taken from a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SptDesignMethod {
    #[default]
    Weighted,
    Average,
    Minimum,
}

impl SptDesignMethod {
    pub fn design_n(&self, spt_numbers: &[f64]) -> BearingResult<f64> {
        match self {
            SptDesignMethod::Weighted => weighted_spt_n_design(spt_numbers),
            SptDesignMethod::Average => average_spt_n_design(spt_numbers),
            SptDesignMethod::Minimum => minimum_spt_n_design(spt_numbers),
        }
    }
}

// ============================================================================
// Energy correction
// ============================================================================

/// Field N-value standardised for hammer energy and equipment.
///
/// ## JSON Example
///
/// ```json
/// { "recorded_spt_number": 30, "rod_length": 5.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyCorrection {
    pub recorded_spt_number: f64,
    /// Energy ratio the result is standardised to (0.6 for N60)
    #[serde(default = "default_energy")]
    pub energy_percentage: f64,
    #[serde(default = "default_energy")]
    pub hammer_efficiency: f64,
    #[serde(default = "unity")]
    pub borehole_diameter_correction: f64,
    #[serde(default = "unity")]
    pub sampler_correction: f64,
    /// Rod length (m); `None` applies the short-rod correction of 0.75
    #[serde(default)]
    pub rod_length: Option<f64>,
}

fn default_energy() -> f64 {
    0.6
}

fn unity() -> f64 {
    1.0
}

impl EnergyCorrection {
    pub fn new(recorded_spt_number: f64) -> Self {
        Self {
            recorded_spt_number,
            energy_percentage: default_energy(),
            hammer_efficiency: default_energy(),
            borehole_diameter_correction: unity(),
            sampler_correction: unity(),
            rod_length: None,
        }
    }

    pub fn with_rod_length(mut self, rod_length: f64) -> Self {
        self.rod_length = Some(rod_length);
        self
    }

    pub fn validate(&self) -> BearingResult<()> {
        if !self.recorded_spt_number.is_finite() || self.recorded_spt_number < 0.0 {
            return Err(BearingError::invalid_input(
                "recorded_spt_number",
                self.recorded_spt_number.to_string(),
                "SPT N-value cannot be negative",
            ));
        }
        if !self.energy_percentage.is_finite() || self.energy_percentage <= 0.0 {
            return Err(BearingError::invalid_input(
                "energy_percentage",
                self.energy_percentage.to_string(),
                "Energy percentage must be positive",
            ));
        }
        let factors = [
            ("hammer_efficiency", self.hammer_efficiency),
            ("borehole_diameter_correction", self.borehole_diameter_correction),
            ("sampler_correction", self.sampler_correction),
        ];
        for (field, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(BearingError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        if let Some(rod) = self.rod_length {
            if !rod.is_finite() || rod <= 0.0 {
                return Err(BearingError::invalid_input(
                    "rod_length",
                    rod.to_string(),
                    "Rod length must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Rod length correction C_R
    ///
    /// | Rod length (m) | C_R  |
    /// |----------------|------|
    /// | 3 – 4          | 0.75 |
    /// | 4 – 6          | 0.85 |
    /// | 6 – 10         | 0.95 |
    /// | other          | 1.00 |
    /// | not recorded   | 0.75 |
    pub fn rod_length_correction(&self) -> f64 {
        match self.rod_length {
            None => 0.75,
            Some(l) if l > 3.0 && l <= 4.0 => 0.75,
            Some(l) if l > 4.0 && l <= 6.0 => 0.85,
            Some(l) if l > 6.0 && l <= 10.0 => 0.95,
            Some(_) => 1.0,
        }
    }

    /// Combined correction E_H·C_B·C_S·C_R / energy
    pub fn correction(&self) -> f64 {
        self.hammer_efficiency
            * self.borehole_diameter_correction
            * self.sampler_correction
            * self.rod_length_correction()
            / self.energy_percentage
    }

    pub fn corrected_spt_number(&self) -> BearingResult<f64> {
        self.validate()?;
        Ok(round_blows(self.correction() * self.recorded_spt_number))
    }
}

// ============================================================================
// Overburden pressure correction
// ============================================================================

/// Overburden pressure correction C_N formulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverburdenCorrection {
    /// Gibbs & Holtz (1957); σ' ≤ 280 kPa
    GibbsHoltz,
    /// Bazaraa (1967), Peck & Bazaraa (1969)
    BazaraaPeck,
    /// Peck, Hanson & Thornburn (1974); σ' ≥ 24 kPa
    Peck,
    /// Liao & Whitman (1986)
    LiaoWhitman,
    /// Skempton (1986)
    Skempton,
}

impl OverburdenCorrection {
    pub const ALL: [OverburdenCorrection; 5] = [
        OverburdenCorrection::GibbsHoltz,
        OverburdenCorrection::BazaraaPeck,
        OverburdenCorrection::Peck,
        OverburdenCorrection::LiaoWhitman,
        OverburdenCorrection::Skempton,
    ];

    /// Correction factor C_N for effective overburden pressure `eop` (kPa)
    ///
    /// # Formulas
    /// ```text
    /// Gibbs & Holtz:  C_N = 350/(σ' + 70), halved when above 2
    /// Bazaraa & Peck: C_N = 4/(1 + 0.0418σ')     σ' < 71.8
    ///                 C_N = 1                    σ' ≈ 71.8
    ///                 C_N = 4/(3.25 + 0.0104σ')  σ' > 71.8
    /// Peck:           C_N = 0.77·log10(2000/σ')
    /// Liao & Whitman: C_N = √(100/σ')
    /// Skempton:       C_N = 2/(1 + 0.01044σ')
    /// ```
    pub fn correction(&self, eop: f64) -> BearingResult<f64> {
        if !eop.is_finite() || eop <= 0.0 {
            return Err(eop_error(eop, "Effective overburden pressure must be positive"));
        }
        let c_n = match self {
            OverburdenCorrection::GibbsHoltz => {
                if eop > 280.0 {
                    return Err(eop_error(eop, "Gibbs & Holtz is limited to 280 kPa"));
                }
                let c = 350.0 / (eop + 70.0);
                if c > 2.0 {
                    c / 2.0
                } else {
                    c
                }
            }
            OverburdenCorrection::BazaraaPeck => {
                const STD_PRESSURE: f64 = 71.8;
                if is_close(eop, STD_PRESSURE, 0.01 * STD_PRESSURE) {
                    1.0
                } else if eop < STD_PRESSURE {
                    4.0 / (1.0 + 0.0418 * eop)
                } else {
                    4.0 / (3.25 + 0.0104 * eop)
                }
            }
            OverburdenCorrection::Peck => {
                if eop < 24.0 {
                    return Err(eop_error(eop, "Peck requires at least 24 kPa"));
                }
                0.77 * (2000.0 / eop).log10()
            }
            OverburdenCorrection::LiaoWhitman => (100.0 / eop).sqrt(),
            OverburdenCorrection::Skempton => 2.0 / (1.0 + 0.01044 * eop),
        };
        Ok(c_n)
    }

    /// Corrected N-value, capped at twice the standardised value
    pub fn corrected_spt_number(&self, std_spt_number: f64, eop: f64) -> BearingResult<f64> {
        if !std_spt_number.is_finite() || std_spt_number < 0.0 {
            return Err(BearingError::invalid_input(
                "std_spt_number",
                std_spt_number.to_string(),
                "SPT N-value cannot be negative",
            ));
        }
        let corrected = self.correction(eop)? * std_spt_number;
        Ok(round_blows(corrected.min(2.0 * std_spt_number)))
    }
}

fn eop_error(eop: f64, reason: &str) -> BearingError {
    BearingError::invalid_input("eop", eop.to_string(), reason)
}

// ============================================================================
// Dilatancy correction
// ============================================================================

/// Dilatancy correction for fine or silty sand below the water table
/// (Terzaghi & Peck). Apply after the overburden correction.
///
/// # Formulas
/// ```text
/// N' = N                     for N ≤ 15
/// N' = 15 + 0.5·(N - 15)     for N > 15
/// ```
pub fn dilatancy_correction(spt_number: f64) -> f64 {
    if spt_number <= 15.0 {
        return round_blows(spt_number);
    }
    round_blows(15.0 + 0.5 * (spt_number - 15.0))
}
