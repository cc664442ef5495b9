//! # Allowable Bearing Capacity
//!
//! Allowable bearing pressure of cohesionless soils from the corrected SPT
//! N-value, for a tolerable settlement of at most 25.4 mm (one inch).
//!
//! ## Methods
//!
//! - **Bowles (1997)** - revised Meyerhof coefficients
//! - **Meyerhof (1956)**
//! - **Terzaghi & Peck (1948)** - with a water table correction
//!
//! All three scale linearly with the settlement ratio S / 25.4 and switch
//! formula at a footing width of 1.2 m. Mat foundations always use the
//! wide-footing coefficient without the width term.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::allowable::{AllowableBearingCapacity, AllowableMethod};
//! use bearing_core::foundation::{create_foundation, FoundationType};
//!
//! let fs = create_foundation(1.5, 1.4, None, None, "square").unwrap();
//! let abc = AllowableBearingCapacity::new(17.0, 20.0, fs, FoundationType::Pad, AllowableMethod::Bowles).unwrap();
//! assert!((abc.bearing_capacity() - 316.29).abs() < 0.01);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equations::round_to;
use crate::errors::{BearingError, BearingResult};
use crate::foundation::{FoundationSize, FoundationType};

/// Maximum tolerable settlement (mm)
pub const MAX_TOL_SETTLEMENT: f64 = 25.4;

/// Width (m) at which the narrow/wide footing formulas switch
pub const WIDTH_LIMIT: f64 = 1.2;

/// Feet per metre, as used by the empirical width term
const FT_PER_M: f64 = 3.28;

// ============================================================================
// Method selection
// ============================================================================

/// SPT-based allowable capacity formulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AllowableMethod {
    #[default]
    Bowles,
    Meyerhof,
    TerzaghiPeck,
}

impl AllowableMethod {
    pub const ALL: [AllowableMethod; 3] = [
        AllowableMethod::Bowles,
        AllowableMethod::Meyerhof,
        AllowableMethod::TerzaghiPeck,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            AllowableMethod::Bowles => "Bowles (1997)",
            AllowableMethod::Meyerhof => "Meyerhof (1956)",
            AllowableMethod::TerzaghiPeck => "Terzaghi & Peck (1948)",
        }
    }

    /// Parse a method name, ignoring case ("terzaghi" selects Terzaghi & Peck)
    pub fn from_str_flexible(s: &str) -> BearingResult<Self> {
        let normalized = s.trim().to_lowercase().replace(['&', '-', ' ', '_'], "");
        match normalized.as_str() {
            "bowles" => Ok(AllowableMethod::Bowles),
            "meyerhof" => Ok(AllowableMethod::Meyerhof),
            "terzaghi" | "terzaghipeck" => Ok(AllowableMethod::TerzaghiPeck),
            _ => Err(BearingError::invalid_variant(s)),
        }
    }
}

impl std::fmt::Display for AllowableMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Formulas
// ============================================================================

/// Depth factor f_d = min(1 + k·D/B, cap)
#[inline]
pub fn depth_factor(depth: f64, width: f64, k: f64, cap: f64) -> f64 {
    (1.0 + k * depth / width).min(cap)
}

/// Wide-footing width term ((3.28B + 1) / 3.28B)²
#[inline]
pub fn width_term(width: f64) -> f64 {
    ((FT_PER_M * width + 1.0) / (FT_PER_M * width)).powi(2)
}

/// Terzaghi & Peck water correction c_w, clamped to 1..=2
///
/// # Formulas
/// ```text
/// c_w = 2 - D/(2B)     for Dw ≤ D
/// c_w = 2 - Dw/(2B)    for Dw > D
/// ```
///
/// Without a water table c_w = 1.
pub fn terzaghi_peck_water_correction(depth: f64, width: f64, water_level: Option<f64>) -> f64 {
    match water_level {
        None => 1.0,
        Some(wl) => {
            let cw = if wl <= depth {
                2.0 - depth / (2.0 * width)
            } else {
                2.0 - wl / (2.0 * width)
            };
            cw.clamp(1.0, 2.0)
        }
    }
}

/// Bowles (1997), kPa before rounding
///
/// # Formulas
/// ```text
/// f_d = min(1 + 0.33·D/B, 1.33)
/// Pad, B ≤ 1.2: 19.16·N·f_d·S/25.4
/// Pad, B > 1.2: 11.98·N·((3.28B+1)/3.28B)²·f_d·S/25.4
/// Mat:          11.98·N·f_d·S/25.4
/// ```
pub fn bowles(n: f64, settlement_ratio: f64, depth: f64, width: f64, foundation_type: FoundationType) -> f64 {
    let f_d = depth_factor(depth, width, 0.33, 1.33);
    match foundation_type {
        FoundationType::Mat => 11.98 * n * f_d * settlement_ratio,
        FoundationType::Pad if width <= WIDTH_LIMIT => 19.16 * n * f_d * settlement_ratio,
        FoundationType::Pad => 11.98 * n * width_term(width) * f_d * settlement_ratio,
    }
}

/// Meyerhof (1956), kPa before rounding
///
/// Same depth factor as Bowles, with coefficients 12 and 8.
pub fn meyerhof(n: f64, settlement_ratio: f64, depth: f64, width: f64, foundation_type: FoundationType) -> f64 {
    let f_d = depth_factor(depth, width, 0.33, 1.33);
    match foundation_type {
        FoundationType::Mat => 8.0 * n * f_d * settlement_ratio,
        FoundationType::Pad if width <= WIDTH_LIMIT => 12.0 * n * f_d * settlement_ratio,
        FoundationType::Pad => 8.0 * n * width_term(width) * f_d * settlement_ratio,
    }
}

/// Terzaghi & Peck (1948), kPa before rounding
///
/// # Formulas
/// ```text
/// f_d = min(1 + 0.25·D/B, 1.25)
/// Pad, B ≤ 1.2: 12·N / (c_w·f_d) · S/25.4
/// Pad, B > 1.2: 8·N·((3.28B+1)/3.28B)² / (c_w·f_d) · S/25.4
/// Mat:          8·N / (c_w·f_d) · S/25.4
/// ```
pub fn terzaghi_peck(
    n: f64,
    settlement_ratio: f64,
    depth: f64,
    width: f64,
    water_level: Option<f64>,
    foundation_type: FoundationType,
) -> f64 {
    let f_d = depth_factor(depth, width, 0.25, 1.25);
    let c_w = terzaghi_peck_water_correction(depth, width, water_level);
    let reduction = c_w * f_d;
    match foundation_type {
        FoundationType::Mat => 8.0 * n / reduction * settlement_ratio,
        FoundationType::Pad if width <= WIDTH_LIMIT => 12.0 * n / reduction * settlement_ratio,
        FoundationType::Pad => 8.0 * n * width_term(width) / reduction * settlement_ratio,
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Allowable bearing capacity of a footing on cohesionless soil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllowableBearingCapacity {
    corrected_spt_number: f64,
    tol_settlement: f64,
    foundation: FoundationSize,
    foundation_type: FoundationType,
    method: AllowableMethod,
    water_level: Option<f64>,
}

impl AllowableBearingCapacity {
    /// # Errors
    /// - `SettlementExceeded` if `tol_settlement` is above 25.4 mm
    /// - `InvalidInput` for a negative settlement or SPT number
    pub fn new(
        corrected_spt_number: f64,
        tol_settlement: f64,
        foundation: FoundationSize,
        foundation_type: FoundationType,
        method: AllowableMethod,
    ) -> BearingResult<Self> {
        if !corrected_spt_number.is_finite() || corrected_spt_number < 0.0 {
            return Err(BearingError::invalid_input(
                "corrected_spt_number",
                corrected_spt_number.to_string(),
                "SPT N-value cannot be negative",
            ));
        }
        if !tol_settlement.is_finite() || tol_settlement < 0.0 {
            return Err(BearingError::invalid_input(
                "tol_settlement",
                tol_settlement.to_string(),
                "Tolerable settlement cannot be negative",
            ));
        }
        if tol_settlement > MAX_TOL_SETTLEMENT {
            return Err(BearingError::SettlementExceeded {
                settlement_mm: tol_settlement,
                max_mm: MAX_TOL_SETTLEMENT,
            });
        }
        Ok(Self {
            corrected_spt_number,
            tol_settlement,
            foundation,
            foundation_type,
            method,
            water_level: None,
        })
    }

    /// Set the water table depth below ground surface (used by Terzaghi & Peck)
    pub fn with_water_level(mut self, water_level: Option<f64>) -> BearingResult<Self> {
        if let Some(wl) = water_level {
            if wl.is_nan() || wl < 0.0 {
                return Err(BearingError::invalid_input(
                    "water_level",
                    wl.to_string(),
                    "Water level cannot be negative",
                ));
            }
        }
        self.water_level = water_level;
        Ok(self)
    }

    pub fn method(&self) -> AllowableMethod {
        self.method
    }

    pub fn foundation(&self) -> &FoundationSize {
        &self.foundation
    }

    pub fn foundation_type(&self) -> FoundationType {
        self.foundation_type
    }

    /// S / 25.4
    pub fn settlement_ratio(&self) -> f64 {
        self.tol_settlement / MAX_TOL_SETTLEMENT
    }

    /// Depth factor of the selected method
    pub fn depth_factor(&self) -> f64 {
        let (d, b) = (self.foundation.depth(), self.foundation.width());
        match self.method {
            AllowableMethod::Bowles | AllowableMethod::Meyerhof => depth_factor(d, b, 0.33, 1.33),
            AllowableMethod::TerzaghiPeck => depth_factor(d, b, 0.25, 1.25),
        }
    }

    /// Water correction; only Terzaghi & Peck applies one
    pub fn water_correction(&self) -> f64 {
        match self.method {
            AllowableMethod::TerzaghiPeck => terzaghi_peck_water_correction(
                self.foundation.depth(),
                self.foundation.width(),
                self.water_level,
            ),
            _ => 1.0,
        }
    }

    /// Allowable bearing capacity q_a (kPa)
    pub fn bearing_capacity(&self) -> f64 {
        let n = self.corrected_spt_number;
        let sr = self.settlement_ratio();
        let d = self.foundation.depth();
        let b = self.foundation.width();
        let q = match self.method {
            AllowableMethod::Bowles => bowles(n, sr, d, b, self.foundation_type),
            AllowableMethod::Meyerhof => meyerhof(n, sr, d, b, self.foundation_type),
            AllowableMethod::TerzaghiPeck => terzaghi_peck(n, sr, d, b, self.water_level, self.foundation_type),
        };
        let q_a = round_to(q);
        debug!(
            "event=allowable_capacity method={:?} type={} q_a={}",
            self.method, self.foundation_type, q_a
        );
        q_a
    }
}
