//! # Allowable Bearing Capacity Calculation
//!
//! JSON-facing wrapper around [`AllowableBearingCapacity`]. The SPT input may
//! be a single corrected N-value or a series from which a design value is
//! taken.

use serde::{Deserialize, Serialize};

use super::FoundationInput;
use crate::allowable::{AllowableBearingCapacity, AllowableMethod};
use crate::errors::BearingResult;
use crate::foundation::FoundationType;
use crate::spt::SptDesignMethod;

/// SPT N-value source.
///
/// ## JSON Examples
///
/// ```json
/// 17
/// ```
///
/// ```json
/// { "values": [7, 15, 18], "design": "weighted" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SptInput {
    /// Already corrected design N-value
    Corrected(f64),
    /// Corrected N-values through the influence zone, shallowest first
    Series {
        values: Vec<f64>,
        #[serde(default)]
        design: SptDesignMethod,
    },
}

impl SptInput {
    /// Design N-value
    pub fn design_n(&self) -> BearingResult<f64> {
        match self {
            SptInput::Corrected(n) => Ok(*n),
            SptInput::Series { values, design } => design.design_n(values),
        }
    }
}

/// Input parameters for an allowable bearing capacity analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "F-2",
///   "spt": 17,
///   "tol_settlement": 20.0,
///   "foundation": { "depth": 1.5, "shape": "square", "width": 1.4 },
///   "foundation_type": "Pad",
///   "method": "terzaghi_peck",
///   "water_level": 1.7
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowableCapacityInput {
    #[serde(default)]
    pub label: String,

    pub spt: SptInput,

    /// Tolerable settlement (mm), at most 25.4
    pub tol_settlement: f64,

    pub foundation: FoundationInput,

    #[serde(default)]
    pub foundation_type: FoundationType,

    #[serde(default)]
    pub method: AllowableMethod,

    /// Water table depth below ground surface (m)
    #[serde(default)]
    pub water_level: Option<f64>,
}

/// Results of an allowable bearing capacity analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowableCapacityReport {
    pub label: String,
    pub method: AllowableMethod,
    pub foundation_type: FoundationType,

    /// N-value used in the formula
    pub design_spt_number: f64,

    /// S / 25.4
    pub settlement_ratio: f64,

    pub depth_factor: f64,

    pub water_correction: f64,

    /// Allowable bearing capacity q_a (kPa)
    pub allowable_capacity: f64,
}

/// Calculate the allowable bearing capacity of a footing on cohesionless soil.
pub fn calculate(input: &AllowableCapacityInput) -> BearingResult<AllowableCapacityReport> {
    let design_spt_number = input.spt.design_n()?;
    let foundation = input.foundation.to_foundation_size()?;
    let analysis = AllowableBearingCapacity::new(
        design_spt_number,
        input.tol_settlement,
        foundation,
        input.foundation_type,
        input.method,
    )?
    .with_water_level(input.water_level)?;

    Ok(AllowableCapacityReport {
        label: input.label.clone(),
        method: input.method,
        foundation_type: input.foundation_type,
        design_spt_number,
        settlement_ratio: analysis.settlement_ratio(),
        depth_factor: analysis.depth_factor(),
        water_correction: analysis.water_correction(),
        allowable_capacity: analysis.bearing_capacity(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> AllowableCapacityInput {
        AllowableCapacityInput {
            label: "Test Pad".to_string(),
            spt: SptInput::Corrected(17.0),
            tol_settlement: 20.0,
            foundation: FoundationInput::new(1.5, "square", 1.4, None),
            foundation_type: FoundationType::Pad,
            method: AllowableMethod::TerzaghiPeck,
            water_level: Some(1.7),
        }
    }

    #[test]
    fn test_calculation() {
        let report = calculate(&test_input()).unwrap();
        assert!((report.allowable_capacity - 91.21).abs() < 0.011);
        assert_eq!(report.depth_factor, 1.25);
        assert!(report.water_correction > 1.0);
    }

    #[test]
    fn test_spt_series() {
        let mut input = test_input();
        input.spt = SptInput::Series {
            values: vec![7.0, 15.0, 18.0],
            design: SptDesignMethod::Weighted,
        };
        let report = calculate(&input).unwrap();
        assert_eq!(report.design_spt_number, 9.0);
    }

    #[test]
    fn test_spt_json_forms() {
        let single: SptInput = serde_json::from_str("17").unwrap();
        assert_eq!(single, SptInput::Corrected(17.0));
        let series: SptInput = serde_json::from_str(r#"{"values": [7, 15, 18]}"#).unwrap();
        assert_eq!(series.design_n().unwrap(), 9.0);
    }

    #[test]
    fn test_settlement_exceeded() {
        let mut input = test_input();
        input.tol_settlement = 30.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "SETTLEMENT_EXCEEDED");
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "spt": 17,
            "tol_settlement": 20.0,
            "foundation": { "depth": 1.5, "shape": "square", "width": 1.4 },
            "method": "bowles"
        }"#;
        let input: AllowableCapacityInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.foundation_type, FoundationType::Pad);
        let report = calculate(&input).unwrap();
        assert!((report.allowable_capacity - 316.29).abs() < 0.011);
    }
}
