//! # Ultimate Bearing Capacity Calculation
//!
//! JSON-facing wrapper around [`UltimateBearingCapacity`].
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::calculations::ultimate_capacity::{calculate, BearingCapacityInput};
//!
//! let json = r#"{
//!     "label": "F-1",
//!     "soil": { "friction_angle": 20.0, "cohesion": 20.0, "moist_unit_weight": 18.0 },
//!     "foundation": { "depth": 1.5, "shape": "square", "width": 2.0 },
//!     "method": { "name": "hansen" }
//! }"#;
//! let input: BearingCapacityInput = serde_json::from_str(json).unwrap();
//! let report = calculate(&input).unwrap();
//! assert!((report.ultimate_capacity - 809.36).abs() < 0.05);
//! ```

use serde::{Deserialize, Serialize};

use super::FoundationInput;
use crate::errors::BearingResult;
use crate::foundation::Shape;
use crate::soil::SoilProperties;
use crate::ultimate::{AnalysisOptions, BearingCapacityMethod, CapacityFactors, Method, UltimateBearingCapacity};

/// Soil parameters as they appear in JSON.
///
/// Every key is optional here so that a missing one is reported by
/// [`Self::to_properties`] as `MissingProperty`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SoilInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohesion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moist_unit_weight: Option<f64>,
}

impl SoilInput {
    /// Validated soil properties
    pub fn to_properties(&self) -> BearingResult<SoilProperties> {
        let entries = [
            ("friction_angle", self.friction_angle),
            ("cohesion", self.cohesion),
            ("moist_unit_weight", self.moist_unit_weight),
        ];
        SoilProperties::from_map(entries.into_iter().filter_map(|(key, value)| value.map(|v| (key, v))))
    }
}

impl From<SoilProperties> for SoilInput {
    fn from(soil: SoilProperties) -> Self {
        Self {
            friction_angle: Some(soil.friction_angle()),
            cohesion: Some(soil.cohesion()),
            moist_unit_weight: Some(soil.moist_unit_weight()),
        }
    }
}

/// Input parameters for an ultimate bearing capacity analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "F-1",
///   "soil": { "friction_angle": 35.0, "cohesion": 15.0, "moist_unit_weight": 18.0 },
///   "foundation": { "depth": 1.5, "shape": "strip", "width": 2.0 },
///   "method": { "name": "terzaghi", "variant": "meyerhof" },
///   "options": { "water_level": 0.4 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearingCapacityInput {
    /// User label for this footing (e.g., "F-1", "Grid B/3")
    #[serde(default)]
    pub label: String,

    pub soil: SoilInput,

    pub foundation: FoundationInput,

    /// Defaults to Hansen
    #[serde(default)]
    pub method: Method,

    #[serde(default)]
    pub options: AnalysisOptions,
}

impl BearingCapacityInput {
    /// Build the validated analysis object.
    pub fn to_analysis(&self) -> BearingResult<UltimateBearingCapacity<Method>> {
        let soil = self.soil.to_properties()?;
        let foundation = self.foundation.to_foundation_size()?;
        UltimateBearingCapacity::with_options(soil, foundation, self.method, self.options)
    }
}

/// Results of an ultimate bearing capacity analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearingCapacityReport {
    pub label: String,

    /// Method name ("terzaghi", "hansen", "vesic")
    pub method: String,

    /// Shape used by the shape factors
    pub effective_shape: Shape,

    /// B' = B - 2e (m)
    pub effective_width: f64,

    /// Ultimate bearing capacity q_ult (kPa)
    pub ultimate_capacity: f64,

    /// Every factor and term behind `ultimate_capacity`
    pub factors: CapacityFactors,
}

/// Calculate the ultimate bearing capacity of a footing.
///
/// # Returns
///
/// * `Ok(BearingCapacityReport)` - Capacity and its factors
/// * `Err(BearingError)` - If geometry, soil or options are invalid
pub fn calculate(input: &BearingCapacityInput) -> BearingResult<BearingCapacityReport> {
    let analysis = input.to_analysis()?;
    let factors = analysis.factors();
    let foundation = analysis.foundation();

    Ok(BearingCapacityReport {
        label: input.label.clone(),
        method: analysis.method().name().to_string(),
        effective_shape: foundation.effective_shape(),
        effective_width: foundation.effective_width(),
        ultimate_capacity: analysis.bearing_capacity(),
        factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ultimate::TerzaghiVariant;

    fn test_input() -> BearingCapacityInput {
        BearingCapacityInput {
            label: "Test Footing".to_string(),
            soil: SoilProperties::new(35.0, 15.0, 18.0).unwrap().into(),
            foundation: FoundationInput::new(1.5, "strip", 2.0, None),
            method: Method::Terzaghi {
                variant: TerzaghiVariant::Meyerhof,
            },
            options: AnalysisOptions::default().with_water_level(0.4),
        }
    }

    #[test]
    fn test_calculation() {
        let report = calculate(&test_input()).unwrap();
        assert_eq!(report.method, "terzaghi");
        assert_eq!(report.effective_shape, Shape::Strip);
        assert!((report.ultimate_capacity - 1993.55).abs() < 0.02);
        assert!((report.factors.water.surcharge - 0.6333).abs() < 1e-4);
        assert_eq!(report.factors.total(), report.ultimate_capacity);
    }

    #[test]
    fn test_json_roundtrip_of_report() {
        let report = calculate(&test_input()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"ultimate_capacity\""));
        assert!(json.contains("\"n_gamma\""));
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "soil": { "friction_angle": 20.0, "cohesion": 20.0, "moist_unit_weight": 18.0 },
            "foundation": { "depth": 1.5, "shape": "square", "width": 2.0 }
        }"#;
        let input: BearingCapacityInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.method, Method::Hansen);
        assert_eq!(input.options, AnalysisOptions::default());
        assert!(input.label.is_empty());
        let report = calculate(&input).unwrap();
        assert!((report.ultimate_capacity - 809.36).abs() < 0.02);
    }

    #[test]
    fn test_invalid_geometry() {
        let mut input = test_input();
        input.foundation.depth = -1.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_soil_input_missing_and_invalid() {
        let mut input = test_input();
        input.soil.cohesion = None;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_PROPERTY");

        input.soil.cohesion = Some(-5.0);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PROPERTY");
    }

    #[test]
    fn test_method_name_in_report() {
        let mut input = test_input();
        input.method = Method::Vesic;
        assert_eq!(calculate(&input).unwrap().method, "vesic");
    }

    #[test]
    fn test_invalid_load_angle() {
        let mut input = test_input();
        input.options.load_angle = 120.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD_ANGLE");
    }
}
