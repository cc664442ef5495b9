//! # Bearing Capacity Calculations
//!
//! JSON-facing calculation entry points. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Report` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Report, BearingError>` - Pure calculation function
//!
//! [`AnalysisRequest`] wraps every input type under a `"type"` tag so a
//! single JSON document can carry any analysis.
//!
//! ## Available Calculations
//!
//! - [`ultimate_capacity`] - Terzaghi, Hansen and Vesic ultimate capacity
//! - [`allowable_capacity`] - SPT-based allowable capacity on cohesionless soil

pub mod allowable_capacity;
pub mod ultimate_capacity;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{BearingError, BearingResult};
use crate::foundation::{FootingDimensions, FoundationSize};

// Re-export commonly used types
pub use allowable_capacity::{calculate as calculate_allowable, AllowableCapacityInput, AllowableCapacityReport, SptInput};
pub use ultimate_capacity::{calculate, BearingCapacityInput, BearingCapacityReport, SoilInput};

/// Foundation geometry as it appears in JSON requests.
///
/// The footing fields are flattened, so the shape tag sits next to the depth:
///
/// ```json
/// { "depth": 1.0, "shape": "rectangular", "width": 1.5, "length": 2.5, "eccentricity": 0.1 }
/// ```
///
/// Shape and dimensions are only checked by [`Self::to_foundation_size`], so
/// an unknown tag reports `UnknownShape` rather than a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationInput {
    /// Depth of the footing base below ground surface (m)
    pub depth: f64,

    #[serde(flatten)]
    pub footing: FootingDimensions,

    /// Load eccentricity along the width (m)
    #[serde(default)]
    pub eccentricity: f64,
}

impl FoundationInput {
    pub fn new(depth: f64, shape: impl Into<String>, width: f64, length: Option<f64>) -> Self {
        Self {
            depth,
            footing: FootingDimensions::new(shape, width, length),
            eccentricity: 0.0,
        }
    }

    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.eccentricity = eccentricity;
        self
    }

    pub fn to_foundation_size(&self) -> BearingResult<FoundationSize> {
        FoundationSize::new(self.depth, self.footing.to_footing()?, self.eccentricity)
    }
}

/// Any analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnalysisRequest {
    /// Ultimate bearing capacity (Terzaghi, Hansen, Vesic)
    Ultimate(BearingCapacityInput),
    /// Allowable bearing capacity from SPT N-values
    Allowable(AllowableCapacityInput),
}

/// Result of an [`AnalysisRequest`], tagged the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnalysisReport {
    Ultimate(BearingCapacityReport),
    Allowable(AllowableCapacityReport),
}

impl AnalysisRequest {
    /// Parse a request from JSON.
    ///
    /// # Example
    /// ```
    /// use bearing_core::calculations::AnalysisRequest;
    ///
    /// let request = AnalysisRequest::from_json(r#"{
    ///     "type": "Allowable",
    ///     "spt": 17,
    ///     "tol_settlement": 20.0,
    ///     "foundation": { "depth": 1.5, "shape": "square", "width": 1.4 }
    /// }"#).unwrap();
    /// assert_eq!(request.calc_type(), "Allowable");
    /// ```
    pub fn from_json(json: &str) -> BearingResult<Self> {
        serde_json::from_str(json).map_err(|e| BearingError::serialization(e.to_string()))
    }

    /// Get the user-provided label for this analysis
    pub fn label(&self) -> &str {
        match self {
            AnalysisRequest::Ultimate(u) => &u.label,
            AnalysisRequest::Allowable(a) => &a.label,
        }
    }

    /// Get the analysis type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            AnalysisRequest::Ultimate(_) => "Ultimate",
            AnalysisRequest::Allowable(_) => "Allowable",
        }
    }

    /// Run the analysis.
    pub fn run(&self) -> BearingResult<AnalysisReport> {
        debug!("event=analysis_start type={} label={:?}", self.calc_type(), self.label());
        match self {
            AnalysisRequest::Ultimate(input) => ultimate_capacity::calculate(input).map(AnalysisReport::Ultimate),
            AnalysisRequest::Allowable(input) => allowable_capacity::calculate(input).map(AnalysisReport::Allowable),
        }
    }
}

impl AnalysisReport {
    /// Headline capacity (kPa) of the report
    pub fn capacity(&self) -> f64 {
        match self {
            AnalysisReport::Ultimate(r) => r.ultimate_capacity,
            AnalysisReport::Allowable(r) => r.allowable_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ULTIMATE_JSON: &str = r#"{
        "type": "Ultimate",
        "label": "F-1",
        "soil": { "friction_angle": 20.0, "cohesion": 20.0, "moist_unit_weight": 18.0 },
        "foundation": { "depth": 1.5, "shape": "square", "width": 2.0 },
        "method": { "name": "hansen" }
    }"#;

    #[test]
    fn test_request_roundtrip() {
        let request = AnalysisRequest::from_json(ULTIMATE_JSON).unwrap();
        assert_eq!(request.label(), "F-1");
        assert_eq!(request.calc_type(), "Ultimate");
        let report = request.run().unwrap();
        assert!((report.capacity() - 809.36).abs() < 0.02);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"type\":\"Ultimate\""));
    }

    #[test]
    fn test_foundation_input_flattened() {
        let input: FoundationInput =
            serde_json::from_str(r#"{"depth": 1.0, "shape": "rectangle", "width": 1.5, "length": 2.5}"#).unwrap();
        assert_eq!(input, FoundationInput::new(1.0, "rectangle", 1.5, Some(2.5)));
        let fs = input.to_foundation_size().unwrap();
        assert_eq!(fs.length(), 2.5);
    }

    fn run_json(json: &str) -> BearingResult<AnalysisReport> {
        AnalysisRequest::from_json(json)?.run()
    }

    #[test]
    fn test_missing_soil_property() {
        let json = r#"{
            "type": "Ultimate",
            "soil": { "friction_angle": 20.0, "moist_unit_weight": 18.0 },
            "foundation": { "depth": 1.5, "shape": "square", "width": 2.0 }
        }"#;
        let err = run_json(json).unwrap_err();
        assert_eq!(err, BearingError::missing_property("cohesion"));
        assert_eq!(err.error_code(), "MISSING_PROPERTY");
    }

    #[test]
    fn test_shape_tag_is_case_insensitive() {
        let json = r#"{
            "type": "Ultimate",
            "soil": { "friction_angle": 20.0, "cohesion": 20.0, "moist_unit_weight": 18.0 },
            "foundation": { "depth": 1.5, "shape": "Square", "width": 2.0 }
        }"#;
        let report = run_json(json).unwrap();
        assert!((report.capacity() - 809.36).abs() < 0.02);
    }

    #[test]
    fn test_unknown_shape_tag() {
        let json = r#"{
            "type": "Ultimate",
            "soil": { "friction_angle": 20.0, "cohesion": 20.0, "moist_unit_weight": 18.0 },
            "foundation": { "depth": 1.5, "shape": "hexagon", "width": 2.0 }
        }"#;
        let err = run_json(json).unwrap_err();
        assert_eq!(err, BearingError::unknown_shape("hexagon"));
    }

    #[test]
    fn test_circle_uses_width() {
        let json = r#"{
            "type": "Allowable",
            "spt": 17,
            "tol_settlement": 20.0,
            "foundation": { "depth": 1.5, "shape": "circle", "width": 2.0 }
        }"#;
        assert!(run_json(json).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = AnalysisRequest::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
