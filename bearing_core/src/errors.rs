//! # Error Types
//!
//! Structured error types for bearing_core. Every failure is raised at
//! construction time, carries enough context to locate the offending input,
//! and serializes to JSON so a caller on the other side of the CLI can react
//! to it programmatically.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::errors::{BearingError, BearingResult};
//!
//! fn validate_depth(depth: f64) -> BearingResult<()> {
//!     if depth <= 0.0 {
//!         return Err(BearingError::invalid_geometry(
//!             "depth",
//!             depth,
//!             "Depth must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_depth(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bearing_core operations
pub type BearingResult<T> = Result<T, BearingError>;

/// Structured error type for bearing capacity analyses.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BearingError {
    /// Foundation dimension is out of range (non-positive width, missing length, ...)
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: f64,
        reason: String,
    },

    /// Shape tag could not be parsed
    #[error("Unknown foundation shape: '{shape}' (expected strip, square, circle or rectangle)")]
    UnknownShape { shape: String },

    /// Soil property mapping lacks a required key
    #[error("Missing soil property: {property}")]
    MissingProperty { property: String },

    /// Soil property value is out of range
    #[error("Invalid soil property '{property}': {value} - {reason}")]
    InvalidProperty {
        property: String,
        value: f64,
        reason: String,
    },

    /// Method variant name could not be parsed
    #[error("Unknown method variant: '{variant}'")]
    InvalidVariant { variant: String },

    /// Load inclination outside 0..=90 degrees
    #[error("Invalid load angle: {angle} degrees (must be between 0 and 90)")]
    InvalidLoadAngle { angle: f64 },

    /// Tolerable settlement above the supported maximum
    #[error("Tolerable settlement {settlement_mm} mm exceeds the maximum of {max_mm} mm")]
    SettlementExceeded { settlement_mm: f64, max_mm: f64 },

    /// Any other numeric input is invalid (water level, SPT value, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl BearingError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        BearingError::InvalidGeometry {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create an UnknownShape error
    pub fn unknown_shape(shape: impl Into<String>) -> Self {
        BearingError::UnknownShape {
            shape: shape.into(),
        }
    }

    /// Create a MissingProperty error
    pub fn missing_property(property: impl Into<String>) -> Self {
        BearingError::MissingProperty {
            property: property.into(),
        }
    }

    /// Create an InvalidProperty error
    pub fn invalid_property(property: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        BearingError::InvalidProperty {
            property: property.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create an InvalidVariant error
    pub fn invalid_variant(variant: impl Into<String>) -> Self {
        BearingError::InvalidVariant {
            variant: variant.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        BearingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        BearingError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether the error came from soil property validation
    pub fn is_soil_error(&self) -> bool {
        matches!(
            self,
            BearingError::MissingProperty { .. } | BearingError::InvalidProperty { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BearingError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            BearingError::UnknownShape { .. } => "UNKNOWN_SHAPE",
            BearingError::MissingProperty { .. } => "MISSING_PROPERTY",
            BearingError::InvalidProperty { .. } => "INVALID_PROPERTY",
            BearingError::InvalidVariant { .. } => "INVALID_VARIANT",
            BearingError::InvalidLoadAngle { .. } => "INVALID_LOAD_ANGLE",
            BearingError::SettlementExceeded { .. } => "SETTLEMENT_EXCEEDED",
            BearingError::InvalidInput { .. } => "INVALID_INPUT",
            BearingError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for BearingError {
    fn from(err: serde_json::Error) -> Self {
        BearingError::serialization(err.to_string())
    }
}
