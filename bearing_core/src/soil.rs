//! # Soil Properties
//!
//! Strength and weight parameters of the soil beneath a footing.
//!
//! Properties are validated once at construction and never mutated. The
//! local shear failure view (reduced φ and c) is derived on demand instead
//! of being written back into the record.
//!
//! ## JSON Example
//!
//! ```json
//! { "friction_angle": 20.0, "cohesion": 20.0, "moist_unit_weight": 18.0 }
//! ```
//!
//! A JSON object missing any of the three keys is rejected with
//! `MissingProperty`; unknown keys are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::equations::{arctan, round_to, tan};
use crate::errors::{BearingError, BearingResult};

/// Upper bound (exclusive) on the friction angle, degrees
pub const MAX_FRICTION_ANGLE: f64 = 90.0;

const FRICTION_ANGLE: &str = "friction_angle";
const COHESION: &str = "cohesion";
const MOIST_UNIT_WEIGHT: &str = "moist_unit_weight";

/// Validated soil parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct SoilProperties {
    /// Internal angle of friction φ (degrees)
    friction_angle: f64,
    /// Cohesion c (kPa)
    cohesion: f64,
    /// Moist unit weight γ (kN/m³)
    moist_unit_weight: f64,
}

/// Friction angle and cohesion pair, either as measured or reduced for
/// local shear failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearStrength {
    pub friction_angle: f64,
    pub cohesion: f64,
}

impl SoilProperties {
    /// Create validated soil properties.
    ///
    /// # Errors
    /// `InvalidProperty` when φ is negative or ≥ 90°, c is negative, γ is not
    /// positive, or any value is non-finite.
    ///
    /// # Example
    /// ```
    /// use bearing_core::soil::SoilProperties;
    ///
    /// let soil = SoilProperties::new(35.0, 15.0, 18.0).unwrap();
    /// assert_eq!(soil.friction_angle(), 35.0);
    /// assert!(SoilProperties::new(-1.0, 15.0, 18.0).is_err());
    /// ```
    pub fn new(friction_angle: f64, cohesion: f64, moist_unit_weight: f64) -> BearingResult<Self> {
        if !friction_angle.is_finite() || friction_angle < 0.0 {
            return Err(BearingError::invalid_property(
                FRICTION_ANGLE,
                friction_angle,
                "Friction angle cannot be negative",
            ));
        }
        if friction_angle >= MAX_FRICTION_ANGLE {
            return Err(BearingError::invalid_property(
                FRICTION_ANGLE,
                friction_angle,
                "Friction angle must be below 90 degrees",
            ));
        }
        if !cohesion.is_finite() || cohesion < 0.0 {
            return Err(BearingError::invalid_property(
                COHESION,
                cohesion,
                "Cohesion cannot be negative",
            ));
        }
        if !moist_unit_weight.is_finite() || moist_unit_weight <= 0.0 {
            return Err(BearingError::invalid_property(
                MOIST_UNIT_WEIGHT,
                moist_unit_weight,
                "Unit weight must be positive",
            ));
        }
        Ok(Self {
            friction_angle,
            cohesion,
            moist_unit_weight,
        })
    }

    /// Build soil properties from key/value pairs.
    ///
    /// Requires `friction_angle`, `cohesion` and `moist_unit_weight`; other
    /// keys are ignored.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    /// use bearing_core::soil::SoilProperties;
    ///
    /// let mut props = HashMap::new();
    /// props.insert("friction_angle", 20.0);
    /// props.insert("cohesion", 20.0);
    /// let err = SoilProperties::from_map(props).unwrap_err();
    /// assert_eq!(err.error_code(), "MISSING_PROPERTY");
    /// ```
    pub fn from_map<I, K>(entries: I) -> BearingResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut friction_angle = None;
        let mut cohesion = None;
        let mut moist_unit_weight = None;

        for (key, value) in entries {
            match key.as_ref() {
                FRICTION_ANGLE => friction_angle = Some(value),
                COHESION => cohesion = Some(value),
                MOIST_UNIT_WEIGHT => moist_unit_weight = Some(value),
                _ => {}
            }
        }

        Self::new(
            friction_angle.ok_or_else(|| BearingError::missing_property(FRICTION_ANGLE))?,
            cohesion.ok_or_else(|| BearingError::missing_property(COHESION))?,
            moist_unit_weight.ok_or_else(|| BearingError::missing_property(MOIST_UNIT_WEIGHT))?,
        )
    }

    pub fn friction_angle(&self) -> f64 {
        self.friction_angle
    }

    pub fn cohesion(&self) -> f64 {
        self.cohesion
    }

    pub fn moist_unit_weight(&self) -> f64 {
        self.moist_unit_weight
    }

    /// Reduced strength for local shear failure (Terzaghi).
    ///
    /// # Formulas
    /// ```text
    /// φ' = arctan(⅔·tan φ)
    /// c' = ⅔·c
    /// ```
    pub fn local_shear_view(&self) -> ShearStrength {
        ShearStrength {
            friction_angle: round_to(arctan(2.0 / 3.0 * tan(self.friction_angle))),
            cohesion: round_to(2.0 / 3.0 * self.cohesion),
        }
    }

    /// Strength used by an analysis: as measured, or the local shear view.
    pub fn shear_strength(&self, apply_local_shear: bool) -> ShearStrength {
        if apply_local_shear {
            self.local_shear_view()
        } else {
            ShearStrength {
                friction_angle: self.friction_angle,
                cohesion: self.cohesion,
            }
        }
    }
}

impl TryFrom<BTreeMap<String, f64>> for SoilProperties {
    type Error = BearingError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_soil() -> SoilProperties {
        SoilProperties::new(25.0, 15.0, 18.0).unwrap()
    }

    #[test]
    fn test_valid_construction() {
        let soil = test_soil();
        assert_eq!(soil.friction_angle(), 25.0);
        assert_eq!(soil.cohesion(), 15.0);
        assert_eq!(soil.moist_unit_weight(), 18.0);
    }

    #[test]
    fn test_invalid_properties() {
        let err = SoilProperties::new(-5.0, 10.0, 18.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PROPERTY");
        assert!(SoilProperties::new(20.0, -1.0, 18.0).is_err());
        assert!(SoilProperties::new(20.0, 10.0, 0.0).is_err());
        assert!(SoilProperties::new(90.0, 10.0, 18.0).is_err());
        assert!(SoilProperties::new(f64::NAN, 10.0, 18.0).is_err());
    }

    #[test]
    fn test_zero_friction_and_cohesion_allowed() {
        assert!(SoilProperties::new(0.0, 100.0, 21.0).is_ok());
        assert!(SoilProperties::new(30.0, 0.0, 18.0).is_ok());
    }

    #[test]
    fn test_from_map_missing_key() {
        let mut map = BTreeMap::new();
        map.insert("friction_angle".to_string(), 20.0);
        map.insert("moist_unit_weight".to_string(), 18.0);
        let err = SoilProperties::from_map(map).unwrap_err();
        assert_eq!(err, BearingError::missing_property("cohesion"));
    }

    #[test]
    fn test_from_map_ignores_extra_keys() {
        let entries = [
            ("friction_angle", 20.0),
            ("cohesion", 20.0),
            ("moist_unit_weight", 18.0),
            ("saturated_unit_weight", 20.0),
        ];
        let soil = SoilProperties::from_map(entries).unwrap();
        assert_eq!(soil.cohesion(), 20.0);
    }

    #[test]
    fn test_json_deserialization_validates() {
        let soil: SoilProperties =
            serde_json::from_str(r#"{"friction_angle": 20.0, "cohesion": 20.0, "moist_unit_weight": 18.0}"#)
                .unwrap();
        assert_eq!(soil.friction_angle(), 20.0);

        let missing = serde_json::from_str::<SoilProperties>(r#"{"friction_angle": 20.0, "cohesion": 20.0}"#);
        assert!(missing.is_err());
        let negative = serde_json::from_str::<SoilProperties>(
            r#"{"friction_angle": 20.0, "cohesion": -20.0, "moist_unit_weight": 18.0}"#,
        );
        assert!(negative.is_err());
    }

    #[test]
    fn test_local_shear_view() {
        let view = test_soil().local_shear_view();
        assert!((view.friction_angle - 17.27).abs() < 1e-9, "φ' = {}", view.friction_angle);
        assert_eq!(view.cohesion, 10.0);
    }

    #[test]
    fn test_local_shear_does_not_mutate() {
        let soil = test_soil();
        let _ = soil.local_shear_view();
        assert_eq!(soil.friction_angle(), 25.0);
        assert_eq!(soil.shear_strength(false).friction_angle, 25.0);
        assert_eq!(soil.shear_strength(true), soil.local_shear_view());
    }
}
