//! # Foundation Geometry
//!
//! Footing shapes and the size of a shallow foundation: embedment depth,
//! plan dimensions and load eccentricity.
//!
//! A [`Footing`] carries exactly the dimensions its shape needs, so a
//! rectangular footing without a length cannot be represented. The discrete
//! [`Shape`] tag is what the factor tables match on.
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::foundation::{create_foundation, Shape};
//!
//! let fs = create_foundation(1.5, 2.0, None, Some(0.2), "square").unwrap();
//! assert_eq!(fs.shape(), Shape::Square);
//! assert!((fs.effective_width() - 1.6).abs() < 1e-12);
//! // Eccentric square footings are analysed as rectangles
//! assert_eq!(fs.effective_shape(), Shape::Rectangle);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::rounding::REL_TOLERANCE;
use crate::errors::{BearingError, BearingResult};

// ============================================================================
// Shape
// ============================================================================

/// Plan shape of a footing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Long continuous footing (L → ∞)
    #[default]
    Strip,
    /// Square pad (B = L)
    Square,
    /// Circular pad (diameter = B = L)
    #[serde(alias = "circular")]
    Circle,
    /// Rectangular pad (B < L)
    #[serde(alias = "rectangular")]
    Rectangle,
}

impl Shape {
    /// All shapes in display order
    pub const ALL: [Shape; 4] = [Shape::Strip, Shape::Square, Shape::Circle, Shape::Rectangle];

    /// Display name for UI and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Shape::Strip => "Strip",
            Shape::Square => "Square",
            Shape::Circle => "Circle",
            Shape::Rectangle => "Rectangle",
        }
    }

    /// Lowercase tag used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            Shape::Strip => "strip",
            Shape::Square => "square",
            Shape::Circle => "circle",
            Shape::Rectangle => "rectangle",
        }
    }

    /// Parse a shape tag, ignoring case and surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use bearing_core::foundation::Shape;
    /// assert_eq!(Shape::from_str_flexible(" Circular ").unwrap(), Shape::Circle);
    /// assert!(Shape::from_str_flexible("hexagon").is_err());
    /// ```
    pub fn from_str_flexible(s: &str) -> BearingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "strip" => Ok(Shape::Strip),
            "square" => Ok(Shape::Square),
            "circle" | "circular" => Ok(Shape::Circle),
            "rectangle" | "rectangular" => Ok(Shape::Rectangle),
            _ => Err(BearingError::unknown_shape(s)),
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Footing
// ============================================================================

/// Plan dimensions of a footing, by shape.
///
/// In JSON a footing is always a shape tag plus a uniform `width` (the
/// diameter for circles) and, for rectangles, a `length`. See
/// [`FootingDimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FootingDimensions", into = "FootingDimensions")]
pub enum Footing {
    Strip { width: f64 },
    Square { width: f64 },
    Circular { diameter: f64 },
    Rectangular { width: f64, length: f64 },
}

impl Footing {
    /// Build a footing from a shape tag and its dimensions.
    ///
    /// `length` is required for rectangles and ignored otherwise, although a
    /// supplied non-positive length is still rejected.
    pub fn new(shape: Shape, width: f64, length: Option<f64>) -> BearingResult<Self> {
        if let Some(l) = length {
            check_positive("length", l)?;
        }
        let footing = match shape {
            Shape::Strip => Footing::Strip { width },
            Shape::Square => Footing::Square { width },
            Shape::Circle => Footing::Circular { diameter: width },
            Shape::Rectangle => {
                let length = length.ok_or_else(|| {
                    BearingError::invalid_geometry("length", f64::NAN, "Rectangular footing requires a length")
                })?;
                Footing::Rectangular { width, length }
            }
        };
        footing.validate()?;
        Ok(footing)
    }

    /// Check that every dimension is finite and positive.
    pub fn validate(&self) -> BearingResult<()> {
        match *self {
            Footing::Strip { width } | Footing::Square { width } => check_positive("width", width),
            Footing::Circular { diameter } => check_positive("diameter", diameter),
            Footing::Rectangular { width, length } => {
                check_positive("width", width)?;
                check_positive("length", length)
            }
        }
    }

    /// Least plan dimension (diameter for circular footings)
    pub fn width(&self) -> f64 {
        match *self {
            Footing::Strip { width } | Footing::Square { width } | Footing::Rectangular { width, .. } => width,
            Footing::Circular { diameter } => diameter,
        }
    }

    /// Long plan dimension; infinite for strip footings
    pub fn length(&self) -> f64 {
        match *self {
            Footing::Strip { .. } => f64::INFINITY,
            Footing::Square { width } => width,
            Footing::Circular { diameter } => diameter,
            Footing::Rectangular { length, .. } => length,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Footing::Strip { .. } => Shape::Strip,
            Footing::Square { .. } => Shape::Square,
            Footing::Circular { .. } => Shape::Circle,
            Footing::Rectangular { .. } => Shape::Rectangle,
        }
    }
}

/// Unvalidated footing description as it appears in JSON.
///
/// ## JSON Example
///
/// ```json
/// { "shape": "Circular", "width": 2.3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingDimensions {
    /// Shape tag, case-insensitive (see [`Shape::from_str_flexible`])
    pub shape: String,
    /// Width, or diameter for circular footings (m)
    pub width: f64,
    /// Length (m); required for rectangles only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl FootingDimensions {
    pub fn new(shape: impl Into<String>, width: f64, length: Option<f64>) -> Self {
        Self {
            shape: shape.into(),
            width,
            length,
        }
    }

    /// Parse the shape tag and validate the dimensions.
    ///
    /// # Errors
    /// - `UnknownShape` if the tag is not recognised
    /// - `InvalidGeometry` for non-positive dimensions or a rectangle without a length
    pub fn to_footing(&self) -> BearingResult<Footing> {
        let shape = Shape::from_str_flexible(&self.shape)?;
        Footing::new(shape, self.width, self.length)
    }
}

impl From<Footing> for FootingDimensions {
    fn from(footing: Footing) -> Self {
        let length = match footing {
            Footing::Rectangular { length, .. } => Some(length),
            _ => None,
        };
        Self::new(footing.shape().code(), footing.width(), length)
    }
}

impl TryFrom<FootingDimensions> for Footing {
    type Error = BearingError;

    fn try_from(dims: FootingDimensions) -> Result<Self, Self::Error> {
        dims.to_footing()
    }
}

fn check_positive(field: &str, value: f64) -> BearingResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BearingError::invalid_geometry(field, value, "Must be a positive, finite value"));
    }
    Ok(())
}

// ============================================================================
// Foundation size
// ============================================================================

/// Depth, footing and eccentricity of a shallow foundation.
///
/// Immutable once constructed; all derived quantities are computed on read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoundationSize {
    depth: f64,
    footing: Footing,
    eccentricity: f64,
}

impl FoundationSize {
    /// Create a foundation size, validating every dimension.
    pub fn new(depth: f64, footing: Footing, eccentricity: f64) -> BearingResult<Self> {
        check_positive("depth", depth)?;
        footing.validate()?;
        if !eccentricity.is_finite() || eccentricity < 0.0 {
            return Err(BearingError::invalid_geometry(
                "eccentricity",
                eccentricity,
                "Eccentricity cannot be negative",
            ));
        }
        Ok(Self {
            depth,
            footing,
            eccentricity,
        })
    }

    /// Depth of the footing base below ground surface (m)
    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn footing(&self) -> &Footing {
        &self.footing
    }

    /// Nominal width B (m)
    pub fn width(&self) -> f64 {
        self.footing.width()
    }

    /// Length L (m); infinite for strip footings
    pub fn length(&self) -> f64 {
        self.footing.length()
    }

    /// Load eccentricity along the width (m)
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Declared shape
    pub fn shape(&self) -> Shape {
        self.footing.shape()
    }

    /// Effective width B' = B - 2e (Meyerhof)
    ///
    /// May be zero or negative for large eccentricities; see
    /// [`Self::is_effective_width_positive`].
    pub fn effective_width(&self) -> f64 {
        self.width() - 2.0 * self.eccentricity
    }

    pub fn is_effective_width_positive(&self) -> bool {
        self.effective_width() > 0.0
    }

    /// Shape used by the shape-factor tables.
    ///
    /// A square or circular footing whose effective width no longer equals
    /// its length is analysed as a rectangle.
    pub fn effective_shape(&self) -> Shape {
        let shape = self.shape();
        if shape == Shape::Strip {
            return shape;
        }
        let b = self.effective_width();
        let l = self.length();
        if (b - l).abs() > REL_TOLERANCE * b.abs().max(l.abs()) {
            Shape::Rectangle
        } else {
            shape
        }
    }

    /// D/B using the nominal width
    pub fn depth_to_width_ratio(&self) -> f64 {
        self.depth / self.width()
    }
}

/// Create a [`FoundationSize`] from loose parameters.
///
/// # Errors
/// - `UnknownShape` if `shape` is not a recognised tag
/// - `InvalidGeometry` for non-positive depth, width or length, a negative
///   eccentricity, or a rectangle without a length
///
/// # Example
/// ```
/// use bearing_core::foundation::create_foundation;
///
/// let fs = create_foundation(1.0, 1.5, Some(2.5), None, "rectangular").unwrap();
/// assert_eq!(fs.length(), 2.5);
/// assert!(create_foundation(1.0, 1.5, None, None, "rectangular").is_err());
/// ```
pub fn create_foundation(
    depth: f64,
    width: f64,
    length: Option<f64>,
    eccentricity: Option<f64>,
    shape: &str,
) -> BearingResult<FoundationSize> {
    let shape = Shape::from_str_flexible(shape)?;
    let footing = Footing::new(shape, width, length)?;
    FoundationSize::new(depth, footing, eccentricity.unwrap_or(0.0))
}

// ============================================================================
// Foundation type
// ============================================================================

/// Foundation type used by the allowable (SPT based) capacity methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FoundationType {
    /// Isolated pad or strip footing
    #[default]
    Pad,
    /// Raft / mat foundation
    Mat,
}

impl FoundationType {
    pub const ALL: [FoundationType; 2] = [FoundationType::Pad, FoundationType::Mat];

    pub fn display_name(&self) -> &'static str {
        match self {
            FoundationType::Pad => "Pad",
            FoundationType::Mat => "Mat",
        }
    }

    /// Parse a foundation type, ignoring case ("pad", "mat", "raft")
    pub fn from_str_flexible(s: &str) -> BearingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "pad" => Ok(FoundationType::Pad),
            "mat" | "raft" => Ok(FoundationType::Mat),
            _ => Err(BearingError::invalid_input(
                "foundation_type",
                s,
                "Expected 'pad' or 'mat'",
            )),
        }
    }
}

impl std::fmt::Display for FoundationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_parsing() {
        assert_eq!(Shape::from_str_flexible("STRIP").unwrap(), Shape::Strip);
        assert_eq!(Shape::from_str_flexible("square").unwrap(), Shape::Square);
        assert_eq!(Shape::from_str_flexible("circle").unwrap(), Shape::Circle);
        assert_eq!(Shape::from_str_flexible("Rectangle").unwrap(), Shape::Rectangle);

        let err = Shape::from_str_flexible("oval").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_SHAPE");
    }

    #[test]
    fn test_shape_codes_roundtrip() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_str_flexible(shape.code()).unwrap(), shape);
        }
    }

    #[test]
    fn test_footing_dimensions() {
        let strip = Footing::new(Shape::Strip, 1.2, None).unwrap();
        assert_eq!(strip.width(), 1.2);
        assert!(strip.length().is_infinite());

        let circle = Footing::new(Shape::Circle, 2.3, None).unwrap();
        assert_eq!(circle.width(), 2.3);
        assert_eq!(circle.length(), 2.3);
        assert_eq!(circle.shape(), Shape::Circle);

        let square = Footing::new(Shape::Square, 2.0, Some(5.0)).unwrap();
        assert_eq!(square.length(), 2.0);
    }

    #[test]
    fn test_rectangle_requires_length() {
        let err = Footing::new(Shape::Rectangle, 1.5, None).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        let rect = Footing::new(Shape::Rectangle, 1.5, Some(2.5)).unwrap();
        assert_eq!(rect.length(), 2.5);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Footing::new(Shape::Square, 0.0, None).is_err());
        assert!(Footing::new(Shape::Square, -2.0, None).is_err());
        assert!(Footing::new(Shape::Strip, f64::NAN, None).is_err());
        assert!(Footing::new(Shape::Strip, 1.0, Some(-1.0)).is_err());
        assert!(create_foundation(0.0, 1.0, None, None, "strip").is_err());
        assert!(create_foundation(1.0, 1.0, None, Some(-0.1), "strip").is_err());
    }

    #[test]
    fn test_unknown_shape_through_create() {
        let err = create_foundation(1.0, 1.0, None, None, "triangle").unwrap_err();
        assert_eq!(err, BearingError::unknown_shape("triangle"));
    }

    #[test]
    fn test_effective_width_and_shape() {
        let fs = create_foundation(1.5, 2.0, None, None, "square").unwrap();
        assert_eq!(fs.effective_width(), 2.0);
        assert_eq!(fs.effective_shape(), Shape::Square);

        let eccentric = create_foundation(1.0, 1.5, None, Some(0.2), "square").unwrap();
        assert!((eccentric.effective_width() - 1.1).abs() < 1e-12);
        assert_eq!(eccentric.effective_shape(), Shape::Rectangle);

        let strip = create_foundation(1.0, 1.5, None, Some(0.2), "strip").unwrap();
        assert_eq!(strip.effective_shape(), Shape::Strip);

        let rect = create_foundation(1.0, 1.5, Some(2.5), None, "rectangle").unwrap();
        assert_eq!(rect.effective_shape(), Shape::Rectangle);
    }

    #[test]
    fn test_effective_width_can_be_non_positive() {
        let fs = create_foundation(1.0, 1.0, None, Some(0.6), "strip").unwrap();
        assert!(!fs.is_effective_width_positive());
    }

    #[test]
    fn test_footing_json() {
        let footing: Footing = serde_json::from_str(r#"{"shape": "rectangle", "width": 1.5, "length": 2.5}"#).unwrap();
        assert_eq!(footing, Footing::Rectangular { width: 1.5, length: 2.5 });
        let circle: Footing = serde_json::from_str(r#"{"shape": "Circular", "width": 2.3}"#).unwrap();
        assert_eq!(circle, Footing::Circular { diameter: 2.3 });

        let json = serde_json::to_string(&circle).unwrap();
        assert_eq!(json, r#"{"shape":"circle","width":2.3}"#);
        assert!(serde_json::from_str::<Footing>(r#"{"shape": "hexagon", "width": 2.0}"#).is_err());
    }

    #[test]
    fn test_footing_dimensions_errors() {
        let err = FootingDimensions::new("hexagon", 2.0, None).to_footing().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_SHAPE");
        let err = FootingDimensions::new("Rectangle", 2.0, None).to_footing().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        let square = FootingDimensions::new(" SQUARE ", 2.0, None).to_footing().unwrap();
        assert_eq!(square, Footing::Square { width: 2.0 });
    }

    #[test]
    fn test_footing_dimensions_roundtrip() {
        for footing in [
            Footing::Strip { width: 1.2 },
            Footing::Square { width: 2.0 },
            Footing::Circular { diameter: 2.3 },
            Footing::Rectangular { width: 1.5, length: 2.5 },
        ] {
            assert_eq!(FootingDimensions::from(footing).to_footing().unwrap(), footing);
        }
    }

    #[test]
    fn test_foundation_type_parsing() {
        assert_eq!(FoundationType::from_str_flexible("Pad").unwrap(), FoundationType::Pad);
        assert_eq!(FoundationType::from_str_flexible("raft").unwrap(), FoundationType::Mat);
        assert!(FoundationType::from_str_flexible("pile").is_err());
    }
}
