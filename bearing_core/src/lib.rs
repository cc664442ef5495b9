//! # bearing_core - Soil Bearing Capacity Engine
//!
//! `bearing_core` computes the ultimate and allowable bearing capacity of
//! soils beneath shallow foundations using the classical empirical methods
//! of Terzaghi, Hansen, Vesic, Bowles and Meyerhof. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of soil, geometry and site conditions
//! - **Validated at construction**: Invalid inputs never reach a formula
//! - **JSON-First**: Requests and reports implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use bearing_core::foundation::create_foundation;
//! use bearing_core::soil::SoilProperties;
//! use bearing_core::ultimate::{AnalysisOptions, Terzaghi, UltimateBearingCapacity};
//!
//! let soil = SoilProperties::new(35.0, 15.0, 18.0).unwrap();
//! let footing = create_foundation(1.0, 1.2, None, None, "strip").unwrap();
//! let ubc = UltimateBearingCapacity::with_options(
//!     soil,
//!     footing,
//!     Terzaghi::default(),
//!     AnalysisOptions::default(),
//! )
//! .unwrap();
//!
//! assert!((ubc.bearing_capacity() - 2114.59).abs() < 0.05);
//! ```
//!
//! ## Modules
//!
//! - [`foundation`] - Footing shapes, foundation size and effective geometry
//! - [`soil`] - Soil strength and weight parameters
//! - [`ultimate`] - Ultimate bearing capacity (Terzaghi, Hansen, Vesic)
//! - [`allowable`] - SPT-based allowable capacity (Bowles, Meyerhof, Terzaghi & Peck)
//! - [`spt`] - SPT N-value corrections and design values
//! - [`estimators`] - Friction angle, unit weight and undrained strength from N60
//! - [`cache`] - Optional memoisation of bearing capacity factors
//! - [`calculations`] - JSON request/report entry points
//! - [`equations`] - Shared formulas, trigonometry and rounding
//! - [`errors`] - Structured error types

pub mod allowable;
pub mod cache;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod estimators;
pub mod foundation;
pub mod soil;
pub mod spt;
pub mod ultimate;

// Re-export commonly used types at crate root for convenience
pub use allowable::{AllowableBearingCapacity, AllowableMethod};
pub use calculations::{AnalysisReport, AnalysisRequest};
pub use errors::{BearingError, BearingResult};
pub use foundation::{create_foundation, Footing, FootingDimensions, FoundationSize, FoundationType, Shape};
pub use soil::SoilProperties;
pub use ultimate::{AnalysisOptions, Hansen, Method, Terzaghi, TerzaghiVariant, UltimateBearingCapacity, Vesic};
