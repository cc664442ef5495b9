//! # Geotechnical Equations
//!
//! Small, pure building blocks shared by every bearing capacity method.
//!
//! ## Modules
//!
//! - [`angles`] - Trigonometry on angles measured in degrees
//! - [`rounding`] - Engine precision and float comparison helpers
//! - [`corrections`] - Depth ratio and water table corrections
//!
//! ## Conventions
//!
//! - **Angles**: degrees at every public boundary, radians only inside `angles`
//! - **Depths**: metres below the ground surface, positive downward
//! - **Pressures**: kPa
//!
//! ## References
//!
//! - Terzaghi, K. (1943). Theoretical Soil Mechanics
//! - Hansen, J.B. (1970). A revised and extended formula for bearing capacity
//! - Vesic, A.S. (1973). Analysis of ultimate loads of shallow foundations
//! - Bowles, J.E. (1997). Foundation Analysis and Design, 5th Edition

pub mod angles;
pub mod corrections;
pub mod rounding;

pub use angles::{arctan, cos, cot, sin, tan};
pub use corrections::{depth_ratio, embedment_water_correction, surcharge_water_correction};
pub use rounding::{is_close, is_zero_angle, round_blows, round_to, DECIMAL_PLACES};
