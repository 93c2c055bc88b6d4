//! Animation primitives shared by the counter animator and smooth scrolling.
//!
//! - `easing` - Pure easing functions behind the [`EasingType`] config enum
//! - `timing` - Progress and interpolation helpers driven by an explicit clock

pub mod easing;
pub mod timing;

pub use crate::config::EasingType;
pub use easing::EasingTypeExt;
