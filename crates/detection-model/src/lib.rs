//! touchtrace Detection Model
//!
//! Defines the data contracts shared by the classifier and its callers:
//! - **Geometry:** screen points and distances
//! - **Detections:** per-frame taps from the upstream touch/opacity detectors
//! - **Actions:** typed gestures (CLICK, LONG_CLICK, SWIPE) produced by classification
//! - **Validation:** preconditions the detection sequence must satisfy
//!
//! Coordinates are in pixels of the recorded video.

pub mod action;
pub mod detection;
pub mod geometry;
pub mod validation;

pub use action::*;
pub use detection::*;
pub use geometry::*;
pub use validation::*;
