//! Gesture input: pointer and touch samples turned into rotation gestures.
//!
//! # Invariants
//! - Positions are logical points, not physical pixels.
//! - Emitted gestures are already scaled by the current sensitivity, so
//!   consumers apply them as radians (drag) or radians/sec (fling) directly.

pub mod gesture;
pub mod sensitivity;

pub use gesture::{Gesture, PanRecognizer, PanState};
pub use sensitivity::GestureSensitivity;
