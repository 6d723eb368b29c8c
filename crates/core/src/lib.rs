//! Render-loop core: frame timing, damped cube rotation, cached MVP construction.
//!
//! Everything here is GPU-agnostic. The draw itself goes through the
//! [`FrameTarget`] trait, so the loop can be driven by a wgpu surface or by a
//! recording target in tests.
//!
//! # Invariants
//! - While auto-rotating, angular velocity is pinned to zero.
//! - The projection is rebuilt only when the aspect ratio changes or the cache
//!   was invalidated.
//! - Rotation advances after the draw call, so each frame draws the orientation
//!   left by the previous frame.
//! - A frame whose drawable cannot be acquired leaves rotation untouched.

pub mod cache;
pub mod clock;
pub mod config;
pub mod mvp;
pub mod render_loop;
pub mod rotation;
pub mod stats;

pub use cache::Cached;
pub use clock::FrameClock;
pub use config::{
    CameraConfig, ConfigError, GeometryConfig, PerformanceConfig, RendererConfig, ResourceConfig,
    RotationConfig, DAMPING_REFERENCE_RATE,
};
pub use mvp::{CameraState, MvpBuilder, aspect_ratio, model_matrix};
pub use render_loop::{FrameTarget, RenderLoop};
pub use rotation::{RotationMode, RotationState};
pub use stats::FrameTimer;
