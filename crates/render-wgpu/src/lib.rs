//! wgpu render backend for the spinning cube.
//!
//! Owns the GPU side: device and surface setup, cube buffers, pipeline,
//! texture and sampler, and a [`spincube_core::FrameTarget`] implementation
//! that draws into the window surface.
//!
//! # Invariants
//! - Resources are created once at startup; only the depth buffer and the
//!   lazily loaded texture are rebuilt, on resize.
//! - Each cube draw is exactly one queue submission.
//! - A missing or unreadable texture never fails setup; a procedural
//!   checkerboard is used instead.

mod context;
mod error;
mod gpu;
pub mod mesh;
mod shaders;
mod surface;
pub mod texture;

pub use context::GpuContext;
pub use error::RenderError;
pub use gpu::{CubeRenderer, Viewport};
pub use surface::{SurfaceFrame, SurfaceTarget};
