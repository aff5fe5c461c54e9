//! wgpu render backend for the carousel.
//!
//! Draws one subdivided, textured plane per slide. Every plane shares the
//! mesh and pipeline and owns its texture, uniform buffer and bind group.
//!
//! # Invariants
//! - Renderer never mutates slider state.
//! - Plane values are staged on the CPU and uploaded once per frame.
//! - Camera sits on +Z looking at the slide plane through the origin.

mod camera;
mod gpu;
mod shaders;

pub use camera::PerspectiveCamera;
pub use gpu::{FrameTarget, WgpuRenderer};
