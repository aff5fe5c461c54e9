//! Rendering adapter: renderer-agnostic plane back-end interface.
//!
//! # Invariants
//! - Back-ends never mutate slider state; they receive positions, scales and
//!   uniforms pushed from it.
//! - Positions are pushed every frame, size uniforms only on layout changes.
//!
//! The [`TextBackend`] records what it was given and renders it as text.
//! The CLI and tests use it; the desktop app swaps in the wgpu back-end
//! without changing the sync code.

mod renderer;
mod view;

pub use renderer::{
    PlaneBackend, PlaneRecord, TextBackend, Uniform, push_image_size, push_layout_uniforms,
    push_transforms,
};
pub use view::RenderView;

pub fn crate_info() -> &'static str {
    "carousel-render v0.1.0"
}
