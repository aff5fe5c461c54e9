//! Carousel kernel: scroll physics, slide layout, infinite wrapping.
//!
//! # Invariants
//! - Input only ever moves `target`; `current` moves once per frame.
//! - Every item's `base_x` stays congruent, modulo the track width, to its
//!   layout-time placement. Wrapping teleports by whole tracks only.
//! - Layout is a pure function of viewport, config and index.

pub mod config;
pub mod debounce;
pub mod error;
pub mod item;
pub mod scroll;
pub mod slider;

pub use config::{Sizing, SliderConfig, WrapTrigger};
pub use debounce::{DEFAULT_RESIZE_DEBOUNCE, Debouncer};
pub use error::SliderError;
pub use item::{ItemMetrics, SlideItem, Wrap, boundary_crossed};
pub use scroll::ScrollState;
pub use slider::{Slider, WrapEvent};
