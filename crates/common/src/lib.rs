//! Shared value types used across the carousel crates.

mod types;

pub use types::{AspectRatio, Direction, PlaneSize, PlaneTransform, Viewport};
