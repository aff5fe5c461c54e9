//! Input mapping: raw wheel, mouse and touch events become [`Action`]s.
//!
//! # Invariants
//! - The slider consumes actions, never raw window events.
//! - Every embodiment normalizes wheel deltas the same way, so a wheel notch
//!   moves the strip by the same amount regardless of the platform's unit.

pub mod action;
pub mod pointer;
pub mod wheel;

pub use action::Action;
pub use pointer::{PointerTracker, TouchPhase};
pub use wheel::{NormalizedWheel, WheelDelta, normalize_wheel};
