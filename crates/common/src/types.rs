use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Visible extent of the scene plane at z = 0, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half the viewport width, rounded to the nearest integer.
    ///
    /// This is the modulus of the boundary wrap check; zero means the
    /// viewport is too small to lay items out.
    pub fn rounded_half_width(&self) -> i64 {
        (self.width / 2.0).round() as i64
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Width:height ratio of every slide plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub x: f64,
    pub y: f64,
}

impl AspectRatio {
    pub fn ratio(&self) -> f64 {
        self.x / self.y
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self { x: 2.0, y: 3.0 }
    }
}

/// Sign of the most recent scroll motion.
///
/// `Forward` (+1) means `current` decreased during the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    #[default]
    Backward,
}

impl Direction {
    /// Sign of the frame's movement along the strip.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Scale of a visible plane (the item footprint minus its gap).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneSize {
    pub width: f64,
    pub height: f64,
}

impl PlaneSize {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// What a render back-end receives for one plane each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneTransform {
    pub position: Vec2,
    pub scale: Vec2,
}

impl Default for PlaneTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}
