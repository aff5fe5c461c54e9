use carousel_common::{AspectRatio, PlaneSize, Viewport};
use serde::{Deserialize, Serialize};

use crate::error::SliderError;
use crate::item::ItemMetrics;

/// How an item's plane size is derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// Fit `count` items across the viewport width.
    PerScreen(u32),
    /// Plane height is this fraction of the viewport height.
    ScaleFactor(f64),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::PerScreen(3)
    }
}

impl Sizing {
    /// Derive plane size and item footprint for a viewport.
    ///
    /// The gap is a fraction of the viewport width and is added to the plane
    /// width to form the footprint.
    pub fn derive(&self, viewport: Viewport, aspect: AspectRatio, gap: f64) -> ItemMetrics {
        let responsive_gap = gap * viewport.width;
        let plane = match *self {
            Sizing::PerScreen(count) => {
                let width = viewport.width / f64::from(count) - responsive_gap;
                PlaneSize {
                    width,
                    height: width / aspect.ratio(),
                }
            }
            Sizing::ScaleFactor(factor) => {
                let height = viewport.height * factor;
                PlaneSize {
                    width: height * aspect.ratio(),
                    height,
                }
            }
        };
        ItemMetrics {
            plane,
            width: plane.width + responsive_gap,
        }
    }
}

/// Rule deciding when an item is teleported by one track width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapTrigger {
    /// Wrap when the item's trailing edge lands exactly on a multiple of the
    /// rounded half viewport. Can miss the crossing under fast scroll.
    #[default]
    Boundary,
    /// Keep every item within half a track of the centre.
    Threshold,
}

/// Tunables for a slider. Every field has a default, so a partial
/// `options` block in a manifest is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Interpolation factor toward the target, in (0, 1].
    pub ease: f64,
    /// Idle auto-scroll applied to the target every frame.
    pub drift_step: f64,
    /// Offset per normalized wheel pixel.
    pub wheel_scale: f64,
    /// Offset per dragged screen pixel.
    pub drag_scale: f64,
    pub sizing: Sizing,
    pub aspect_ratio: AspectRatio,
    /// Gap between planes as a fraction of the viewport width.
    pub gap: f64,
    pub wrap: WrapTrigger,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            ease: 0.04,
            drift_step: 0.02,
            wheel_scale: 0.02,
            drag_scale: 0.05,
            sizing: Sizing::default(),
            aspect_ratio: AspectRatio::default(),
            gap: 0.1,
            wrap: WrapTrigger::default(),
        }
    }
}

impl SliderConfig {
    /// Reject values that would make the scroll or layout math degenerate.
    pub fn validate(&self) -> Result<(), SliderError> {
        if !(self.ease.is_finite() && self.ease > 0.0 && self.ease <= 1.0) {
            return Err(invalid("ease", self.ease));
        }
        for (name, value) in [
            ("drift_step", self.drift_step),
            ("wheel_scale", self.wheel_scale),
            ("drag_scale", self.drag_scale),
        ] {
            if !value.is_finite() {
                return Err(invalid(name, value));
            }
        }
        match self.sizing {
            Sizing::PerScreen(0) => return Err(invalid("sizing.per_screen", 0)),
            Sizing::ScaleFactor(f) if !(f.is_finite() && f > 0.0) => {
                return Err(invalid("sizing.scale_factor", f));
            }
            _ => {}
        }
        let aspect = self.aspect_ratio;
        if !(aspect.x.is_finite() && aspect.x > 0.0 && aspect.y.is_finite() && aspect.y > 0.0) {
            return Err(invalid("aspect_ratio", format!("{}:{}", aspect.x, aspect.y)));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(invalid("gap", self.gap));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: impl ToString) -> SliderError {
    SliderError::InvalidOption {
        name,
        value: value.to_string(),
    }
}
