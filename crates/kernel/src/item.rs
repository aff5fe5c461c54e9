use carousel_common::{Direction, PlaneSize, Viewport};

use crate::config::WrapTrigger;
use crate::scroll::ScrollState;

/// Plane size and footprint shared by every item at a given viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemMetrics {
    pub plane: PlaneSize,
    /// Plane width plus the gap.
    pub width: f64,
}

/// A teleport of one item by whole tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wrap {
    pub from_base_x: f64,
    pub to_base_x: f64,
}

/// One slide plane on the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideItem {
    index: usize,
    count: usize,
    base_x: f64,
    width: f64,
    track_width: f64,
    plane: PlaneSize,
    viewport: Viewport,
}

impl SlideItem {
    pub fn new(index: usize, count: usize, viewport: Viewport, metrics: ItemMetrics) -> Self {
        let mut item = Self {
            index,
            count,
            base_x: 0.0,
            width: 0.0,
            track_width: 0.0,
            plane: PlaneSize::default(),
            viewport,
        };
        item.layout(viewport, metrics);
        item
    }

    /// Recompute size and home position for a viewport. Discards any wrap
    /// offset accumulated so far.
    pub fn layout(&mut self, viewport: Viewport, metrics: ItemMetrics) {
        self.viewport = viewport;
        self.plane = metrics.plane;
        self.width = metrics.width;
        self.track_width = metrics.width * self.count as f64;
        self.base_x = (-viewport.width / 2.0 + self.width / 2.0) + self.index as f64 * self.width;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn base_x(&self) -> f64 {
        self.base_x
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    pub fn plane(&self) -> PlaneSize {
        self.plane
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// On-screen x for a scroll offset.
    pub fn render_x(&self, current: f64) -> f64 {
        self.base_x - current
    }

    /// Per-frame update. Returns the teleport, if one happened.
    pub fn update(&mut self, scroll: &ScrollState, trigger: WrapTrigger) -> Option<Wrap> {
        let from_base_x = self.base_x;
        match trigger {
            WrapTrigger::Boundary => self.wrap_on_boundary(scroll),
            WrapTrigger::Threshold => self.wrap_on_threshold(scroll.current),
        }
        (self.base_x != from_base_x).then_some(Wrap {
            from_base_x,
            to_base_x: self.base_x,
        })
    }

    fn wrap_on_boundary(&mut self, scroll: &ScrollState) {
        let render_x = self.render_x(scroll.current);
        let half = self.viewport.rounded_half_width();
        if !boundary_crossed(render_x, self.width, scroll.direction, half) {
            return;
        }
        match scroll.direction {
            Direction::Backward if render_x < 0.0 => self.base_x += self.track_width,
            Direction::Forward if render_x > 0.0 => self.base_x -= self.track_width,
            _ => {}
        }
    }

    fn wrap_on_threshold(&mut self, current: f64) {
        let half_track = self.track_width / 2.0;
        let render_x = self.render_x(current);
        if render_x < -half_track {
            let tracks = ((-half_track - render_x) / self.track_width).ceil();
            self.base_x += tracks * self.track_width;
        } else if render_x > half_track {
            let tracks = ((render_x - half_track) / self.track_width).ceil();
            self.base_x -= tracks * self.track_width;
        }
    }
}

/// Whether an item's trailing edge sits exactly on a non-zero multiple of
/// the rounded half viewport.
///
/// `half` must be non-zero; the slider rejects viewports where it is not.
pub fn boundary_crossed(render_x: f64, width: f64, direction: Direction, half: i64) -> bool {
    let edge = render_x - f64::from(direction.sign()) * width / 2.0;
    let b = edge.round() as i64;
    b != 0 && b % half == 0
}
