use carousel_common::Direction;

use crate::config::SliderConfig;

/// Interpolated scroll offset shared by every slide.
///
/// Input handlers only move `target`. [`ScrollState::advance`] moves
/// `current` toward it once per frame and applies the idle drift.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    pub current: f64,
    pub target: f64,
    pub last: f64,
    pub ease: f64,
    pub drift_step: f64,
    pub wheel_scale: f64,
    pub drag_scale: f64,
    pub direction: Direction,
    /// Pointer x at drag start; `Some` only while dragging.
    pub drag_start: Option<f64>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(&SliderConfig::default())
    }
}

impl ScrollState {
    pub fn new(config: &SliderConfig) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            last: 0.0,
            ease: config.ease,
            drift_step: config.drift_step,
            wheel_scale: config.wheel_scale,
            drag_scale: config.drag_scale,
            direction: Direction::default(),
            drag_start: None,
        }
    }

    /// Advance one frame: ease toward the target, derive the direction from
    /// the motion just made, drift the target, then remember `current`.
    pub fn advance(&mut self) {
        self.current = lerp(self.current, self.target, self.ease);

        self.direction = if self.current < self.last {
            Direction::Forward
        } else {
            Direction::Backward
        };

        match self.direction {
            Direction::Backward => self.target += self.drift_step,
            Direction::Forward => self.target -= self.drift_step,
        }

        self.last = self.current;
    }

    /// Wheel moved by a normalized pixel distance.
    pub fn on_wheel(&mut self, pixel_y: f64) {
        if !pixel_y.is_finite() {
            tracing::debug!(pixel_y, "ignoring non-finite wheel delta");
            return;
        }
        self.target += pixel_y * self.wheel_scale;
    }

    /// Pointer pressed at screen x. A repeated press restarts the drag.
    pub fn on_pointer_down(&mut self, x: f64) {
        if !x.is_finite() {
            tracing::debug!(x, "ignoring non-finite pointer position");
            return;
        }
        self.drag_start = Some(x);
    }

    /// Pointer moved to screen x. The target is placed relative to the live
    /// position, so a drag is absolute rather than cumulative.
    pub fn on_pointer_move(&mut self, x: f64) {
        let Some(start) = self.drag_start else {
            return;
        };
        if !x.is_finite() {
            tracing::debug!(x, "ignoring non-finite pointer position");
            return;
        }
        let distance = (start - x) * self.drag_scale;
        self.target = self.current + distance;
    }

    pub fn on_pointer_up(&mut self) {
        self.drag_start = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_distance_law() {
        let mut s = ScrollState::default();
        s.on_pointer_down(100.0);
        s.on_pointer_move(40.0);
        assert_eq!(s.target, 3.0);
        assert_eq!(s.current, 0.0);
    }

    #[test]
    fn drag_is_relative_to_current_not_target() {
        let mut s = ScrollState::default();
        s.current = 10.0;
        s.target = 50.0;
        s.on_pointer_down(100.0);
        s.on_pointer_move(80.0);
        assert_eq!(s.target, 11.0);
    }

    #[test]
    fn wheel_law() {
        let mut s = ScrollState::default();
        s.target = 2.5;
        s.on_wheel(50.0);
        assert_eq!(s.target, 3.5);
        assert_eq!(s.current, 0.0);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut s = ScrollState::default();
        s.on_pointer_move(40.0);
        assert_eq!(s.target, 0.0);

        s.on_pointer_down(100.0);
        s.on_pointer_up();
        s.on_pointer_move(40.0);
        assert_eq!(s.target, 0.0);
        assert!(!s.is_dragging());
    }

    #[test]
    fn repeated_press_overwrites_start() {
        let mut s = ScrollState::default();
        s.on_pointer_down(100.0);
        s.on_pointer_down(60.0);
        s.on_pointer_down(60.0);
        assert_eq!(s.drag_start, Some(60.0));
        s.on_pointer_move(40.0);
        assert_eq!(s.target, 1.0);
    }

    #[test]
    fn non_finite_input_never_reaches_target() {
        let mut s = ScrollState::default();
        s.on_wheel(f64::NAN);
        s.on_wheel(f64::INFINITY);
        s.on_pointer_down(f64::NAN);
        assert!(!s.is_dragging());
        s.on_pointer_down(10.0);
        s.on_pointer_move(f64::NEG_INFINITY);
        assert_eq!(s.target, 0.0);
    }

    #[test]
    fn advance_eases_toward_target() {
        let mut s = ScrollState {
            drift_step: 0.0,
            ..ScrollState::default()
        };
        s.target = 100.0;
        s.advance();
        assert!((s.current - 4.0).abs() < 1e-12);
        for _ in 0..500 {
            s.advance();
        }
        assert!((s.current - 100.0).abs() < 1e-6);
    }

    #[test]
    fn idle_drift_scrolls_forward_in_offset() {
        let mut s = ScrollState::default();
        // Nothing moved yet: current == last, so direction is -1 and the
        // target drifts up.
        s.advance();
        assert_eq!(s.direction, Direction::Backward);
        assert!((s.target - 0.02).abs() < 1e-12);
        assert_eq!(s.last, s.current);
    }

    #[test]
    fn direction_follows_observed_motion() {
        let mut s = ScrollState::default();
        s.current = 10.0;
        s.last = 10.0;
        s.target = 0.0;
        s.advance();
        assert_eq!(s.direction, Direction::Forward);
        // Moving toward smaller offsets drifts the target down as well.
        assert!((s.target + 0.02).abs() < 1e-12);
    }
}
