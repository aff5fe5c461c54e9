use crate::action::Action;

/// Phase of a touch point, independent of the windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Turns mouse and touch events into pointer actions.
///
/// Window systems report button presses without a position, so the tracker
/// remembers the last cursor x. For touch, only the first finger down drives
/// the strip until it lifts; other fingers are ignored.
///
/// Positions come in as physical pixels and leave as logical pixels, so a
/// drag covers the same distance on any display density.
#[derive(Debug)]
pub struct PointerTracker {
    cursor_x: Option<f64>,
    touch_id: Option<u64>,
    scale_factor: f64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self {
            cursor_x: None,
            touch_id: None,
            scale_factor: 1.0,
        }
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical pixels per logical pixel. Non-positive or non-finite values
    /// are ignored.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        } else {
            tracing::warn!(scale_factor, "ignoring invalid scale factor");
        }
    }

    fn logical(&self, physical_x: f64) -> f64 {
        physical_x / self.scale_factor
    }

    /// The cursor moved to physical `x`.
    pub fn cursor_moved(&mut self, x: f64) -> Action {
        let x = self.logical(x);
        self.cursor_x = Some(x);
        Action::PointerMove { x }
    }

    /// The cursor left the window. A press can no longer be positioned.
    pub fn cursor_left(&mut self) {
        self.cursor_x = None;
    }

    /// The primary mouse button changed state.
    pub fn button(&mut self, pressed: bool) -> Action {
        match (pressed, self.cursor_x) {
            (true, Some(x)) => Action::PointerDown { x },
            (true, None) => {
                tracing::trace!("button press before any cursor position");
                Action::Noop
            }
            (false, _) => Action::PointerUp,
        }
    }

    /// A touch point changed, at physical `x`.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, x: f64) -> Action {
        let x = self.logical(x);
        match phase {
            TouchPhase::Started => {
                if self.touch_id.is_some() {
                    return Action::Noop;
                }
                self.touch_id = Some(id);
                Action::PointerDown { x }
            }
            TouchPhase::Moved if self.touch_id == Some(id) => Action::PointerMove { x },
            TouchPhase::Ended | TouchPhase::Cancelled if self.touch_id == Some(id) => {
                self.touch_id = None;
                Action::PointerUp
            }
            _ => Action::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_uses_last_cursor_position() {
        let mut p = PointerTracker::new();
        assert_eq!(p.cursor_moved(120.0), Action::PointerMove { x: 120.0 });
        assert_eq!(p.button(true), Action::PointerDown { x: 120.0 });
        assert_eq!(p.button(false), Action::PointerUp);
    }

    #[test]
    fn press_without_cursor_is_noop() {
        let mut p = PointerTracker::new();
        assert_eq!(p.button(true), Action::Noop);
        p.cursor_moved(5.0);
        p.cursor_left();
        assert_eq!(p.button(true), Action::Noop);
    }

    #[test]
    fn first_touch_wins() {
        let mut p = PointerTracker::new();
        assert_eq!(p.touch(1, TouchPhase::Started, 10.0), Action::PointerDown { x: 10.0 });
        assert_eq!(p.touch(2, TouchPhase::Started, 50.0), Action::Noop);
        assert_eq!(p.touch(2, TouchPhase::Moved, 60.0), Action::Noop);
        assert_eq!(p.touch(1, TouchPhase::Moved, 20.0), Action::PointerMove { x: 20.0 });
        assert_eq!(p.touch(1, TouchPhase::Ended, 20.0), Action::PointerUp);
        assert_eq!(p.touch(2, TouchPhase::Started, 30.0), Action::PointerDown { x: 30.0 });
    }

    #[test]
    fn cancelled_touch_releases() {
        let mut p = PointerTracker::new();
        p.touch(7, TouchPhase::Started, 0.0);
        assert_eq!(p.touch(7, TouchPhase::Cancelled, 0.0), Action::PointerUp);
    }

    #[test]
    fn hidpi_positions_become_logical() {
        let mut p = PointerTracker::new();
        p.set_scale_factor(2.0);
        assert_eq!(p.cursor_moved(200.0), Action::PointerMove { x: 100.0 });
        assert_eq!(p.button(true), Action::PointerDown { x: 100.0 });
        assert_eq!(p.touch(1, TouchPhase::Started, 50.0), Action::PointerDown { x: 25.0 });
        assert_eq!(p.touch(1, TouchPhase::Moved, 90.0), Action::PointerMove { x: 45.0 });
    }

    #[test]
    fn invalid_scale_factor_is_ignored() {
        let mut p = PointerTracker::new();
        p.set_scale_factor(1.5);
        p.set_scale_factor(0.0);
        p.set_scale_factor(f64::NAN);
        assert_eq!(p.cursor_moved(30.0), Action::PointerMove { x: 20.0 });
    }
}
