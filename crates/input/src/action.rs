use crate::wheel::NormalizedWheel;

/// A high-level action any embodiment (window, headless driver) can produce.
///
/// The slider consumes actions, never raw input events. This keeps mouse,
/// touch and scripted input on the same code path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Wheel scrolled by a normalized delta.
    Wheel(NormalizedWheel),
    /// Mouse button or first touch went down at screen x.
    PointerDown { x: f64 },
    /// Pointer moved to screen x.
    PointerMove { x: f64 },
    /// Mouse button or first touch released.
    PointerUp,
    /// Input that maps to nothing.
    Noop,
}

impl Action {
    pub fn is_noop(&self) -> bool {
        matches!(self, Action::Noop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{WheelDelta, normalize_wheel};

    #[test]
    fn wheel_action_carries_pixels() {
        let a = Action::Wheel(normalize_wheel(WheelDelta::Line { x: 0.0, y: 1.0 }));
        match a {
            Action::Wheel(n) => assert_eq!(n.pixel_y, 40.0),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn pointer_actions() {
        assert!(matches!(Action::PointerDown { x: 1.0 }, Action::PointerDown { .. }));
        assert!(matches!(Action::PointerMove { x: 2.0 }, Action::PointerMove { .. }));
        assert!(matches!(Action::PointerUp, Action::PointerUp));
    }

    #[test]
    fn noop() {
        assert!(Action::Noop.is_noop());
        assert!(!Action::PointerUp.is_noop());
    }
}
