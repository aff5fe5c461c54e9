/// Pixels per scrolled line.
pub const LINE_HEIGHT: f64 = 40.0;
/// Pixels per scrolled page.
pub const PAGE_HEIGHT: f64 = 800.0;

/// A raw wheel delta in its platform unit.
///
/// Signs follow the browser convention: positive `y` scrolls the content
/// down (the strip moves toward larger offsets).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    Pixel { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Page { x: f64, y: f64 },
}

/// A wheel delta reduced to a platform-independent pixel distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedWheel {
    pub spin_x: f64,
    pub spin_y: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
}

/// Normalize a wheel delta to pixels.
///
/// Line and page deltas are scaled by [`LINE_HEIGHT`] and [`PAGE_HEIGHT`];
/// pixel deltas pass through. Line deltas carry their own spin (one notch is
/// one line); otherwise spin is the sign of the pixel distance.
pub fn normalize_wheel(delta: WheelDelta) -> NormalizedWheel {
    let (mut spin_x, mut spin_y, pixel_x, pixel_y) = match delta {
        WheelDelta::Pixel { x, y } => (0.0, 0.0, x, y),
        WheelDelta::Line { x, y } => (x, y, x * LINE_HEIGHT, y * LINE_HEIGHT),
        WheelDelta::Page { x, y } => (0.0, 0.0, x * PAGE_HEIGHT, y * PAGE_HEIGHT),
    };

    if pixel_x != 0.0 && spin_x == 0.0 {
        spin_x = if pixel_x < 1.0 { -1.0 } else { 1.0 };
    }
    if pixel_y != 0.0 && spin_y == 0.0 {
        spin_y = if pixel_y < 1.0 { -1.0 } else { 1.0 };
    }

    NormalizedWheel {
        spin_x,
        spin_y,
        pixel_x,
        pixel_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_delta_passes_through() {
        let n = normalize_wheel(WheelDelta::Pixel { x: 0.0, y: 50.0 });
        assert_eq!(n.pixel_y, 50.0);
        assert_eq!(n.spin_y, 1.0);
        assert_eq!(n.pixel_x, 0.0);
        assert_eq!(n.spin_x, 0.0);
    }

    #[test]
    fn line_delta_uses_line_height() {
        let n = normalize_wheel(WheelDelta::Line { x: 0.0, y: -3.0 });
        assert_eq!(n.pixel_y, -120.0);
        assert_eq!(n.spin_y, -3.0);
    }

    #[test]
    fn page_delta_uses_page_height() {
        let n = normalize_wheel(WheelDelta::Page { x: 1.0, y: 0.0 });
        assert_eq!(n.pixel_x, 800.0);
        assert_eq!(n.spin_x, 1.0);
        assert_eq!(n.pixel_y, 0.0);
    }

    #[test]
    fn small_positive_pixel_delta_spins_backward() {
        // Sub-pixel deltas below one report a negative spin, like the
        // browser normalization they mirror.
        let n = normalize_wheel(WheelDelta::Pixel { x: 0.0, y: 0.5 });
        assert_eq!(n.spin_y, -1.0);
        assert_eq!(n.pixel_y, 0.5);
    }
}
