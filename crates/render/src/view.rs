use carousel_common::Viewport;

/// Camera configuration shared by every back-end.
///
/// The camera looks down -Z at the slide plane through the origin, so the
/// visible world-space extent at z = 0 follows from the field of view and
/// the camera distance alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera distance from the slide plane.
    pub eye_z: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Clear color (linear RGBA).
    pub clear_color: [f64; 4],
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye_z: 20.0,
            fov_degrees: 45.0,
            clear_color: [0.79, 0.79, 0.74, 1.0],
        }
    }
}

impl RenderView {
    /// Visible extent of the z = 0 plane for a surface aspect ratio.
    pub fn viewport(&self, aspect: f32) -> Viewport {
        let fov = f64::from(self.fov_degrees).to_radians();
        let height = 2.0 * (fov / 2.0).tan() * f64::from(self.eye_z);
        Viewport::new(height * f64::from(aspect), height)
    }

    /// Viewport for a surface size in pixels, or `None` for a zero-sized
    /// (minimized) surface, which has no meaningful aspect.
    pub fn viewport_for_surface(&self, width: u32, height: u32) -> Option<Viewport> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(self.viewport(width as f32 / height as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 45.0);
        assert_eq!(view.eye_z, 20.0);
    }

    #[test]
    fn viewport_from_perspective() {
        let view = RenderView::default();
        let v = view.viewport(2.0);
        // 2 * tan(22.5 deg) * 20
        assert!((v.height - 16.568_542_494_923_8).abs() < 1e-9);
        assert!((v.width - 2.0 * v.height).abs() < 1e-9);
    }

    #[test]
    fn zero_sized_surface_has_no_viewport() {
        let view = RenderView::default();
        assert_eq!(view.viewport_for_surface(1280, 0), None);
        assert_eq!(view.viewport_for_surface(0, 720), None);
        assert_eq!(view.viewport_for_surface(0, 0), None);
        let v = view.viewport_for_surface(1280, 720).unwrap();
        assert!((v.width / v.height - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn minimized_surface_keeps_layout() {
        use carousel_kernel::{Slider, SliderConfig};

        let view = RenderView::default();
        let mut slider = Slider::new(
            5,
            view.viewport_for_surface(1280, 720).unwrap(),
            SliderConfig::default(),
        )
        .unwrap();
        let before: Vec<f64> = slider.items().iter().map(|item| item.base_x()).collect();
        let viewport = slider.viewport();

        if let Some(v) = view.viewport_for_surface(0, 0) {
            slider.resize(v).unwrap();
        }

        let after: Vec<f64> = slider.items().iter().map(|item| item.base_x()).collect();
        assert_eq!(before, after);
        assert_eq!(slider.viewport(), viewport);
    }
}
