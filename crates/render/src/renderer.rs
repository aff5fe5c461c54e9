use carousel_common::PlaneTransform;
use carousel_kernel::Slider;
use glam::Vec2;

use crate::view::RenderView;

/// Per-plane shader inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    /// Visible world-space extent, updated on resize.
    ViewportSize(Vec2),
    /// Plane scale, updated on resize.
    PlaneSize(Vec2),
    /// Source image size in pixels, set once.
    ImageSize(Vec2),
}

/// Renderer-agnostic plane interface. All back-ends implement this trait.
///
/// Planes are addressed by slide index. The back-end owns meshes, textures
/// and programs; the slider only ever hands it numbers.
pub trait PlaneBackend {
    /// What a back-end needs to draw a frame (a surface view, a camera...).
    type Target<'a>;
    /// What drawing a frame produces.
    type Output;

    fn set_position(&mut self, plane: usize, x: f32, y: f32);

    fn set_scale(&mut self, plane: usize, sx: f32, sy: f32);

    fn set_uniform(&mut self, plane: usize, uniform: Uniform);

    /// Draw every plane with the values set so far.
    fn render_frame(&mut self, target: Self::Target<'_>) -> Self::Output;
}

/// Push every item's position and scale. Call once per frame after
/// [`Slider::update`].
pub fn push_transforms<B: PlaneBackend>(slider: &Slider, backend: &mut B) {
    for (plane, t) in slider.transforms().enumerate() {
        backend.set_position(plane, t.position.x, t.position.y);
        backend.set_scale(plane, t.scale.x, t.scale.y);
    }
}

/// Push the viewport and plane size uniforms. Call after construction and
/// after every resize.
pub fn push_layout_uniforms<B: PlaneBackend>(slider: &Slider, backend: &mut B) {
    let viewport = slider.viewport().as_vec2();
    for item in slider.items() {
        backend.set_uniform(item.index(), Uniform::ViewportSize(viewport));
        backend.set_uniform(item.index(), Uniform::PlaneSize(item.plane().as_vec2()));
    }
    tracing::trace!(planes = slider.len(), ?viewport, "layout uniforms pushed");
}

/// Push the source image size of one plane.
pub fn push_image_size<B: PlaneBackend>(backend: &mut B, plane: usize, width: u32, height: u32) {
    backend.set_uniform(
        plane,
        Uniform::ImageSize(Vec2::new(width as f32, height as f32)),
    );
}

/// Everything a back-end was told about one plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaneRecord {
    pub transform: PlaneTransform,
    pub viewport_size: Vec2,
    pub plane_size: Vec2,
    pub image_size: Vec2,
}

/// Text back-end: records plane state and renders it as a report.
///
/// Useful for CLI output, logging, and testing the sync code.
#[derive(Debug, Default)]
pub struct TextBackend {
    planes: Vec<PlaneRecord>,
    frames: u64,
}

impl TextBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planes(&self) -> &[PlaneRecord] {
        &self.planes
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn plane_mut(&mut self, plane: usize) -> &mut PlaneRecord {
        if plane >= self.planes.len() {
            self.planes.resize(plane + 1, PlaneRecord::default());
        }
        &mut self.planes[plane]
    }
}

impl PlaneBackend for TextBackend {
    type Target<'a> = &'a RenderView;
    type Output = String;

    fn set_position(&mut self, plane: usize, x: f32, y: f32) {
        self.plane_mut(plane).transform.position = Vec2::new(x, y);
    }

    fn set_scale(&mut self, plane: usize, sx: f32, sy: f32) {
        self.plane_mut(plane).transform.scale = Vec2::new(sx, sy);
    }

    fn set_uniform(&mut self, plane: usize, uniform: Uniform) {
        let record = self.plane_mut(plane);
        match uniform {
            Uniform::ViewportSize(v) => record.viewport_size = v,
            Uniform::PlaneSize(v) => record.plane_size = v,
            Uniform::ImageSize(v) => record.image_size = v,
        }
    }

    fn render_frame(&mut self, view: Self::Target<'_>) -> String {
        self.frames += 1;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (planes={}) ===\n",
            self.frames,
            self.planes.len()
        ));
        out.push_str(&format!(
            "Camera: z={:.1} fov={:.0}\n",
            view.eye_z, view.fov_degrees
        ));
        for (i, p) in self.planes.iter().enumerate() {
            out.push_str(&format!(
                "  [{i}] pos=({:.2}, {:.2}) scale=({:.2}, {:.2}) image={}x{}\n",
                p.transform.position.x,
                p.transform.position.y,
                p.transform.scale.x,
                p.transform.scale.y,
                p.image_size.x,
                p.image_size.y,
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_common::Viewport;
    use carousel_kernel::SliderConfig;

    fn slider() -> Slider {
        Slider::new(3, Viewport::new(10.0, 8.0), SliderConfig::default()).unwrap()
    }

    #[test]
    fn text_backend_empty() {
        let mut backend = TextBackend::new();
        let output = backend.render_frame(&RenderView::default());
        assert!(output.contains("Frame 1"));
        assert!(output.contains("planes=0"));
    }

    #[test]
    fn transforms_reach_backend() {
        let mut s = slider();
        let mut backend = TextBackend::new();
        s.update();
        push_transforms(&s, &mut backend);

        assert_eq!(backend.planes().len(), 3);
        let current = s.scroll().current;
        for (record, item) in backend.planes().iter().zip(s.items()) {
            assert_eq!(record.transform.position.x, item.render_x(current) as f32);
            assert_eq!(record.transform.scale, item.plane().as_vec2());
        }

        let output = backend.render_frame(&RenderView::default());
        assert!(output.contains("planes=3"));
        assert!(output.contains("pos="));
    }

    #[test]
    fn layout_uniforms_follow_resize() {
        let mut s = slider();
        let mut backend = TextBackend::new();
        push_layout_uniforms(&s, &mut backend);
        assert_eq!(backend.planes()[0].viewport_size, Vec2::new(10.0, 8.0));

        s.resize(Viewport::new(20.0, 12.0)).unwrap();
        push_layout_uniforms(&s, &mut backend);
        for record in backend.planes() {
            assert_eq!(record.viewport_size, Vec2::new(20.0, 12.0));
            assert_eq!(record.plane_size, s.metrics().plane.as_vec2());
        }
    }

    #[test]
    fn image_size_is_recorded() {
        let mut backend = TextBackend::new();
        push_image_size(&mut backend, 1, 640, 960);
        assert_eq!(backend.planes().len(), 2);
        assert_eq!(backend.planes()[1].image_size, Vec2::new(640.0, 960.0));
        let output = backend.render_frame(&RenderView::default());
        assert!(output.contains("image=640x960"));
    }
}
