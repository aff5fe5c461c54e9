use carousel_render::RenderView;
use glam::{Mat4, Vec3};

/// Fixed perspective camera looking down -Z at the slide plane.
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_view(&RenderView::default())
    }
}

impl PerspectiveCamera {
    pub fn from_view(view: &RenderView) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, view.eye_z),
            fov: view.fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.position.z, 20.0);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn viewport_edge_projects_to_clip_edge() {
        let view = RenderView::default();
        let mut cam = PerspectiveCamera::from_view(&view);
        cam.set_aspect(1600, 900);
        let viewport = view.viewport(cam.aspect);

        let edge = glam::Vec4::new((viewport.width / 2.0) as f32, 0.0, 0.0, 1.0);
        let clip = cam.view_projection() * edge;
        assert!((clip.x / clip.w - 1.0).abs() < 1e-4);

        let top = glam::Vec4::new(0.0, (viewport.height / 2.0) as f32, 0.0, 1.0);
        let clip = cam.view_projection() * top;
        assert!((clip.y / clip.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_height_surface_keeps_aspect_finite() {
        let mut cam = PerspectiveCamera::default();
        cam.set_aspect(800, 0);
        assert!(cam.aspect.is_finite());
    }
}
