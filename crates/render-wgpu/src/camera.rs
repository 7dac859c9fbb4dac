use glam::{Mat4, Vec3};

/// Right-handed perspective camera that always looks at `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Camera at the origin looking down -Z.
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Move the camera, keeping its viewing direction.
    pub fn with_position(mut self, position: Vec3) -> Self {
        let forward = self.target - self.position;
        self.position = position;
        self.target = position + forward;
        self
    }

    /// Aim the camera at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Match the projection to a drawing surface of `width` x `height` pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Unit viewing direction. -Z when position and target coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Camera-space +X in world coordinates.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).try_normalize().unwrap_or(Vec3::X)
    }

    /// Camera-space +Y in world coordinates.
    pub fn camera_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// World to camera space, right-handed.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Perspective projection with wgpu's `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect.max(1e-6),
            self.near,
            self.far,
        )
    }

    /// Projection times view, as the shader consumes it.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_projection_is_finite() {
        let cam = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(cam.target, Vec3::new(0.0, 0.0, 4.0));
        let vp = cam.view_projection();
        assert!(vp.to_cols_array().iter().all(|f| f.is_finite()));
    }

    #[test]
    fn resize_sets_aspect_from_surface() {
        let mut cam = PerspectiveCamera::default();
        cam.resize(1920, 1080);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.resize(600, 800);
        assert!((cam.aspect - 0.75).abs() < 1e-6);
    }

    #[test]
    fn resize_tolerates_zero_height() {
        let mut cam = PerspectiveCamera::default();
        cam.resize(800, 0);
        assert_eq!(cam.aspect, 800.0);
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut cam = PerspectiveCamera::default().with_position(Vec3::new(3.0, 2.0, 5.0));
        cam.look_at(Vec3::ZERO);
        let (f, r, u) = (cam.forward(), cam.right(), cam.camera_up());
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!(u.y > 0.0);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let mut cam = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
        cam.look_at(Vec3::ZERO);
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
