use crate::camera::PerspectiveCamera;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;
/// Orbit radius never drops below this, so the camera cannot land on the
/// target and dolly out can always recover.
const MIN_RADIUS: f32 = 1e-4;

/// Tunables for [`OrbitControls`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from +Y.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

/// Orbit camera around a target point.
///
/// Input methods only accumulate deltas; [`OrbitControls::update`] applies
/// them to the camera once per frame.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub settings: OrbitSettings,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO, OrbitSettings::default())
    }
}

impl OrbitControls {
    /// Controller orbiting `target`. Each `update` starts from the camera's pose.
    pub fn new(target: Vec3, settings: OrbitSettings) -> Self {
        Self {
            target,
            settings,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Pointer drag of `dx`, `dy` pixels on a viewport `viewport_height` tall.
    /// A drag across the full height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.settings.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.settings.rotate_speed;
    }

    /// Screen-space pan: the point under the cursor follows the pointer.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &PerspectiveCamera) {
        let h = viewport_height.max(1.0);
        let distance = (camera.position - self.target).length();
        let half_fov = (camera.fov_degrees * 0.5).to_radians();
        let target_distance = distance * half_fov.tan();

        let left = 2.0 * dx * target_distance / h * self.settings.pan_speed;
        let up = 2.0 * dy * target_distance / h * self.settings.pan_speed;
        self.pan_offset += -camera.right() * left + camera.camera_up() * up;
    }

    /// Positive steps move towards the target.
    pub fn dolly(&mut self, steps: f32) {
        let factor = 0.95_f32.powf(self.settings.zoom_speed * steps.abs());
        if steps > 0.0 {
            self.scale *= factor;
        } else if steps < 0.0 {
            self.scale /= factor;
        }
    }

    /// Apply accumulated input. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let s = self.settings;
        let before = (camera.position, camera.target);

        let offset = camera.position - self.target;
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let step = if s.enable_damping { s.damping_factor } else { 1.0 };
        theta += self.delta_theta * step;
        phi += self.delta_phi * step;
        phi = phi
            .clamp(s.min_polar_angle, s.max_polar_angle)
            .clamp(EPS, PI - EPS);
        let scaled = radius * self.scale;
        let radius = if scaled.is_finite() { scaled } else { radius };
        let near = s.min_distance.max(MIN_RADIUS);
        let radius = radius.clamp(near, s.max_distance.max(near));
        self.target += self.pan_offset * step;

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);

        if s.enable_damping {
            let keep = 1.0 - s.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (camera.position - before.0).length_squared() > EPS
            || (camera.target - before.1).length_squared() > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (OrbitControls, PerspectiveCamera) {
        let mut camera = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::default();
        controls.update(&mut camera);
        (controls, camera)
    }

    #[test]
    fn idle_update_leaves_camera_alone() {
        let (mut controls, mut camera) = setup();
        assert_eq!(camera.target, Vec3::ZERO);
        assert!(!controls.update(&mut camera));
        assert!((camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_keeps_distance() {
        let (mut controls, mut camera) = setup();
        controls.rotate(120.0, 40.0, 720.0);
        assert!(controls.update(&mut camera));
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
        // Dragging right swings the camera towards -X.
        assert!(camera.position.x < 0.0);
    }

    #[test]
    fn full_height_drag_is_one_turn() {
        let (mut controls, mut camera) = setup();
        controls.rotate(720.0, 0.0, 720.0);
        controls.update(&mut camera);
        assert!((camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-3);
    }

    #[test]
    fn polar_angle_never_flips() {
        let (mut controls, mut camera) = setup();
        // Dragging down lifts the camera over the target.
        controls.rotate(0.0, 10_000.0, 720.0);
        controls.update(&mut camera);
        assert!(camera.position.y > 4.99);
        assert!(camera.position.y <= 5.0 + 1e-5);

        controls.rotate(0.0, -10_000.0, 720.0);
        controls.update(&mut camera);
        assert!(camera.position.y < -4.99);
    }

    #[test]
    fn dolly_scales_radius() {
        let (mut controls, mut camera) = setup();
        controls.dolly(1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 4.75).abs() < 1e-4);

        controls.dolly(-1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn distance_limits_apply() {
        let (mut controls, mut camera) = setup();
        controls.settings.max_distance = 6.0;
        for _ in 0..20 {
            controls.dolly(-1.0);
        }
        controls.update(&mut camera);
        assert!((camera.position.length() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn min_distance_stops_dolly_in() {
        let (mut controls, mut camera) = setup();
        controls.settings.min_distance = 4.9;
        controls.dolly(1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 4.9).abs() < 1e-4);
    }

    #[test]
    fn dolly_in_never_reaches_target() {
        let (mut controls, mut camera) = setup();
        for _ in 0..3000 {
            controls.dolly(1.0);
            controls.update(&mut camera);
        }
        let radius = camera.position.length();
        assert!(radius >= MIN_RADIUS * 0.99);
        assert!(camera.view_matrix().to_cols_array().iter().all(|f| f.is_finite()));

        controls.dolly(-1.0);
        controls.update(&mut camera);
        assert!(camera.position.length() > radius);
    }

    #[test]
    fn polar_limits_hold_both_ways() {
        let (mut controls, mut camera) = setup();
        controls.settings.min_polar_angle = 1.0;
        controls.settings.max_polar_angle = 2.0;
        let polar = |c: &PerspectiveCamera| (c.position.y / c.position.length()).acos();

        controls.rotate(0.0, 10_000.0, 720.0);
        controls.update(&mut camera);
        assert!((polar(&camera) - 1.0).abs() < 1e-4);

        controls.rotate(0.0, -10_000.0, 720.0);
        controls.update(&mut camera);
        assert!((polar(&camera) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn pan_follows_cursor_at_target_depth() {
        let (mut controls, mut camera) = setup();
        controls.pan(100.0, 0.0, 720.0, &camera);
        controls.update(&mut camera);
        let expected = -2.0 * 100.0 * 5.0 * 37.5_f32.to_radians().tan() / 720.0;
        assert!((controls.target.x - expected).abs() < 1e-5);
        assert!(controls.target.y.abs() < 1e-6);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let (mut controls, mut camera) = setup();
        controls.pan(100.0, 0.0, 720.0, &camera);
        controls.update(&mut camera);
        // Dragging right slides the view so the target moves left.
        assert!(controls.target.x < 0.0);
        assert_eq!(camera.target, controls.target);
        let offset = camera.position - controls.target;
        assert!((offset - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let (mut controls, mut camera) = setup();
        controls.settings.enable_damping = true;
        controls.rotate(360.0, 0.0, 720.0);

        controls.update(&mut camera);
        let first = camera.position;
        assert!(controls.update(&mut camera));
        assert_ne!(camera.position, first);
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
    }
}
