use crate::config::ViewerConfig;
use cubeview_assets::TextureSet;
use cubeview_common::Color;
use cubeview_input::{Action, PointerTracker};
use cubeview_render_wgpu::{OrbitControls, PerspectiveCamera};
use cubeview_scene::{MeshId, Scene, build_textured_cube_scene};
use cubeview_tools::DebugPanel;
use glam::Vec3;

/// Everything the viewer owns apart from GPU resources.
pub struct AppState {
    pub scene: Scene,
    pub cube: MeshId,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub tracker: PointerTracker,
    pub panel: DebugPanel,
    surface_size: (u32, u32),
}

impl AppState {
    pub fn new(config: &ViewerConfig, textures: &TextureSet) -> Self {
        let cube_scene = build_textured_cube_scene(textures);
        let seed = cube_scene
            .scene
            .mesh(cube_scene.cube)
            .map_or(Color::WHITE, |m| m.material.color);

        let mut camera = config.camera();
        let mut controls = OrbitControls::new(Vec3::ZERO, config.orbit_settings());
        controls.update(&mut camera);

        Self {
            scene: cube_scene.scene,
            cube: cube_scene.cube,
            camera,
            controls,
            tracker: PointerTracker::new(),
            panel: DebugPanel::new(seed),
            surface_size: (config.window.width.max(1), config.window.height.max(1)),
        }
    }

    /// Drawing surface size in physical pixels, never zero.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.surface_size = (width.max(1), height.max(1));
        self.camera.resize(width, height);
        tracing::debug!(
            "resized to {width}x{height}, aspect {:.3}",
            self.camera.aspect
        );
    }

    pub fn apply_action(&mut self, action: Action) {
        let height = self.surface_size.1 as f32;
        match action {
            Action::Rotate { dx, dy } => self.controls.rotate(dx, dy, height),
            Action::Pan { dx, dy } => self.controls.pan(dx, dy, height, &self.camera),
            Action::Zoom(steps) => self.controls.dolly(steps),
        }
    }

    /// Per-frame update. Returns whether the camera moved.
    pub fn frame(&mut self) -> bool {
        self.controls.update(&mut self.camera)
    }

    /// Build the panel for this frame. Returns whether the cube changed.
    pub fn draw_ui(&mut self, ctx: &egui::Context) -> bool {
        match self.scene.mesh_mut(self.cube) {
            Some(mesh) => self.panel.show(ctx, mesh),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_tools::CubeField;

    fn state() -> AppState {
        AppState::new(&ViewerConfig::default(), &TextureSet::neutral())
    }

    #[test]
    fn starts_looking_at_cube() {
        let s = state();
        assert_eq!(s.camera.target, Vec3::ZERO);
        assert!((s.camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert_eq!(s.surface_size(), (1280, 720));
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let mut s = state();
        s.on_resize(1000, 500);
        assert_eq!(s.camera.aspect, 2.0);
        assert_eq!(s.surface_size(), (1000, 500));

        s.on_resize(300, 0);
        assert_eq!(s.surface_size(), (300, 1));
        assert_eq!(s.camera.aspect, 300.0);
    }

    #[test]
    fn actions_drive_the_camera() {
        let mut s = state();
        s.apply_action(Action::Zoom(1.0));
        assert!(s.frame());
        assert!((s.camera.position.length() - 4.75).abs() < 1e-4);

        s.apply_action(Action::Rotate { dx: 50.0, dy: 0.0 });
        s.frame();
        assert!((s.camera.position.length() - 4.75).abs() < 1e-4);
        assert!(!s.frame());
    }

    #[test]
    fn panel_edits_reach_the_scene() {
        let mut s = state();
        let mesh = s.scene.mesh_mut(s.cube).unwrap();
        s.panel.set_number(mesh, CubeField::ScaleX, 3.0);
        s.panel.set_color(mesh, Color::from_hex(0x336699));

        let mesh = s.scene.mesh(s.cube).unwrap();
        assert_eq!(mesh.transform.scale.x, 3.0);
        assert_eq!(mesh.material.color, Color::from_hex(0x336699));
    }
}
