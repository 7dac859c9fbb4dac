use cubeview_render_wgpu::{OrbitSettings, PerspectiveCamera};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Viewer settings, loaded from YAML. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub texture_dir: PathBuf,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            texture_dir: PathBuf::from("./text"),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "cubeview".into(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 5.0),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let s = OrbitSettings::default();
        Self {
            rotate_speed: s.rotate_speed,
            zoom_speed: s.zoom_speed,
            pan_speed: s.pan_speed,
            enable_damping: s.enable_damping,
            damping_factor: s.damping_factor,
            min_distance: s.min_distance,
            max_distance: s.max_distance,
            min_polar_angle: s.min_polar_angle,
            max_polar_angle: s.max_polar_angle,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Command-line values win over file values.
    pub fn override_with(
        &mut self,
        texture_dir: Option<PathBuf>,
        width: Option<u32>,
        height: Option<u32>,
    ) {
        if let Some(dir) = texture_dir {
            self.texture_dir = dir;
        }
        if let Some(w) = width {
            self.window.width = w;
        }
        if let Some(h) = height {
            self.window.height = h;
        }
    }

    pub fn camera(&self) -> PerspectiveCamera {
        let c = &self.camera;
        let aspect = self.window.width.max(1) as f32 / self.window.height.max(1) as f32;
        let mut camera =
            PerspectiveCamera::new(c.fov, aspect, c.near, c.far).with_position(c.position);
        camera.look_at(Vec3::ZERO);
        camera
    }

    pub fn orbit_settings(&self) -> OrbitSettings {
        let c = &self.controls;
        OrbitSettings {
            rotate_speed: c.rotate_speed,
            zoom_speed: c.zoom_speed,
            pan_speed: c.pan_speed,
            enable_damping: c.enable_damping,
            damping_factor: c.damping_factor,
            min_distance: c.min_distance,
            max_distance: c.max_distance,
            min_polar_angle: c.min_polar_angle,
            max_polar_angle: c.max_polar_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(ViewerConfig::from_yaml("").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn defaults() {
        let c = ViewerConfig::default();
        assert_eq!((c.window.width, c.window.height), (1280, 720));
        assert_eq!(c.texture_dir, PathBuf::from("./text"));
        assert_eq!(c.camera.fov, 75.0);
        assert_eq!(c.camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert!(!c.controls.enable_damping);
        assert_eq!(c.controls.damping_factor, 0.05);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let c = ViewerConfig::from_yaml(
            "window:\n  width: 800\n\
             camera:\n  position: [1.0, 2.0, 3.0]\n\
             controls:\n  enable_damping: true\n",
        )
        .unwrap();
        assert_eq!(c.window.width, 800);
        assert_eq!(c.window.height, 720);
        assert_eq!(c.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(c.camera.far, 1000.0);
        assert!(c.controls.enable_damping);
        assert_eq!(c.controls.zoom_speed, 1.0);
    }

    #[test]
    fn cli_overrides_file() {
        let mut c =
            ViewerConfig::from_yaml("texture_dir: assets\nwindow:\n  width: 800\n").unwrap();
        c.override_with(Some(PathBuf::from("maps")), None, Some(600));
        assert_eq!(c.texture_dir, PathBuf::from("maps"));
        assert_eq!(c.window.width, 800);
        assert_eq!(c.window.height, 600);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window:\n  title: test").unwrap();
        let c = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(c.window.title, "test");
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ViewerConfig::load(dir.path().join("nope.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "window: [1, 2").unwrap();
        assert!(matches!(ViewerConfig::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn camera_aims_at_origin() {
        let c = ViewerConfig::default();
        let cam = c.camera();
        assert_eq!(cam.target, Vec3::ZERO);
        assert!((cam.aspect - 1280.0 / 720.0).abs() < 1e-6);
        assert_eq!(cam.fov_degrees, 75.0);
        assert_eq!(c.orbit_settings(), OrbitSettings::default());
    }
}
