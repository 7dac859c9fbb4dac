use cubeview_assets::{TextureData, TextureSet};
use cubeview_common::Color;
use std::sync::Arc;

/// Metal/rough material with optional texture maps.
///
/// Scalar factors multiply the sampled maps: the albedo map is tinted by
/// `color`, the roughness map's green channel is scaled by `roughness`.
#[derive(Debug, Clone)]
pub struct StandardMaterial {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub displacement_scale: f32,
    pub displacement_bias: f32,
    pub map: Option<Arc<TextureData>>,
    pub roughness_map: Option<Arc<TextureData>>,
    pub normal_map: Option<Arc<TextureData>>,
    pub displacement_map: Option<Arc<TextureData>>,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 1.0,
            metalness: 0.0,
            displacement_scale: 1.0,
            displacement_bias: 0.0,
            map: None,
            roughness_map: None,
            normal_map: None,
            displacement_map: None,
        }
    }
}

impl StandardMaterial {
    /// Material using all four maps of `textures`.
    pub fn textured(textures: &TextureSet) -> Self {
        Self {
            map: Some(textures.color.clone()),
            roughness_map: Some(textures.roughness.clone()),
            normal_map: Some(textures.normal.clone()),
            displacement_map: Some(textures.height.clone()),
            ..Self::default()
        }
    }

    /// How far the height map pushes vertices along their normals.
    pub fn with_displacement_scale(mut self, scale: f32) -> Self {
        self.displacement_scale = scale;
        self
    }
}
