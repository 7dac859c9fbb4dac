use crate::geometry::BoxGeometry;
use crate::light::Light;
use crate::material::StandardMaterial;
use crate::scene::{Mesh, MeshId, Scene};
use cubeview_assets::TextureSet;
use cubeview_common::Color;
use glam::Vec3;

/// The viewer's scene together with the handle of its cube.
#[derive(Debug, Clone)]
pub struct CubeScene {
    pub scene: Scene,
    pub cube: MeshId,
}

/// Two white directional lights, one ambient fill, and a 2x2x2 cube
/// wearing every map of `textures`.
pub fn build_textured_cube_scene(textures: &TextureSet) -> CubeScene {
    let mut scene = Scene::new();

    let white = Color::from_hex(0xffffff);
    scene.add_light(Light::directional(white, 1.5).at(Vec3::new(1.0, 2.0, 3.0)));
    scene.add_light(Light::ambient(white, 0.5));
    scene.add_light(Light::directional(white, 0.8).at(Vec3::new(0.0, 1.0, 0.0)));

    let material = StandardMaterial::textured(textures).with_displacement_scale(0.01);
    let cube = scene.add_mesh(Mesh::new(
        "cube",
        BoxGeometry::new(2.0, 2.0, 2.0).build(),
        material,
    ));

    tracing::info!(
        "scene ready: {} lights, {} mesh",
        scene.lights().len(),
        scene.mesh_count()
    );
    CubeScene { scene, cube }
}
