//! Scene graph for the cube viewer.
//!
//! The scene owns lights and meshes. Renderers read it; the debug panel and
//! orbit controls are the only writers, and they run on the UI thread.
//!
//! # Invariants
//! - Ids are indices into the scene's lists; nothing is ever removed.
//! - A light created through the factory is registered before it is returned.

mod geometry;
mod light;
mod material;
mod scene;
mod setup;

pub use geometry::{BoxGeometry, Geometry, GeometryVertex};
pub use light::{Light, LightKind, UnknownLightKind};
pub use material::StandardMaterial;
pub use scene::{LightId, Mesh, MeshId, Scene};
pub use setup::{CubeScene, build_textured_cube_scene};
