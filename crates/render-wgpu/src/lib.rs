//! wgpu render backend for the cube viewer.
//!
//! Draws scene meshes with a metal/rough shader (albedo, roughness, normal and
//! displacement maps) lit by up to [`MAX_LIGHTS`] lights. The camera is a
//! perspective camera steered by orbit controls.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Material and transform uniforms are rewritten every frame, so edits made
//!   between frames show up on the next draw.

mod camera;
mod gpu;
mod orbit;
mod shaders;

pub use camera::PerspectiveCamera;
pub use gpu::{MAX_LIGHTS, SceneRenderer};
pub use orbit::{OrbitControls, OrbitSettings};
