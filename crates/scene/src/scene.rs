use crate::geometry::Geometry;
use crate::light::{Light, LightKind};
use crate::material::StandardMaterial;
use cubeview_common::{Color, Transform};
use glam::Vec3;
use std::sync::Arc;

/// Handle to a light, valid for the scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(pub usize);

/// Handle to a mesh, valid for the scene that issued it. Ordered by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

/// Renderable object: shared geometry, its own material and transform.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: Arc<Geometry>,
    pub material: StandardMaterial,
    pub transform: Transform,
}

impl Mesh {
    /// Wrap `geometry` and `material` under an identity transform.
    pub fn new(name: impl Into<String>, geometry: Geometry, material: StandardMaterial) -> Self {
        Self {
            name: name.into(),
            geometry: Arc::new(geometry),
            material,
            transform: Transform::default(),
        }
    }
}

/// Root of the scene graph.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    lights: Vec<Light>,
    meshes: Vec<Mesh>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene on a black background.
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
            lights: Vec::new(),
            meshes: Vec::new(),
        }
    }

    /// Register `light` and return its handle.
    pub fn add_light(&mut self, light: Light) -> LightId {
        let id = LightId(self.lights.len());
        tracing::debug!(
            "added {} light #{} at ({:.2}, {:.2}, {:.2})",
            light.kind,
            id.0,
            light.position.x,
            light.position.y,
            light.position.z
        );
        self.lights.push(light);
        id
    }

    /// Light factory keyed by a kind tag (`directional`, `ambient`, `point`).
    ///
    /// Constructs the light, moves it to `position` and registers it. An
    /// unknown tag logs one error and yields `None`; the scene is untouched.
    pub fn create_light(
        &mut self,
        kind: &str,
        color: Color,
        intensity: f32,
        position: Vec3,
    ) -> Option<LightId> {
        let kind: LightKind = match kind.parse() {
            Ok(kind) => kind,
            Err(e) => {
                tracing::error!("{e}");
                return None;
            }
        };
        Some(self.add_light(Light::new(kind, color, intensity).at(position)))
    }

    /// Look up a light. `None` for a handle from another scene.
    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    /// All lights in insertion order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Register `mesh` and return its handle. Handles are never reused.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len());
        tracing::debug!("added mesh {:?} as #{}", mesh.name, id.0);
        self.meshes.push(mesh);
        id
    }

    /// Look up a mesh by handle.
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    /// Mutable mesh lookup, for edits that should show on the next frame.
    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    /// Iterate meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }

    /// Number of meshes added so far.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
