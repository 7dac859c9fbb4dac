use glam::{Vec2, Vec3};

/// Vertex with position, normal, UV and tangent (xyz + handedness in w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 4],
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<GeometryVertex>,
    pub indices: Vec<u16>,
}

impl Geometry {
    /// Number of indexed triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis-aligned box centred on the origin, one quad per face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    /// Box with the given edge lengths.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Emit 24 vertices and 36 indices with per-face normals and UVs.
    pub fn build(&self) -> Geometry {
        let half = Vec3::new(self.width, self.height, self.depth) * 0.5;
        // (normal, u axis, v axis) with normal x u == v, so every face winds CCW.
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let corners = [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u16;
            for c in corners {
                let position = (normal + u * c.x + v * c.y) * half;
                // Image rows run top-down, so texture v is flipped.
                let uv = [(c.x + 1.0) * 0.5, 1.0 - (c.y + 1.0) * 0.5];
                vertices.push(GeometryVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv,
                    tangent: u.extend(1.0).to_array(),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Geometry { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_24_vertices_and_12_triangles() {
        let geo = BoxGeometry::new(2.0, 2.0, 2.0).build();
        assert_eq!(geo.vertices.len(), 24);
        assert_eq!(geo.indices.len(), 36);
        assert_eq!(geo.triangle_count(), 12);
        assert!(geo.indices.iter().all(|&i| (i as usize) < geo.vertices.len()));
    }

    #[test]
    fn vertices_lie_on_the_box_surface() {
        let geo = BoxGeometry::new(2.0, 4.0, 6.0).build();
        for v in &geo.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.x.abs() - 1.0).abs() < 1e-6);
            assert!((p.y.abs() - 2.0).abs() < 1e-6);
            assert!((p.z.abs() - 3.0).abs() < 1e-6);
            let n = Vec3::from_array(v.normal);
            // The normal points at the face the vertex belongs to.
            assert!(p.dot(n) > 0.0);
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let geo = BoxGeometry::new(2.0, 2.0, 2.0).build();
        for tri in geo.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(geo.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let n = Vec3::from_array(geo.vertices[tri[0] as usize].normal);
            assert!((face_normal - n).length() < 1e-5);
        }
    }

    #[test]
    fn tangent_frame_is_orthonormal() {
        let geo = BoxGeometry::new(1.0, 1.0, 1.0).build();
        for v in &geo.vertices {
            let n = Vec3::from_array(v.normal);
            let t = Vec3::new(v.tangent[0], v.tangent[1], v.tangent[2]);
            assert!(n.dot(t).abs() < 1e-6);
            assert_eq!(v.tangent[3], 1.0);
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
