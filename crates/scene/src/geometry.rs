//! Triangle geometry for hit-testable meshes.
//!
//! All generators emit counter-clockwise triangles when viewed from outside,
//! which is what front-face culling in the ray test expects.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Indexed triangle list in local space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Check index bounds and triangle completeness.
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            ));
        }
        if let Some(bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(format!(
                "index {bad} out of range for {} positions",
                self.positions.len()
            ));
        }
        Ok(())
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex triples. Out-of-range indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let vertex = |i: u32| self.positions.get(i as usize).map(|p| Vec3::from(*p));
            Some([vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?])
        })
    }
}

/// Shape attached to a scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// Regular octahedron with vertices on the axes at `radius`.
    Octahedron {
        /// Distance from centre to each vertex.
        radius: f32,
    },
    /// Axis-aligned box centred on the origin.
    Box {
        /// Edge lengths along x, y, z.
        size: [f32; 3],
    },
    /// Arbitrary indexed triangles.
    Mesh(TriangleMesh),
}

impl Geometry {
    /// Convenience constructor.
    pub fn octahedron(radius: f32) -> Self {
        Self::Octahedron { radius }
    }

    /// Convenience constructor.
    pub fn cuboid(size: Vec3) -> Self {
        Self::Box { size: size.into() }
    }

    /// Expand into a triangle mesh.
    pub fn to_mesh(&self) -> TriangleMesh {
        match self {
            Self::Octahedron { radius } => octahedron_mesh(*radius),
            Self::Box { size } => box_mesh(Vec3::from(*size)),
            Self::Mesh(mesh) => mesh.clone(),
        }
    }
}

fn octahedron_mesh(radius: f32) -> TriangleMesh {
    let r = radius;
    TriangleMesh {
        positions: vec![
            [r, 0.0, 0.0],
            [-r, 0.0, 0.0],
            [0.0, r, 0.0],
            [0.0, -r, 0.0],
            [0.0, 0.0, r],
            [0.0, 0.0, -r],
        ],
        indices: vec![
            0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, //
            1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
        ],
    }
}

fn box_mesh(size: Vec3) -> TriangleMesh {
    let half = size * 0.5;
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut mesh = TriangleMesh::default();
    for (normal, u, v) in faces {
        let centre = normal * half;
        let u = u * half;
        let v = v * half;
        let base = mesh.positions.len() as u32;
        for corner in [centre - u - v, centre + u - v, centre + u + v, centre - u + v] {
            mesh.positions.push(corner.into());
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &TriangleMesh) {
        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid) > 0.0,
                "triangle {a:?} {b:?} {c:?} faces inward"
            );
        }
    }

    #[test]
    fn octahedron_has_eight_outward_faces() {
        let mesh = Geometry::octahedron(0.5).to_mesh();
        assert_eq!(mesh.triangle_count(), 8);
        assert!(mesh.validate().is_ok());
        assert_outward(&mesh);
    }

    #[test]
    fn box_has_twelve_outward_faces() {
        let mesh = Geometry::cuboid(Vec3::new(1.0, 2.0, 3.0)).to_mesh();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.positions.len(), 24);
        assert!(mesh.validate().is_ok());
        assert_outward(&mesh);
    }

    #[test]
    fn validate_rejects_bad_meshes() {
        let partial = TriangleMesh {
            positions: vec![[0.0; 3]; 3],
            indices: vec![0, 1],
        };
        assert!(partial.validate().is_err());

        let out_of_range = TriangleMesh {
            positions: vec![[0.0; 3]; 3],
            indices: vec![0, 1, 3],
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn geometry_deserializes_from_json() {
        let geometry: Geometry =
            serde_json::from_str(r#"{"box": {"size": [1.0, 1.0, 1.0]}}"#).expect("valid json");
        assert_eq!(geometry, Geometry::Box { size: [1.0; 3] });

        let geometry: Geometry =
            serde_json::from_str(r#"{"octahedron": {"radius": 0.5}}"#).expect("valid json");
        assert_eq!(geometry, Geometry::octahedron(0.5));
    }
}
