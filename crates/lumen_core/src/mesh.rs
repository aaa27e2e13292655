//! Triangle mesh geometry.
//!
//! A mesh owns an ordered vertex buffer and an ordered list of triangles
//! indexing into it. Face normals are computed on first use and cached,
//! one slot per triangle.

use std::sync::OnceLock;

use lumen_math::{normalize, Vec3};
use thiserror::Error;

/// Errors raised while accepting externally loaded geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// Three indices into the owning mesh's vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [u32; 3],
}

impl Triangle {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// A mesh of triangles sharing one vertex buffer.
#[derive(Debug, Default)]
pub struct Mesh {
    positions: Vec<Vec3>,
    triangles: Vec<Triangle>,
    /// Parallel to `triangles`; each slot is filled at most once.
    normals: Vec<OnceLock<Vec3>>,
}

impl Mesh {
    /// Build a mesh from a vertex buffer and a face index list, as produced
    /// by an external mesh loader.
    ///
    /// Only index bounds are checked. The geometry is otherwise trusted.
    pub fn new(positions: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Result<Self, GeometryError> {
        let vertex_count = positions.len();
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GeometryError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        let triangles: Vec<Triangle> = faces
            .into_iter()
            .map(|[a, b, c]| Triangle::new(a, b, c))
            .collect();
        let normals = triangles.iter().map(|_| OnceLock::new()).collect();

        Ok(Self {
            positions,
            triangles,
            normals,
        })
    }

    /// Create a mesh holding a single triangle.
    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let mut mesh = Self::default();
        mesh.add_triangle(a, b, c);
        mesh
    }

    /// Append a triangle with three fresh vertices.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let base = self.positions.len() as u32;
        self.positions.extend([a, b, c]);
        self.triangles.push(Triangle::new(base, base + 1, base + 2));
        self.normals.push(OnceLock::new());
    }

    /// Get the three vertex positions of triangle `id`.
    ///
    /// Panics if `id` is out of range.
    pub fn vertices(&self, id: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[id].indices;
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Unit face normal of triangle `id`, `(v1 - v0) x (v2 - v0)`.
    ///
    /// Computed on first access and memoized.
    pub fn normal_at(&self, id: usize) -> Vec3 {
        *self.normals[id].get_or_init(|| {
            let [v0, v1, v2] = self.vertices(id);
            normalize((v1 - v0).cross(v2 - v0))
        })
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

impl Clone for Mesh {
    fn clone(&self) -> Self {
        // The cache is rebuilt lazily on the copy
        Self {
            positions: self.positions.clone(),
            triangles: self.triangles.clone(),
            normals: self.triangles.iter().map(|_| OnceLock::new()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        Mesh::new(positions, vec![[0, 1, 2], [1, 3, 2]]).unwrap()
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = quad();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles()[1], Triangle::new(1, 3, 2));
    }

    #[test]
    fn test_mesh_rejects_bad_index() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let err = Mesh::new(positions, vec![[0, 1, 2], [0, 1, 7]]).unwrap_err();

        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                face: 1,
                index: 7,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_add_triangle_appends_fresh_vertices() {
        let mut mesh = Mesh::triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
        mesh.add_triangle(Vec3::Z, Vec3::X, Vec3::Y);

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangles()[1], Triangle::new(3, 4, 5));
        assert_eq!(mesh.vertices(1), [Vec3::Z, Vec3::X, Vec3::Y]);
    }

    #[test]
    fn test_normal_at_ccw_points_up_z() {
        let mesh = quad();

        // Both faces are counter-clockwise viewed from +Z
        assert!((mesh.normal_at(0) - Vec3::Z).length() < 1e-6);
        assert!((mesh.normal_at(1) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_normal_cache_is_stable() {
        let mesh = Mesh::triangle(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.0));

        let first = mesh.normal_at(0);
        assert!(mesh.normals[0].get().is_some());
        assert_eq!(mesh.normal_at(0), first);
        assert!((first - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_clone_resets_cache() {
        let mesh = quad();
        mesh.normal_at(0);

        let copy = mesh.clone();
        assert!(copy.normals[0].get().is_none());
        assert_eq!(copy.normal_at(0), mesh.normal_at(0));
    }
}
