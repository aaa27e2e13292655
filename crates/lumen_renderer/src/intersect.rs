//! Ray-triangle and ray-mesh intersection.
//!
//! Uses the Möller-Trumbore algorithm. Meshes are scanned exhaustively,
//! with no spatial index.

use lumen_core::Mesh;
use lumen_math::{Ray, Vec3, RAY_EPSILON};

/// Nearest hit of a ray against a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Ray parameter of the hit, always greater than `RAY_EPSILON`
    pub t: f32,
    /// Barycentric coordinates: u, v >= 0 and u + v <= 1
    pub u: f32,
    pub v: f32,
    /// Index of the hit triangle within its mesh
    pub triangle: usize,
}

/// Trait for geometry that rays can be tested against.
pub trait Intersect: Send + Sync {
    /// Find the nearest hit along `ray`, if any.
    fn ray_hit(&self, ray: &Ray) -> Option<MeshHit>;
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns `(t, u, v)` for a hit in front of `p`, or `None` when the ray
/// misses, runs parallel to the triangle, or hits within `RAY_EPSILON` of
/// its origin. Both winding orders are hit.
pub fn ray_triangle_intersect(p: Vec3, d: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<(f32, f32, f32)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = d.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < RAY_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = p - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * d.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    if t > RAY_EPSILON {
        Some((t, u, v))
    } else {
        None
    }
}

impl Intersect for Mesh {
    fn ray_hit(&self, ray: &Ray) -> Option<MeshHit> {
        let mut nearest: Option<MeshHit> = None;

        for triangle in 0..self.triangle_count() {
            let [v0, v1, v2] = self.vertices(triangle);
            let Some((t, u, v)) = ray_triangle_intersect(ray.origin(), ray.direction(), v0, v1, v2)
            else {
                continue;
            };

            if nearest.map_or(true, |hit| t < hit.t) {
                nearest = Some(MeshHit { t, u, v, triangle });
            }
        }

        nearest
    }
}
