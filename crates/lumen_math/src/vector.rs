//! Vector helpers shared by intersection, shading and the tracer.
//!
//! `cross` and `dot` are glam's `Vec3::cross` / `Vec3::dot`; the helpers
//! here add the two operations whose edge-case behaviour matters to the
//! renderer.

use crate::Vec3;

/// Hits closer than this are discarded to avoid self-intersection, and
/// determinants smaller than this mark a ray parallel to a triangle.
pub const RAY_EPSILON: f32 = 1e-5;

/// Scale `v` to unit length.
///
/// A zero-length (or otherwise non-normalizable) vector is returned
/// unchanged, so callers must tolerate a non-unit result.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    let unit = v / len;
    if len > 0.0 && unit.is_finite() {
        unit
    } else {
        v
    }
}

/// Reflect `incident` about `normal`: `incident - 2 (incident . normal) normal`.
///
/// `normal` is expected to be unit length.
#[inline]
pub fn reflect(normal: Vec3, incident: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        let v = normalize(Vec3::new(3.0, 0.0, 4.0));
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_unchanged() {
        assert_eq!(normalize(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_reflect_about_up() {
        let r = reflect(Vec3::Y, Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_head_on() {
        // Straight into a surface comes straight back out
        let r = reflect(Vec3::Z, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(r, Vec3::new(0.0, 0.0, 2.0));
    }
}
