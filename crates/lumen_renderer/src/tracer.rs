//! Whitted-style recursive ray tracing.
//!
//! Local shading at the nearest hit is combined with weighted reflected
//! and transmitted contributions, traced recursively up to a depth limit.

use lumen_core::{Color, Scene};
use lumen_math::{normalize, reflect, Ray};

use crate::visibility::{nearest_object_hit, visible_lights};

/// Compute the color seen by a ray.
///
/// Returns black once `depth` exceeds `limit`, or when the ray hits
/// nothing. The result is unclamped.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32, limit: u32) -> Color {
    if depth > limit {
        return Color::ZERO;
    }

    let Some(hit) = nearest_object_hit(scene, ray) else {
        return Color::ZERO;
    };

    let point = ray.at(hit.t());
    let direction = ray.direction();

    // Cached winding normal, not turned towards the ray
    let normal = hit.normal();

    let lights = visible_lights(scene, point);
    let viewer = normalize(ray.origin() - point);
    let object = hit.object;

    let mut color = object.colour_at(point, normal, &lights, viewer);

    if object.reflectiveness > 0.0 {
        let bounce = Ray::new(point, reflect(normal, normalize(direction)));
        color += object.reflectiveness * trace(scene, &bounce, depth + 1, limit);
    }

    if object.transparency > 0.0 {
        let through = Ray::new(point, direction);
        color += object.transparency * trace(scene, &through, depth + 1, limit);
    }

    color
}

/// Convert a color to 8-bit RGB.
///
/// Each channel is clamped to [0, 1], scaled to 255 and truncated.
/// NaN channels become 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f32| (255.0 * c.clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Trace a primary ray and materialize the displayable pixel.
pub fn trace_pixel(scene: &Scene, ray: &Ray, limit: u32) -> [u8; 3] {
    color_to_rgb(trace(scene, ray, 0, limit))
}
