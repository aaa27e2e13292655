//! Nearest-hit search across a scene and per-light shadow tests.

use lumen_core::{Light, Scene, ShadeableObject};
use lumen_math::{normalize, Ray, Vec3};

use crate::intersect::{Intersect, MeshHit};

/// Record of the nearest object a ray hits.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    /// Index of the object in the scene
    pub index: usize,
    /// The hit object
    pub object: &'a ShadeableObject,
    /// Hit details within the object's mesh
    pub hit: MeshHit,
}

impl SceneHit<'_> {
    /// Ray parameter of the hit.
    #[inline]
    pub fn t(&self) -> f32 {
        self.hit.t
    }

    /// Cached unit normal of the hit triangle.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.object.mesh.normal_at(self.hit.triangle)
    }
}

/// Scan every object and return the globally nearest hit.
///
/// On equal distances the object added first wins.
pub fn nearest_object_hit<'a>(scene: &'a Scene, ray: &Ray) -> Option<SceneHit<'a>> {
    let mut nearest: Option<SceneHit<'a>> = None;

    for (index, object) in scene.objects().iter().enumerate() {
        if let Some(hit) = object.mesh.ray_hit(ray) {
            if nearest.map_or(true, |n| hit.t < n.hit.t) {
                nearest = Some(SceneHit { index, object, hit });
            }
        }
    }

    nearest
}

/// Lights with an unobstructed line from `point`.
///
/// The occlusion search is not bounded by the light's distance: geometry
/// lying beyond the light along the shadow ray still blocks it.
pub fn visible_lights(scene: &Scene, point: Vec3) -> Vec<Light> {
    scene
        .lights()
        .iter()
        .filter(|light| {
            let ray = Ray::new(point, normalize(light.position - point));
            nearest_object_hit(scene, &ray).is_none()
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Color, Mesh};

    /// Large triangle in the plane z = `z`, facing +Z.
    fn wall(z: f32) -> ShadeableObject {
        ShadeableObject::new(Mesh::triangle(
            Vec3::new(-10.0, -10.0, z),
            Vec3::new(10.0, -10.0, z),
            Vec3::new(0.0, 10.0, z),
        ))
    }

    #[test]
    fn test_nearest_object_across_objects() {
        let mut scene = Scene::new();
        scene.add_object(wall(-5.0));
        scene.add_object(wall(-2.0));
        scene.add_object(wall(-8.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = nearest_object_hit(&scene, &ray).unwrap();

        assert_eq!(hit.index, 1);
        assert!((hit.t() - 2.0).abs() < 1e-6);
        assert!((hit.normal() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_nearest_object_tie_keeps_first() {
        let mut scene = Scene::new();
        scene.add_object(wall(-3.0));
        scene.add_object(wall(-3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(nearest_object_hit(&scene, &ray).unwrap().index, 0);
    }

    #[test]
    fn test_nearest_object_empty_scene() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert!(nearest_object_hit(&scene, &ray).is_none());
    }

    #[test]
    fn test_unobstructed_light_is_visible() {
        let mut scene = Scene::new();
        scene.add_object(wall(0.0));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::ONE));

        // Point on the wall itself; its own surface is not an occluder
        let lights = visible_lights(&scene, Vec3::ZERO);

        assert_eq!(lights.len(), 1);
    }

    #[test]
    fn test_occluder_between_point_and_light_blocks() {
        let mut scene = Scene::new();
        scene.add_object(wall(2.0));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::ONE));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, -5.0), Color::new(0.5, 0.5, 0.5)));

        let lights = visible_lights(&scene, Vec3::ZERO);

        assert_eq!(lights, vec![Light::new(Vec3::new(0.0, 0.0, -5.0), Color::new(0.5, 0.5, 0.5))]);
    }

    #[test]
    fn test_occluder_beyond_light_still_blocks() {
        let mut scene = Scene::new();
        scene.add_object(wall(8.0));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::ONE));

        assert!(visible_lights(&scene, Vec3::ZERO).is_empty());
    }
}
