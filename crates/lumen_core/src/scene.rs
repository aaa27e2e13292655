//! Scene graph types.
//!
//! A scene is an insertion-ordered list of shadeable objects and an
//! insertion-ordered list of point lights. It is read-only while a render
//! is in flight.

use lumen_math::Vec3;

use crate::mesh::Mesh;
use crate::shader::{Color, Shader, ShaderModel};

/// A point light. No attenuation or distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub colour: Color,
}

impl Light {
    pub fn new(position: Vec3, colour: Color) -> Self {
        Self { position, colour }
    }
}

/// A mesh with the shaders that colour it and its bounce weights.
#[derive(Debug, Clone)]
pub struct ShadeableObject {
    pub mesh: Mesh,
    /// Applied in attachment order.
    pub shaders: Vec<Shader>,
    /// Weight of the reflected ray's colour, expected in [0, 1].
    pub reflectiveness: f32,
    /// Weight of the transmitted ray's colour, expected in [0, 1].
    pub transparency: f32,
}

impl ShadeableObject {
    /// Create an object with no shaders and no reflection or transmission.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            shaders: Vec::new(),
            reflectiveness: 0.0,
            transparency: 0.0,
        }
    }

    /// Attach a shader.
    pub fn with_shader(mut self, shader: Shader) -> Self {
        self.shaders.push(shader);
        self
    }

    pub fn with_reflectiveness(mut self, reflectiveness: f32) -> Self {
        self.reflectiveness = reflectiveness;
        self
    }

    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }

    /// Local colour at a surface point: the sum of every shader's
    /// contribution.
    pub fn colour_at(&self, point: Vec3, normal: Vec3, lights: &[Light], viewer: Vec3) -> Color {
        self.shaders
            .iter()
            .fold(Color::ZERO, |acc, shader| {
                acc + shader.colour(point, normal, lights, viewer)
            })
    }

    fn has_unit_weights(&self) -> bool {
        (0.0..=1.0).contains(&self.reflectiveness) && (0.0..=1.0).contains(&self.transparency)
    }
}

/// A complete scene: objects and lights, both in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<ShadeableObject>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene and return its index.
    pub fn add_object(&mut self, object: ShadeableObject) -> usize {
        if !object.has_unit_weights() {
            log::warn!(
                "Object {} has weights outside [0, 1] (reflectiveness {}, transparency {})",
                self.objects.len(),
                object.reflectiveness,
                object.transparency
            );
        }
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[ShadeableObject] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Get total triangle count across all objects.
    pub fn total_triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }
}
