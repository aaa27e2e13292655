//! Local shading models.
//!
//! Every shader turns a surface point, its normal, the lights that can see
//! the point and the direction towards the viewer into a colour. An
//! object's colour is the sum of its shaders' contributions.

use lumen_math::{normalize, reflect, Vec3};

use crate::scene::Light;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Capability shared by everything that can shade a surface point.
pub trait ShaderModel: Send + Sync {
    /// Colour contributed at `point` with unit `normal`, lit by `lights`
    /// and seen from unit direction `viewer` (pointing away from the surface).
    fn colour(&self, point: Vec3, normal: Vec3, lights: &[Light], viewer: Vec3) -> Color;
}

/// The closed set of shading models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shader {
    /// Constant colour, independent of lights and geometry.
    Ambient { colour: Color },
    /// Lambertian diffuse reflection.
    Diffuse { colour: Color },
    /// Phong highlight with the given shininess exponent.
    Specular { colour: Color, shininess: f32 },
}

impl Shader {
    pub fn ambient(colour: Color) -> Self {
        Self::Ambient { colour }
    }

    pub fn diffuse(colour: Color) -> Self {
        Self::Diffuse { colour }
    }

    pub fn specular(colour: Color, shininess: f32) -> Self {
        Self::Specular { colour, shininess }
    }
}

impl ShaderModel for Shader {
    fn colour(&self, point: Vec3, normal: Vec3, lights: &[Light], viewer: Vec3) -> Color {
        match *self {
            Self::Ambient { colour } => colour,
            Self::Diffuse { colour } => lights
                .iter()
                .map(|light| {
                    let to_light = normalize(light.position - point);
                    colour * light.colour * normal.dot(to_light).max(0.0)
                })
                .sum(),
            Self::Specular { colour, shininess } => lights
                .iter()
                .map(|light| {
                    let to_light = normalize(light.position - point);
                    // Mirror the light direction about the normal, away from the surface
                    let reflection = reflect(normal, -to_light);
                    // Clip before the power: 0^0 is 1
                    let cos = reflection.dot(viewer);
                    let highlight = if cos > 0.0 { cos.powf(shininess) } else { 0.0 };
                    colour * light.colour * highlight
                })
                .sum(),
        }
    }
}
