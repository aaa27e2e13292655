//! Lumen Core - geometry and scene model for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh` and `Triangle`, with lazily cached face normals
//! - **Shading**: the `Shader` models and the `ShaderModel` capability
//! - **Scene**: `ShadeableObject`, `Light` and `Scene`
//!
//! # Example
//!
//! ```
//! use lumen_core::{Color, Light, Mesh, Scene, ShadeableObject, Shader};
//! use lumen_math::Vec3;
//!
//! let mut scene = Scene::new();
//! let mesh = Mesh::triangle(
//!     Vec3::new(-1.0, -1.0, -2.0),
//!     Vec3::new(1.0, -1.0, -2.0),
//!     Vec3::new(0.0, 1.0, -2.0),
//! );
//! scene.add_object(ShadeableObject::new(mesh).with_shader(Shader::diffuse(Color::ONE)));
//! scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::ONE));
//! assert_eq!(scene.total_triangle_count(), 1);
//! ```

pub mod mesh;
pub mod scene;
pub mod shader;

// Re-export commonly used types
pub use mesh::{GeometryError, Mesh, Triangle};
pub use scene::{Light, Scene, ShadeableObject};
pub use shader::{Color, Shader, ShaderModel};
