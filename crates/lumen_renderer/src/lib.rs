//! Lumen Renderer - Whitted-style CPU ray tracing.
//!
//! Casts one primary ray per pixel, shades the nearest hit with the
//! object's shaders and the lights that can see it, and recursively adds
//! weighted reflected and transmitted rays up to a bounce limit. Pixels
//! are rendered in parallel tiles on a rayon pool.

mod camera;
mod error;
mod intersect;
mod renderer;
mod tile;
mod tracer;
mod visibility;

pub use camera::{Camera, Projection};
pub use error::{RenderError, RenderResult};
pub use intersect::{ray_triangle_intersect, Intersect, MeshHit};
pub use renderer::{RenderConfig, Renderer, DEFAULT_BOUNCE_LIMIT};
pub use tile::{partition, pixel_coords, render_tile, render_tiles, Tile, TileJob, TileResult};
pub use tracer::{color_to_rgb, trace, trace_pixel};
pub use visibility::{nearest_object_hit, visible_lights, SceneHit};

/// Re-export the scene model and math types
pub use lumen_core::{Color, GeometryError, Light, Mesh, Scene, ShadeableObject, Shader, ShaderModel};
pub use lumen_math::{Ray, Vec2, Vec3};
