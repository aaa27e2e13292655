//! View plane and primary ray generation.

use std::str::FromStr;

use lumen_math::{normalize, Ray, Vec2, Vec3};

use crate::error::RenderError;

/// How primary rays leave the view plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Rays diverge from the projection reference point through each pixel.
    #[default]
    Perspective,
    /// Every ray travels along the negated view-plane normal.
    Parallel,
}

impl FromStr for Projection {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "perspective" => Ok(Self::Perspective),
            "parallel" => Ok(Self::Parallel),
            _ => Err(RenderError::UnknownProjection(s.to_string())),
        }
    }
}

/// Camera for generating primary rays into the scene.
///
/// The view plane is centred on `center`, faces along `view_normal` and
/// spans `view_size` world units. Pixel (0, 0) is the top-left corner.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    pub projection: Projection,

    // View plane
    center: Vec3,
    view_normal: Vec3,
    view_up: Vec3,
    view_size: Vec2,

    // Projection reference point (perspective eye)
    prp: Vec3,

    // Cached basis (set by initialize())
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 200,
            image_height: 150,
            projection: Projection::Perspective,
            center: Vec3::ZERO,
            view_normal: Vec3::Z,
            view_up: Vec3::Y,
            view_size: Vec2::new(100.0, 100.0),
            prp: Vec3::new(0.0, 0.0, 3.0),
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the projection model.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Place the view plane.
    pub fn with_view_plane(mut self, center: Vec3, normal: Vec3, up: Vec3, size: Vec2) -> Self {
        self.center = center;
        self.view_normal = normalize(normal);
        self.view_up = up;
        self.view_size = size;
        self.initialize();
        self
    }

    /// Set the projection reference point used by perspective rays.
    pub fn with_prp(mut self, prp: Vec3) -> Self {
        self.prp = prp;
        self
    }

    /// Recompute the view plane basis from its normal and up vector.
    fn initialize(&mut self) {
        self.right = normalize(self.view_up.cross(self.view_normal));
        self.up = self.view_normal.cross(self.right);
    }

    /// World-space position of pixel (x, y)'s centre on the view plane.
    pub fn pixel_position(&self, x: u32, y: u32) -> Vec3 {
        let s = (x as f32 + 0.5) / self.image_width as f32 - 0.5;
        let t = 0.5 - (y as f32 + 0.5) / self.image_height as f32;
        self.center + s * self.view_size.x * self.right + t * self.view_size.y * self.up
    }

    /// Generate the primary ray for pixel (x, y).
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let origin = self.pixel_position(x, y);
        let direction = match self.projection {
            Projection::Perspective => normalize(origin - self.prp),
            Projection::Parallel => -self.view_normal,
        };
        Ray::new(origin, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
