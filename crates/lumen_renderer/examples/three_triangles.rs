//! Renders three overlapping triangles lit by a single light and saves a PNG.

use lumen_renderer::{
    Camera, Color, Light, Mesh, Projection, RenderConfig, Renderer, Scene, ShadeableObject,
    Shader, Vec3, DEFAULT_BOUNCE_LIMIT,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let projection: Projection = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("perspective")
        .parse()?;

    let camera = Camera::new()
        .with_resolution(600, 400)
        .with_projection(projection);
    let renderer = Renderer::new(camera, RenderConfig::default())?;

    let scene = build_scene();
    renderer.render(&scene, "three_triangles.png", DEFAULT_BOUNCE_LIMIT)?;

    Ok(())
}

fn build_scene() -> Scene {
    let a = Vec3::new(-10.0, -10.0, -2.0);
    let b = Vec3::new(10.0, -10.0, -2.0);
    let c = Vec3::new(0.0, 10.0, -2.0);
    let right = Vec3::new(10.0, 0.0, -1.0);
    let left = Vec3::new(-10.0, 0.0, 1.0);

    let mut scene = Scene::new();

    scene.add_object(
        ShadeableObject::new(Mesh::triangle(a, b, c))
            .with_shader(Shader::ambient(Color::splat(0.1)))
            .with_shader(Shader::diffuse(Color::ONE))
            .with_reflectiveness(0.3),
    );
    scene.add_object(
        ShadeableObject::new(Mesh::triangle(a + right, b + right, c + right))
            .with_shader(Shader::ambient(Color::new(0.1, 0.0, 0.0)))
            .with_shader(Shader::diffuse(Color::new(1.0, 0.0, 0.0)))
            .with_shader(Shader::specular(Color::ONE, 20.0)),
    );
    scene.add_object(
        ShadeableObject::new(Mesh::triangle(a + left, b + left, c + left))
            .with_shader(Shader::diffuse(Color::new(0.0, 0.0, 1.0)))
            .with_transparency(0.4),
    );

    scene.add_light(Light::new(Vec3::new(0.0, 15.0, 10.0), Color::splat(0.8)));

    log::info!("Built scene with {} objects", scene.objects().len());
    scene
}
