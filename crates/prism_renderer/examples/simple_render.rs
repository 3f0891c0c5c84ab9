//! Simple ray tracer example.
//!
//! Renders a small scene with every material type and saves it as PPM.
//! Pass an OBJ file as the first argument to add it to the scene.
//!
//! ```text
//! RUST_LOG=info cargo run --release --example simple_render -- [model.obj]
//! ```

use std::f64::consts::FRAC_PI_4;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Context;
use prism_core::MeshData;
use prism_renderer::{
    render, AxisAlignedBox, Camera, Color, Geometry, ImageBuffer, Light, Material, Mesh, Node,
    Plane, Point3, RefractiveIndex, RenderConfig, SamplingPattern, Sphere, Texture, Transform,
    Vector3, World,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let world = build_scene(std::env::args().nth(1))?;

    let mut rng = StdRng::seed_from_u64(7);
    let camera = Camera::perspective(
        Point3::new(0.0, 2.0, 8.0),
        Vector3::new(0.0, -0.2, -1.0),
        Vector3::Y,
        FRAC_PI_4,
    )?
    .with_pattern(SamplingPattern::random(4, &mut rng)?);

    let config = RenderConfig::default().with_resolution(800, 450);
    let image = render(&world, &camera, &config)?;

    let filename = "output.ppm";
    save_ppm(&image, filename).with_context(|| format!("Failed to save {filename}"))?;
    log::info!("Saved to {}", filename);

    Ok(())
}

fn build_scene(model: Option<String>) -> anyhow::Result<World> {
    let white = Texture::solid(Color::new(0.9, 0.9, 0.9));
    let red = Texture::solid(Color::new(0.9, 0.1, 0.1));

    let mut world = World::new()
        .with_background(Color::new(0.5, 0.7, 1.0))
        .with_ambient(Color::new(0.1, 0.1, 0.1))
        .with_refractive_index(RefractiveIndex::AIR)
        .with_light(Light::point(Color::new(0.8, 0.8, 0.8), Point3::new(4.0, 8.0, 6.0)))
        .with_light(Light::directional(Color::new(0.3, 0.3, 0.3), Vector3::new(-1.0, -1.0, -1.0))?)
        .with_geometry(Plane::new(
            Point3::new(0.0, -1.0, 0.0),
            Vector3::Y,
            Material::lambert(white.clone()),
        )?)
        .with_geometry(Sphere::new(
            Point3::new(-2.5, 0.0, 0.0),
            1.0,
            Material::phong(red, Color::WHITE, 32.0),
        )?)
        .with_geometry(Sphere::new(
            Point3::new(0.0, 0.0, 1.5),
            1.0,
            Material::refractive(white.clone(), RefractiveIndex::GLASS, 4)?,
        )?)
        .with_geometry(AxisAlignedBox::new(
            Point3::new(1.5, -1.0, -1.0),
            Point3::new(3.5, 1.0, 1.0),
            Material::reflective(Texture::solid(Color::BLACK), Color::WHITE, 64.0, 4),
        )?);

    // A squashed sphere placed through a scene-graph node
    let ellipsoid = Node::new(
        Transform::IDENTITY
            .translate(Vector3::new(0.0, 0.0, -3.0))
            .scale(Vector3::new(1.5, 0.5, 1.0))
            .context("Invalid node scale")?,
        vec![Sphere::new(
            Point3::ORIGIN,
            1.0,
            Material::lambert(Texture::solid(Color::new(0.2, 0.6, 0.2))),
        )?
        .into()],
    );
    world.add_geometry(ellipsoid);

    if let Some(path) = model {
        let data = MeshData::load_obj(&path).with_context(|| format!("Failed to load {path}"))?;
        let mesh = Mesh::from_data(&data, Material::lambert(white))?;
        world.add_geometry(Geometry::from(mesh));
    }

    Ok(world)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = image.get(x, y).to_rgb8();
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}
