//! Prism Renderer - Whitted-style recursive ray tracing.
//!
//! Casts one or more camera rays per pixel, finds the nearest surface with
//! a linear scan over the scene and shades it with Lambert/Phong lighting,
//! recursing for mirror reflection and refraction. Rows are rendered in
//! parallel bands on a rayon thread pool.
//!
//! # Example
//!
//! ```ignore
//! use prism_renderer::{render, Camera, Light, Material, RenderConfig, Sphere, World};
//!
//! let world = World::new()
//!     .with_geometry(Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0, material)?)
//!     .with_light(Light::point(Color::WHITE, Point3::new(0.0, 5.0, 5.0)));
//! let camera = Camera::perspective(Point3::ORIGIN, -Vector3::Z, Vector3::Y, FRAC_PI_2)?;
//! let image = render(&world, &camera, &RenderConfig::default())?;
//! ```

mod aabox;
mod band;
mod camera;
mod geometry;
mod hittable;
mod light;
mod material;
mod mesh;
mod node;
mod plane;
mod renderer;
mod sphere;
mod triangle;
mod world;

pub use aabox::AxisAlignedBox;
pub use band::{generate_bands, render_band, Band};
pub use camera::{Camera, Projection};
pub use geometry::Geometry;
pub use hittable::{Hit, Hittable, SurfaceHit};
pub use light::{Light, LightSource};
pub use material::{
    Fresnel, Lambert, Material, Phong, Reflective, Refractive, RefractiveIndex, Shade, SingleColor,
};
pub use mesh::Mesh;
pub use node::Node;
pub use plane::Plane;
pub use renderer::{
    render, render_pixel, render_with_sink, trace, FrameSink, ImageBuffer, NullSink, RenderConfig,
    RenderError,
};
pub use sphere::Sphere;
pub use triangle::{Triangle, TriangleShape};
pub use world::World;

/// Re-export the scene data and math types used in the public API
pub use prism_core::{Color, SamplingPattern, SceneError, SceneResult, Texture};
pub use prism_math::{Normal3, Point3, Ray, Transform, Vector3};
