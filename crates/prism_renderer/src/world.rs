//! The scene: geometry, lights and global shading parameters.

use prism_core::Color;
use prism_math::Ray;

use crate::hittable::{nearest, Hit, Hittable};
use crate::material::RefractiveIndex;
use crate::{Camera, Geometry, Light};

/// Everything a render needs besides the image size.
///
/// Built once and then shared read-only by all render workers; only the
/// active camera can be swapped through `&mut self`.
#[derive(Debug, Clone)]
pub struct World {
    geometries: Vec<Geometry>,
    lights: Vec<Light>,
    background: Color,
    ambient: Color,
    refractive_index: f64,
    camera: Option<Camera>,
}

impl World {
    /// An empty world with a black background, no ambient light and
    /// vacuum as the surrounding medium.
    pub fn new() -> Self {
        Self {
            geometries: Vec::new(),
            lights: Vec::new(),
            background: Color::BLACK,
            ambient: Color::BLACK,
            refractive_index: RefractiveIndex::VACUUM,
            camera: None,
        }
    }

    /// Set the color of rays that hit nothing.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set the ambient light color.
    pub fn with_ambient(mut self, color: Color) -> Self {
        self.ambient = color;
        self
    }

    /// Set the refractive index of the surrounding medium.
    pub fn with_refractive_index(mut self, index: f64) -> Self {
        self.refractive_index = index;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_geometry(mut self, geometry: impl Into<Geometry>) -> Self {
        self.add_geometry(geometry);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    pub fn add_geometry(&mut self, geometry: impl Into<Geometry>) {
        self.geometries.push(geometry.into());
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Replace the active camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for World {
    /// Nearest hit over all top-level geometry (linear scan).
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        nearest(self.geometries.iter().filter_map(|g| g.hit(ray)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};
    use prism_core::Texture;
    use prism_math::{Point3, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn material(color: Color) -> Material {
        Material::single_color(Texture::solid(color))
    }

    #[test]
    fn test_empty_world_misses() {
        let world = World::new();
        assert!(world.hit(&Ray::new(Point3::ORIGIN, Vector3::Z)).is_none());
        assert_eq!(world.refractive_index(), 1.0);
    }

    #[test]
    fn test_nearest_geometry_wins() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);
        let world = World::new()
            .with_geometry(Plane::new(Point3::new(0.0, 0.0, -10.0), Vector3::Z, material(blue)).unwrap())
            .with_geometry(Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0, material(red)).unwrap());

        let hit = world.hit(&Ray::new(Point3::ORIGIN, -Vector3::Z)).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-9);
        assert_eq!(hit.material.texture().color_for(0.0, 0.0), red);

        let hit = world.hit(&Ray::new(Point3::new(5.0, 0.0, 0.0), -Vector3::Z)).unwrap();
        assert!((hit.t - 10.0).abs() < 1e-9);
        assert_eq!(hit.material.texture().color_for(0.0, 0.0), blue);
    }

    #[test]
    fn test_camera_can_be_replaced() {
        let first = Camera::perspective(Point3::ORIGIN, -Vector3::Z, Vector3::Y, FRAC_PI_2).unwrap();
        let second = Camera::orthographic(Point3::ORIGIN, -Vector3::Z, Vector3::Y, 2.0).unwrap();

        let mut world = World::new().with_camera(first);
        assert!(world.camera().is_some());

        world.set_camera(second);
        assert!(matches!(
            world.camera().map(Camera::projection),
            Some(crate::Projection::Orthographic { .. })
        ));
    }
}
