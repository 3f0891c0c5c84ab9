//! Surface materials and shading.
//!
//! A material turns a `Hit` into a color. Local illumination follows the
//! Lambert and Phong models; reflective and refractive materials recurse
//! into the world, with the depth of the current bounce passed along so
//! recursion stops at the material's cap.

use std::sync::Arc;

use prism_core::{Color, SceneError, SceneResult, Texture};
use prism_math::{Point3, Ray, Vector3};

use crate::hittable::{Hit, Hittable};
use crate::{Light, World};

/// Trait for anything that can compute a surface color.
pub trait Shade: Send + Sync {
    /// Color seen along `hit.ray`. `depth` is 0 for rays from the camera.
    fn color_for(&self, hit: &Hit<'_>, world: &World, depth: u32) -> Color;
}

/// Refractive indices of common media.
pub struct RefractiveIndex;

impl RefractiveIndex {
    pub const VACUUM: f64 = 1.0;
    pub const AIR: f64 = 1.0003;
    pub const ICE: f64 = 1.31;
    pub const WATER: f64 = 1.33;
    pub const GLASS: f64 = 1.5;
    pub const DIAMOND: f64 = 2.42;
}

/// Unlit texture color scaled by the ambient light.
#[derive(Debug, Clone)]
pub struct SingleColor {
    texture: Arc<Texture>,
}

/// Ideal diffuse reflection.
#[derive(Debug, Clone)]
pub struct Lambert {
    texture: Arc<Texture>,
}

/// Diffuse plus a specular highlight.
#[derive(Debug, Clone)]
pub struct Phong {
    texture: Arc<Texture>,
    specular: Color,
    exponent: f64,
}

/// Phong shading plus a mirror reflection traced up to `max_depth` bounces.
#[derive(Debug, Clone)]
pub struct Reflective {
    phong: Phong,
    max_depth: u32,
}

/// Transparent medium weighted by Schlick's Fresnel approximation.
#[derive(Debug, Clone)]
pub struct Refractive {
    texture: Arc<Texture>,
    index: f64,
    max_depth: u32,
}

/// Any material a primitive can carry.
#[derive(Debug, Clone)]
pub enum Material {
    SingleColor(SingleColor),
    Lambert(Lambert),
    Phong(Phong),
    Reflective(Reflective),
    Refractive(Refractive),
}

impl Material {
    pub fn single_color(texture: impl Into<Arc<Texture>>) -> Self {
        Material::SingleColor(SingleColor {
            texture: texture.into(),
        })
    }

    pub fn lambert(texture: impl Into<Arc<Texture>>) -> Self {
        Material::Lambert(Lambert {
            texture: texture.into(),
        })
    }

    pub fn phong(texture: impl Into<Arc<Texture>>, specular: Color, exponent: f64) -> Self {
        Material::Phong(Phong::new(texture, specular, exponent))
    }

    pub fn reflective(
        texture: impl Into<Arc<Texture>>,
        specular: Color,
        exponent: f64,
        max_depth: u32,
    ) -> Self {
        Material::Reflective(Reflective {
            phong: Phong::new(texture, specular, exponent),
            max_depth,
        })
    }

    /// A refractive material. `index` must be positive.
    pub fn refractive(
        texture: impl Into<Arc<Texture>>,
        index: f64,
        max_depth: u32,
    ) -> SceneResult<Self> {
        if index.is_nan() || index <= 0.0 {
            return Err(SceneError::InvalidRefractiveIndex(index));
        }

        Ok(Material::Refractive(Refractive {
            texture: texture.into(),
            index,
            max_depth,
        }))
    }

    pub fn texture(&self) -> &Texture {
        let texture: &Arc<Texture> = match self {
            Material::SingleColor(m) => &m.texture,
            Material::Lambert(m) => &m.texture,
            Material::Phong(m) => &m.texture,
            Material::Reflective(m) => &m.phong.texture,
            Material::Refractive(m) => &m.texture,
        };
        texture
    }
}

impl Shade for Material {
    fn color_for(&self, hit: &Hit<'_>, world: &World, depth: u32) -> Color {
        match self {
            Material::SingleColor(m) => m.color_for(hit, world, depth),
            Material::Lambert(m) => m.color_for(hit, world, depth),
            Material::Phong(m) => m.color_for(hit, world, depth),
            Material::Reflective(m) => m.color_for(hit, world, depth),
            Material::Refractive(m) => m.color_for(hit, world, depth),
        }
    }
}

/// Lights that reach `point`. Lights without shadows always count.
fn lights_reaching<'w>(point: Point3, world: &'w World) -> impl Iterator<Item = &'w Light> + 'w {
    world
        .lights()
        .iter()
        .filter(move |light| !light.casts_shadows() || light.illuminates(point, world))
}

/// Color of whatever `ray` hits next, or the background.
fn trace(ray: &Ray, world: &World, depth: u32) -> Color {
    match world.hit(ray) {
        Some(next) => next.material.color_for(&next, world, depth),
        None => world.background(),
    }
}

impl Shade for SingleColor {
    fn color_for(&self, _hit: &Hit<'_>, world: &World, _depth: u32) -> Color {
        self.texture.color_for(0.0, 0.0) * world.ambient()
    }
}

impl Shade for Lambert {
    fn color_for(&self, hit: &Hit<'_>, world: &World, _depth: u32) -> Color {
        let diffuse = self.texture.color_for(hit.u, hit.v);

        let incoming = lights_reaching(hit.point, world).fold(world.ambient(), |sum, light| {
            let l = light.direction_from(hit.point);
            sum + light.color() * hit.normal.dot(l).max(0.0)
        });

        diffuse * incoming
    }
}

impl Phong {
    fn new(texture: impl Into<Arc<Texture>>, specular: Color, exponent: f64) -> Self {
        Self {
            texture: texture.into(),
            specular,
            exponent,
        }
    }
}

impl Shade for Phong {
    fn color_for(&self, hit: &Hit<'_>, world: &World, _depth: u32) -> Color {
        let diffuse = self.texture.color_for(hit.u, hit.v);
        let view = -hit.ray.direction();

        lights_reaching(hit.point, world).fold(diffuse * world.ambient(), |sum, light| {
            let l = light.direction_from(hit.point);
            let r = (-l).reflect(hit.normal);

            let lambert = diffuse * light.color() * hit.normal.dot(l).max(0.0);
            let highlight = self.specular * light.color() * r.dot(view).max(0.0).powf(self.exponent);
            sum + lambert + highlight
        })
    }
}

impl Reflective {
    /// The recursive part of the color: black once `depth` reaches the cap.
    pub fn reflection(&self, hit: &Hit<'_>, world: &World, depth: u32) -> Color {
        if depth >= self.max_depth {
            return Color::BLACK;
        }

        let direction = hit.ray.direction().reflect(hit.normal);
        trace(&Ray::new(hit.point, direction), world, depth + 1)
    }
}

impl Shade for Reflective {
    fn color_for(&self, hit: &Hit<'_>, world: &World, depth: u32) -> Color {
        self.phong.color_for(hit, world, depth) + self.reflection(hit, world, depth)
    }
}

/// Fresnel split of light at a refractive boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fresnel {
    /// Reflected fraction
    pub reflectance: f64,
    /// Transmitted fraction, `1 - reflectance`
    pub transmittance: f64,
}

impl Fresnel {
    /// Schlick's approximation for light arriving at `cos_i` from medium `n1`.
    pub fn schlick(cos_i: f64, n1: f64, n2: f64) -> Self {
        let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
        let reflectance = (r0 + (1.0 - r0) * (1.0 - cos_i.clamp(0.0, 1.0)).powi(5)).clamp(0.0, 1.0);
        Self {
            reflectance,
            transmittance: 1.0 - reflectance,
        }
    }

    /// All light reflected.
    pub const TOTAL_REFLECTION: Fresnel = Fresnel {
        reflectance: 1.0,
        transmittance: 0.0,
    };
}

impl Refractive {
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Direction the ray continues in, and the Fresnel split at this hit.
    ///
    /// Falls back to the mirror direction on total internal reflection.
    pub fn scatter(&self, hit: &Hit<'_>, world: &World) -> (Vector3, Fresnel) {
        let d = hit.ray.direction();
        let mut normal = hit.normal;
        let (mut n1, mut n2) = (world.refractive_index(), self.index);

        // Leaving the medium
        if d.dot_normal(normal) > 0.0 {
            normal = -normal;
            std::mem::swap(&mut n1, &mut n2);
        }

        let cos_i = -d.dot_normal(normal);
        let eta = n1 / n2;
        let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return (d.reflect(normal), Fresnel::TOTAL_REFLECTION);
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let transmitted = d * eta + normal.as_vector() * (eta * cos_i - cos_t);
        (transmitted.normalized(), Fresnel::schlick(cos_i, n1, n2))
    }
}

impl Shade for Refractive {
    fn color_for(&self, hit: &Hit<'_>, world: &World, depth: u32) -> Color {
        let (direction, fresnel) = self.scatter(hit, world);
        let surface = self.texture.color_for(hit.u, hit.v);

        if depth >= self.max_depth {
            return surface * fresnel.reflectance;
        }

        let ray = Ray::new(hit.point, direction);
        match world.hit(&ray) {
            Some(next) => {
                self.texture.color_for(next.u, next.v) * fresnel.reflectance
                    + next.material.color_for(&next, world, depth + 1) * fresnel.transmittance
            }
            None => surface * fresnel.reflectance + world.background() * fresnel.transmittance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::SurfaceHit;
    use crate::{Plane, Sphere};
    use prism_math::Normal3;

    fn hit_with<'a>(ray: Ray, normal: Normal3, material: &'a Material) -> Hit<'a> {
        SurfaceHit {
            t: 1.0,
            point: ray.at(1.0),
            normal,
            u: 0.0,
            v: 0.0,
        }
        .with_material(&ray, material)
    }

    fn lit_world() -> World {
        World::new()
            .with_ambient(Color::new(0.1, 0.1, 0.1))
            .with_light(Light::point(Color::WHITE, Point3::new(0.0, 10.0, 0.0)))
    }

    #[test]
    fn test_single_color_ignores_lights() {
        let material = Material::single_color(Texture::solid(Color::new(1.0, 0.5, 0.0)));
        let world = lit_world().with_ambient(Color::new(0.5, 0.5, 0.5));
        let hit = hit_with(
            Ray::new(Point3::new(0.0, 1.0, 0.0), -Vector3::Y),
            Normal3::new(0.0, 1.0, 0.0),
            &material,
        );

        assert_eq!(material.color_for(&hit, &world, 0), Color::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_lambert_facing_light() {
        let material = Material::lambert(Texture::solid(Color::new(0.5, 0.5, 0.5)));
        let world = lit_world();
        let hit = hit_with(
            Ray::new(Point3::new(0.0, 1.0, 0.0), -Vector3::Y),
            Normal3::new(0.0, 1.0, 0.0),
            &material,
        );

        // (ambient 0.1 + cos 1.0) clamps to 1, times the diffuse 0.5
        let color = material.color_for(&hit, &world, 0);
        assert!((color.r() - 0.5).abs() < 1e-9);

        // Facing away gets only ambient
        let hit = hit_with(
            Ray::new(Point3::new(0.0, -1.0, 0.0), Vector3::Y),
            Normal3::new(0.0, -1.0, 0.0),
            &material,
        );
        let color = material.color_for(&hit, &world, 0);
        assert!((color.r() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_lambert_sums_lights() {
        let material = Material::lambert(Texture::solid(Color::WHITE));
        let world = World::new()
            .with_ambient(Color::BLACK)
            .with_light(Light::point(Color::new(0.25, 0.25, 0.25), Point3::new(0.0, 10.0, 0.0)))
            .with_light(Light::point(Color::new(0.25, 0.25, 0.25), Point3::new(0.0, 20.0, 0.0)));
        let hit = hit_with(
            Ray::new(Point3::new(0.0, 1.0, 0.0), -Vector3::Y),
            Normal3::new(0.0, 1.0, 0.0),
            &material,
        );

        let color = material.color_for(&hit, &world, 0);
        assert!((color.g() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_shadowed_light_skipped_unless_shadows_disabled() {
        let material = Material::lambert(Texture::solid(Color::WHITE));
        let blocker = Sphere::new(Point3::new(0.0, 5.0, 0.0), 1.0, material.clone()).unwrap();
        let light = Light::point(Color::WHITE, Point3::new(0.0, 10.0, 0.0));
        let hit = hit_with(
            Ray::new(Point3::new(0.0, 1.0, 0.0), -Vector3::Y),
            Normal3::new(0.0, 1.0, 0.0),
            &material,
        );

        let world = World::new().with_geometry(blocker.clone()).with_light(light);
        assert_eq!(material.color_for(&hit, &world, 0), Color::BLACK);

        let world = World::new()
            .with_geometry(blocker)
            .with_light(light.with_shadows(false));
        assert_eq!(material.color_for(&hit, &world, 0), Color::WHITE);
    }

    #[test]
    fn test_phong_highlight_along_mirror_direction() {
        let material = Material::phong(Texture::solid(Color::BLACK), Color::WHITE, 20.0);
        let world = World::new()
            .with_ambient(Color::BLACK)
            .with_light(Light::directional(Color::WHITE, Vector3::new(1.0, -1.0, 0.0)).unwrap());
        let normal = Normal3::new(0.0, 1.0, 0.0);

        // Viewer on the mirror side sees the full highlight
        let origin = Point3::new(1.0, 1.0, 0.0);
        let hit = hit_with(Ray::new(origin, Point3::ORIGIN - origin), normal, &material);
        let color = material.color_for(&hit, &world, 0);
        assert!((color.r() - 1.0).abs() < 1e-9);

        // Viewer on the light's side sees none
        let origin = Point3::new(-1.0, 1.0, 0.0);
        let hit = hit_with(Ray::new(origin, Point3::ORIGIN - origin), normal, &material);
        let color = material.color_for(&hit, &world, 0);
        assert!(color.r() < 1e-9);
    }

    #[test]
    fn test_reflection_black_at_max_depth() {
        let mirror = Reflective {
            phong: Phong::new(Texture::solid(Color::BLACK), Color::BLACK, 1.0),
            max_depth: 3,
        };
        let world = World::new().with_background(Color::WHITE);
        let material = Material::Reflective(mirror.clone());
        let hit = hit_with(
            Ray::new(Point3::new(0.0, 1.0, 0.0), -Vector3::Y),
            Normal3::new(0.0, 1.0, 0.0),
            &material,
        );

        assert_eq!(mirror.reflection(&hit, &world, 3), Color::BLACK);
        assert_eq!(mirror.reflection(&hit, &world, 7), Color::BLACK);
        // Below the cap the reflected ray escapes to the background
        assert_eq!(mirror.reflection(&hit, &world, 2), Color::WHITE);
    }

    #[test]
    fn test_reflection_picks_up_mirrored_object() {
        let mirror = Material::reflective(Texture::solid(Color::BLACK), Color::BLACK, 1.0, 2);
        let red = Material::single_color(Texture::solid(Color::new(1.0, 0.0, 0.0)));
        let wall = Plane::new(Point3::new(0.0, 0.0, 5.0), -Vector3::Z, red).unwrap();
        let world = World::new()
            .with_ambient(Color::WHITE)
            .with_geometry(wall);

        // Ray hits the mirror at 45 degrees and bounces towards +z
        let origin = Point3::new(0.0, 1.0, -1.0);
        let hit = hit_with(
            Ray::new(origin, Vector3::new(0.0, -1.0, 1.0)),
            Normal3::new(0.0, 1.0, 0.0),
            &mirror,
        );

        let color = mirror.color_for(&hit, &world, 0);
        assert_eq!(color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_schlick_bounds() {
        for n2 in [1.0, 1.33, 1.5, 2.42] {
            for i in 0..=20 {
                let cos_i = i as f64 / 20.0;
                let f = Fresnel::schlick(cos_i, 1.0, n2);
                assert!((0.0..=1.0).contains(&f.reflectance));
                assert!((f.reflectance + f.transmittance - 1.0).abs() < 1e-12);
            }
        }

        // Normal incidence on glass reflects about 4%
        let f = Fresnel::schlick(1.0, 1.0, 1.5);
        assert!((f.reflectance - 0.04).abs() < 1e-12);
        // Grazing incidence reflects everything
        let f = Fresnel::schlick(0.0, 1.0, 1.5);
        assert!((f.reflectance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_refraction_bends_towards_normal() {
        let glass = Material::refractive(Texture::solid(Color::WHITE), RefractiveIndex::GLASS, 4)
            .unwrap();
        let Material::Refractive(refractive) = &glass else {
            unreachable!()
        };
        let world = World::new();

        let origin = Point3::new(-1.0, 1.0, 0.0);
        let hit = hit_with(
            Ray::new(origin, Vector3::new(1.0, -1.0, 0.0)),
            Normal3::new(0.0, 1.0, 0.0),
            &glass,
        );
        let (dir, fresnel) = refractive.scatter(&hit, &world);

        // Snell: sin(t) = sin(45°) / 1.5
        let sin_t = dir.x() / dir.magnitude();
        assert!((sin_t - (0.5f64.sqrt() / 1.5)).abs() < 1e-9);
        assert!(dir.y() < 0.0);
        assert!((fresnel.reflectance + fresnel.transmittance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_internal_reflection() {
        let glass = Material::refractive(Texture::solid(Color::WHITE), RefractiveIndex::GLASS, 4)
            .unwrap();
        let Material::Refractive(refractive) = &glass else {
            unreachable!()
        };
        let world = World::new();

        // Leaving glass at a shallow angle, past the critical angle
        let origin = Point3::new(-1.0, -0.2, 0.0);
        let hit = hit_with(
            Ray::new(origin, Vector3::new(1.0, 0.2, 0.0)),
            Normal3::new(0.0, 1.0, 0.0),
            &glass,
        );
        let (dir, fresnel) = refractive.scatter(&hit, &world);

        assert_eq!(fresnel, Fresnel::TOTAL_REFLECTION);
        assert!(dir.y() < 0.0);
    }

    #[test]
    fn test_refraction_black_transmission_at_max_depth() {
        let glass = Material::refractive(Texture::solid(Color::WHITE), RefractiveIndex::GLASS, 1)
            .unwrap();
        let world = World::new().with_background(Color::WHITE);
        let hit = hit_with(
            Ray::new(Point3::new(0.0, 1.0, 0.0), -Vector3::Y),
            Normal3::new(0.0, 1.0, 0.0),
            &glass,
        );

        // Only the 4% reflected share survives at the cap
        let color = glass.color_for(&hit, &world, 1);
        assert!((color.r() - 0.04).abs() < 1e-9);

        // Below the cap the transmitted ray reaches the white background
        let color = glass.color_for(&hit, &world, 0);
        assert!((color.r() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_refractive_index() {
        assert_eq!(
            Material::refractive(Texture::solid(Color::WHITE), 0.0, 1).unwrap_err(),
            SceneError::InvalidRefractiveIndex(0.0)
        );
    }
}
