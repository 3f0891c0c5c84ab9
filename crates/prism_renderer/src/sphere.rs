//! Sphere primitive for ray tracing.

use std::f64::consts::PI;

use prism_core::{SceneError, SceneResult};
use prism_math::{Point3, Ray, EPSILON};

use crate::hittable::{Hit, Hittable, SurfaceHit};
use crate::Material;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point3, radius: f64, material: Material) -> SceneResult<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Surface coordinates for a point on the sphere.
    ///
    /// `u` runs around the Y axis with +Z at 0.5, `v` runs from the bottom
    /// pole (0) to the top pole (1).
    fn sphere_uv(&self, p: Point3) -> (f64, f64) {
        let d = (p - self.center).normalized();
        let u = 0.5 + d.x().atan2(d.z()) / (2.0 * PI);
        let v = 0.5 - (-d.y()).clamp(-1.0, 1.0).asin() / PI;
        (u, v)
    }

    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let d = ray.direction();
        let oc = ray.origin() - self.center;

        let a = d.dot(d);
        let b = 2.0 * d.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = if discriminant == 0.0 {
            let root = -b / (2.0 * a);
            (root > EPSILON).then_some(root)?
        } else {
            let sqrtd = discriminant.sqrt();
            let near = (-b - sqrtd) / (2.0 * a);
            let far = (-b + sqrtd) / (2.0 * a);
            if near > EPSILON {
                near
            } else if far > EPSILON {
                far
            } else {
                return None;
            }
        };

        let point = ray.at(t);
        let normal = (point - self.center).normalized().as_normal();
        let (u, v) = self.sphere_uv(point);

        Some(SurfaceHit {
            t,
            point,
            normal,
            u,
            v,
        })
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.intersect(ray)
            .map(|surface| surface.with_material(ray, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Color, Texture};
    use prism_math::Vector3;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Point3::ORIGIN,
            1.0,
            Material::lambert(Texture::solid(Color::new(0.5, 0.5, 0.5))),
        )
        .unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));

        let hit = sphere.hit(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert!((hit.normal.z() - 1.0).abs() < 1e-9);
        assert!(hit.normal.x().abs() < 1e-9 && hit.normal.y().abs() < 1e-9);
        assert!((hit.u - 0.5).abs() < 1e-9);
        assert!((hit.v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::Z);
        assert!(sphere.hit(&ray).is_none());

        // Ray passing beside it
        let ray = Ray::new(Point3::new(2.0, 0.0, 5.0), -Vector3::Z);
        assert!(sphere.hit(&ray).is_none());
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::ORIGIN, Vector3::X);

        let hit = sphere.hit(&ray).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-9);
        assert!((hit.point.x() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_poles_map_to_v_edges() {
        let sphere = unit_sphere();

        let top = sphere.hit(&Ray::new(Point3::new(0.0, 5.0, 0.0), -Vector3::Y)).unwrap();
        assert!((top.v - 1.0).abs() < 1e-9);

        let bottom = sphere.hit(&Ray::new(Point3::new(0.0, -5.0, 0.0), Vector3::Y)).unwrap();
        assert!(bottom.v.abs() < 1e-9);
    }

    #[test]
    fn test_invalid_radius() {
        let material = Material::lambert(Texture::solid(Color::WHITE));
        assert_eq!(
            Sphere::new(Point3::ORIGIN, 0.0, material.clone()).unwrap_err(),
            SceneError::InvalidRadius(0.0)
        );
        assert!(Sphere::new(Point3::ORIGIN, -1.0, material.clone()).is_err());
        assert!(Sphere::new(Point3::ORIGIN, f64::NAN, material).is_err());
    }
}
