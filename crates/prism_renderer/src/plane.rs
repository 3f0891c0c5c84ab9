//! Infinite plane primitive.

use prism_core::{SceneError, SceneResult};
use prism_math::{Normal3, Point3, Ray, Vector3, EPSILON};

use crate::hittable::{Hit, Hittable, SurfaceHit};
use crate::Material;

/// An infinite plane through `point` with unit normal `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Point3,
    normal: Normal3,
    material: Material,
}

impl Plane {
    /// Create a plane. The normal is normalized and must not be zero-length.
    pub fn new(point: Point3, normal: Vector3, material: Material) -> SceneResult<Self> {
        let normal = normal
            .try_normalized()
            .ok_or(SceneError::ZeroVector("plane normal"))?
            .as_normal();

        Ok(Self {
            point,
            normal,
            material,
        })
    }

    pub fn point(&self) -> Point3 {
        self.point
    }

    pub fn normal(&self) -> Normal3 {
        self.normal
    }

    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let t = plane_distance(self.point, self.normal, ray)?;
        let point = ray.at(t);

        Some(SurfaceHit {
            t,
            point,
            normal: self.normal,
            u: point.x(),
            v: -point.z(),
        })
    }
}

/// Ray parameter where `ray` crosses the plane through `point` with `normal`.
///
/// `None` for rays parallel to the plane or crossings at `t <= EPSILON`.
pub(crate) fn plane_distance(point: Point3, normal: Normal3, ray: &Ray) -> Option<f64> {
    let denom = ray.direction().dot_normal(normal);
    if denom == 0.0 {
        return None;
    }

    let t = (point - ray.origin()).dot_normal(normal) / denom;
    (t > EPSILON).then_some(t)
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.intersect(ray)
            .map(|surface| surface.with_material(ray, &self.material))
    }
}
