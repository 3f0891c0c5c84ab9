//! Axis-aligned box primitive.

use prism_core::{SceneError, SceneResult};
use prism_math::{Aabb, Normal3, Point3, Ray, EPSILON};

use crate::hittable::{Hit, Hittable, SurfaceHit};
use crate::plane::plane_distance;
use crate::Material;

/// Outward normals of the six faces; the first three pass through `min`.
const FACE_NORMALS: [Normal3; 6] = [
    Normal3::new(-1.0, 0.0, 0.0),
    Normal3::new(0.0, -1.0, 0.0),
    Normal3::new(0.0, 0.0, -1.0),
    Normal3::new(1.0, 0.0, 0.0),
    Normal3::new(0.0, 1.0, 0.0),
    Normal3::new(0.0, 0.0, 1.0),
];

/// A solid box aligned with the world axes.
#[derive(Debug, Clone)]
pub struct AxisAlignedBox {
    bounds: Aabb,
    material: Material,
}

impl AxisAlignedBox {
    /// Create a box from two opposite corners (in any order).
    ///
    /// The corners must differ on every axis.
    pub fn new(a: Point3, b: Point3, material: Material) -> SceneResult<Self> {
        let (lo, hi) = (a.to_dvec3().min(b.to_dvec3()), a.to_dvec3().max(b.to_dvec3()));
        if lo.cmpeq(hi).any() || !(hi - lo).is_finite() {
            return Err(SceneError::DegenerateBox);
        }

        Ok(Self {
            bounds: Aabb {
                min: Point3::from_dvec3(lo),
                max: Point3::from_dvec3(hi),
            },
            material,
        })
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn face_point(&self, face: usize) -> Point3 {
        if face < 3 {
            self.bounds.min
        } else {
            self.bounds.max
        }
    }

    /// Only faces whose outward side holds the ray origin can be entered.
    /// Of those, the farthest crossing is where the ray enters the box.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let origin = ray.origin();

        let (t, normal) = FACE_NORMALS
            .iter()
            .enumerate()
            .filter(|&(face, n)| (origin - self.face_point(face)).dot_normal(*n) > 0.0)
            .filter_map(|(face, n)| plane_distance(self.face_point(face), *n, ray).map(|t| (t, *n)))
            .fold(None, |best: Option<(f64, Normal3)>, (t, n)| match best {
                Some((best_t, _)) if best_t >= t => best,
                _ => Some((t, n)),
            })?;

        let point = ray.at(t);
        if !self.bounds.contains(point, EPSILON) {
            return None;
        }

        Some(SurfaceHit {
            t,
            point,
            normal,
            u: point.x(),
            v: -point.z(),
        })
    }
}

impl Hittable for AxisAlignedBox {
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.intersect(ray)
            .map(|surface| surface.with_material(ray, &self.material))
    }
}
