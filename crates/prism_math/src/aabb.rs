use glam::DVec3;

use crate::{Point3, Ray, EPSILON};

/// Axis-Aligned Bounding Box used to pre-filter rays against meshes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// An empty box (min > max, contains nothing); grows from here.
    pub const EMPTY: Aabb = Aabb {
        min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    /// Create an AABB from two opposite corner points (in any order).
    pub fn from_points(a: Point3, b: Point3) -> Self {
        let (a, b) = (a.to_dvec3(), b.to_dvec3());
        let mut aabb = Self {
            min: Point3::from_dvec3(a.min(b)),
            max: Point3::from_dvec3(a.max(b)),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Smallest box containing every point of the iterator.
    pub fn enclosing<I: IntoIterator<Item = Point3>>(points: I) -> Self {
        let mut aabb = points.into_iter().fold(Aabb::EMPTY, |acc, p| acc.grow(p));
        if !aabb.is_empty() {
            aabb.pad_to_minimums();
        }
        aabb
    }

    /// Copy of this box enlarged to contain `p`.
    pub fn grow(&self, p: Point3) -> Self {
        Self {
            min: Point3::from_dvec3(self.min.to_dvec3().min(p.to_dvec3())),
            max: Point3::from_dvec3(self.max.to_dvec3().max(p.to_dvec3())),
        }
    }

    pub fn is_empty(&self) -> bool {
        let (min, max) = (self.min.to_dvec3(), self.max.to_dvec3());
        min.x > max.x || min.y > max.y || min.z > max.z
    }

    /// True if `p` lies inside the box, allowing `tolerance` on every face.
    pub fn contains(&self, p: Point3, tolerance: f64) -> bool {
        let p = p.to_dvec3();
        let min = self.min.to_dvec3() - DVec3::splat(tolerance);
        let max = self.max.to_dvec3() + DVec3::splat(tolerance);
        p.cmpge(min).all() && p.cmple(max).all()
    }

    /// Test if a ray intersects this AABB in front of its origin.
    ///
    /// Uses the slab method. Returns the parameter where the ray enters the
    /// box (or `EPSILON` if the origin is already inside).
    pub fn hit(&self, r: &Ray) -> Option<f64> {
        let origin = r.origin().to_dvec3();
        let dir = r.direction().to_dvec3();
        let (min, max) = (self.min.to_dvec3(), self.max.to_dvec3());

        let mut t_min = EPSILON;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let adinv = 1.0 / dir[axis];
            let mut t0 = (min[axis] - origin[axis]) * adinv;
            let mut t1 = (max[axis] - origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max <= t_min {
                return None;
            }
        }

        Some(t_min)
    }

    /// Pad axes to avoid zero-width boxes (flat meshes).
    fn pad_to_minimums(&mut self) {
        let delta = EPSILON;
        let mut min = self.min.to_dvec3();
        let mut max = self.max.to_dvec3();
        for axis in 0..3 {
            if max[axis] - min[axis] < delta {
                min[axis] -= delta / 2.0;
                max[axis] += delta / 2.0;
            }
        }
        self.min = Point3::from_dvec3(min);
        self.max = Point3::from_dvec3(max);
    }
}
