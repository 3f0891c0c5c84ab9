use crate::{Point3, Vector3};

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction, so `t` always measures
/// distance from the origin. Every intersection and shading routine relies
/// on that.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Create a new ray. `direction` must not be zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        debug_assert!(
            direction.magnitude() > 0.0,
            "ray direction must not be zero-length"
        );
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Unit-length direction.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Parameter t at which the ray reaches `p`, assuming `p` lies on the ray.
    pub fn t_of(&self, p: Point3) -> f64 {
        (p - self.origin).magnitude()
    }
}
