//! Points, directions and normals.
//!
//! All three wrap a `glam::DVec3`, but they are separate types so that only
//! geometrically meaningful operations compile: subtracting two points yields
//! a direction, a point can be offset by a direction, and two points can never
//! be added together. Normals are kept apart from directions because they
//! transform with the inverse-transpose of a matrix (see [`crate::Transform`]).

use glam::DVec3;
use std::ops::{Add, Mul, Neg, Sub};

/// A position in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3(DVec3);

impl Point3 {
    pub const ORIGIN: Point3 = Point3(DVec3::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn from_dvec3(v: DVec3) -> Self {
        Self(v)
    }

    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point3) -> f64 {
        self.0.distance(other.0)
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::from_dvec3(self.0 - rhs.0)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vector3) -> Point3 {
        Point3(self.0 + rhs.v)
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Point3 {
        Point3(self.0 - rhs.v)
    }
}

/// A direction (linear vector) with its magnitude cached at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    v: DVec3,
    magnitude: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        v: DVec3::ZERO,
        magnitude: 0.0,
    };
    pub const X: Vector3 = Vector3 {
        v: DVec3::X,
        magnitude: 1.0,
    };
    pub const Y: Vector3 = Vector3 {
        v: DVec3::Y,
        magnitude: 1.0,
    };
    pub const Z: Vector3 = Vector3 {
        v: DVec3::Z,
        magnitude: 1.0,
    };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn from_dvec3(v: DVec3) -> Self {
        Self {
            v,
            magnitude: v.length(),
        }
    }

    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        self.v
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.v.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.v.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.v.z
    }

    /// Length of the vector (cached).
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[inline]
    pub fn dot(self, other: Vector3) -> f64 {
        self.v.dot(other.v)
    }

    #[inline]
    pub fn dot_normal(self, n: Normal3) -> f64 {
        self.v.dot(n.0)
    }

    #[inline]
    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3::from_dvec3(self.v.cross(other.v))
    }

    /// Unit-length copy of this vector.
    ///
    /// The vector must not be zero-length; a zero vector yields NaN components.
    /// Use [`Vector3::try_normalized`] where the input is not trusted.
    #[inline]
    pub fn normalized(self) -> Vector3 {
        Vector3 {
            v: self.v / self.magnitude,
            magnitude: 1.0,
        }
    }

    /// Unit-length copy, or `None` for zero-length or non-finite vectors.
    pub fn try_normalized(self) -> Option<Vector3> {
        if self.magnitude > 0.0 && self.magnitude.is_finite() {
            Some(self.normalized())
        } else {
            None
        }
    }

    /// Mirror this (incoming) direction about a unit normal: `d - 2(d·n)n`.
    #[inline]
    pub fn reflect(self, n: Normal3) -> Vector3 {
        self - n.as_vector() * (2.0 * self.dot_normal(n))
    }

    #[inline]
    pub fn as_normal(self) -> Normal3 {
        Normal3(self.v)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::from_dvec3(self.v + rhs.v)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::from_dvec3(self.v - rhs.v)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    #[inline]
    fn neg(self) -> Vector3 {
        Vector3 {
            v: -self.v,
            magnitude: self.magnitude,
        }
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3 {
            v: self.v * rhs,
            magnitude: self.magnitude * rhs.abs(),
        }
    }
}

/// A surface normal.
///
/// Not necessarily unit length (barycentric blends are not); call
/// [`Normal3::normalized`] before shading with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal3(DVec3);

impl Normal3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn from_dvec3(v: DVec3) -> Self {
        Self(v)
    }

    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn dot(self, v: Vector3) -> f64 {
        self.0.dot(v.v)
    }

    #[inline]
    pub fn as_vector(self) -> Vector3 {
        Vector3::from_dvec3(self.0)
    }

    #[inline]
    pub fn normalized(self) -> Normal3 {
        Normal3(self.0.normalize())
    }
}

impl Add for Normal3 {
    type Output = Normal3;

    #[inline]
    fn add(self, rhs: Normal3) -> Normal3 {
        Normal3(self.0 + rhs.0)
    }
}

impl Neg for Normal3 {
    type Output = Normal3;

    #[inline]
    fn neg(self) -> Normal3 {
        Normal3(-self.0)
    }
}

impl Mul<f64> for Normal3 {
    type Output = Normal3;

    #[inline]
    fn mul(self, rhs: f64) -> Normal3 {
        Normal3(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_difference_is_vector() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0, 2.0, 1.0);
        let d: Vector3 = a - b;

        assert_eq!(d.to_dvec3(), DVec3::new(0.0, 0.0, 2.0));
        assert_eq!(d.magnitude(), 2.0);
        assert_eq!(b + d, a);
    }

    #[test]
    fn test_magnitude_is_cached_through_ops() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!((v * -2.0).magnitude(), 10.0);
        assert_eq!((-v).magnitude(), 5.0);
        assert!((v.normalized().magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_normalized_rejects_zero() {
        assert!(Vector3::ZERO.try_normalized().is_none());
        assert!(Vector3::new(0.0, 0.0, 2.0).try_normalized().is_some());
    }

    #[test]
    fn test_cross_product_right_handed() {
        let z = Vector3::X.cross(Vector3::Y);
        assert_eq!(z.to_dvec3(), DVec3::Z);
    }

    #[test]
    fn test_reflection_law() {
        // r·n == -d·n for a spread of incoming directions
        let normals = [
            Normal3::new(0.0, 1.0, 0.0),
            Normal3::new(1.0, 1.0, 0.0).normalized(),
            Normal3::new(-0.3, 0.2, 0.9).normalized(),
        ];
        let directions = [
            Vector3::new(1.0, -1.0, 0.0),
            Vector3::new(0.2, -0.7, 0.4),
            Vector3::new(-3.0, 1.0, -2.0),
        ];

        for n in normals {
            for d in directions {
                let d = d.normalized();
                let r = d.reflect(n);
                assert!((r.dot_normal(n) + d.dot_normal(n)).abs() < 1e-12);
                assert!((r.magnitude() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_normal_blend() {
        let n = Normal3::new(1.0, 0.0, 0.0) * 0.5 + Normal3::new(0.0, 1.0, 0.0) * 0.5;
        let unit = n.normalized();
        assert!((unit.to_dvec3().length() - 1.0).abs() < 1e-12);
        assert!((unit.x() - unit.y()).abs() < 1e-12);
    }
}
