// Affine transforms for scene-graph nodes
//
// A Transform carries the forward matrix and its inverse side by side. Every
// builder composes onto both at once, so the pair never drifts apart.
// Note: glam::DMat4 already provides transform_point3(), transform_vector3()
// and inverse(); Mat4Ext adds the typed wrappers and a singularity check.

use glam::{DMat4, DVec3};

use crate::{Normal3, Point3, Ray, Vector3};

/// Extension trait for DMat4 working on the typed point/vector wrappers.
pub trait Mat4Ext {
    /// Inverse matrix, or `None` when the determinant is zero.
    fn try_inverse(&self) -> Option<DMat4>;

    /// Transform a point (w=1, translation applies).
    fn transform_point(&self, point: Point3) -> Point3;

    /// Transform a direction (w=0, translation does not apply).
    fn transform_direction(&self, vector: Vector3) -> Vector3;
}

impl Mat4Ext for DMat4 {
    fn try_inverse(&self) -> Option<DMat4> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(self.inverse())
    }

    fn transform_point(&self, point: Point3) -> Point3 {
        Point3::from_dvec3(self.transform_point3(point.to_dvec3()))
    }

    fn transform_direction(&self, vector: Vector3) -> Vector3 {
        Vector3::from_dvec3(self.transform_vector3(vector.to_dvec3()))
    }
}

/// Forward (object → world) and inverse (world → object) matrices.
///
/// Builders right-multiply: `Transform::IDENTITY.scale(s)?.translate(t)`
/// yields `S * T`, i.e. the translation is applied to object points first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
    inverse: DMat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
    };

    /// Build from an arbitrary matrix, or `None` if it is not invertible.
    pub fn from_matrix(matrix: DMat4) -> Option<Self> {
        matrix
            .try_inverse()
            .map(|inverse| Self { matrix, inverse })
    }

    fn compose(&self, m: DMat4, i: DMat4) -> Self {
        Self {
            matrix: self.matrix * m,
            inverse: i * self.inverse,
        }
    }

    pub fn translate(&self, offset: Vector3) -> Self {
        let v = offset.to_dvec3();
        self.compose(DMat4::from_translation(v), DMat4::from_translation(-v))
    }

    /// Non-uniform scale. Returns `None` if any factor is zero.
    pub fn scale(&self, factors: Vector3) -> Option<Self> {
        let v = factors.to_dvec3();
        if v.x == 0.0 || v.y == 0.0 || v.z == 0.0 {
            return None;
        }
        Some(self.compose(DMat4::from_scale(v), DMat4::from_scale(DVec3::ONE / v)))
    }

    pub fn rotate_x(&self, angle: f64) -> Self {
        self.compose(DMat4::from_rotation_x(angle), DMat4::from_rotation_x(-angle))
    }

    pub fn rotate_y(&self, angle: f64) -> Self {
        self.compose(DMat4::from_rotation_y(angle), DMat4::from_rotation_y(-angle))
    }

    pub fn rotate_z(&self, angle: f64) -> Self {
        self.compose(DMat4::from_rotation_z(angle), DMat4::from_rotation_z(-angle))
    }

    /// Object → world matrix.
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// World → object matrix.
    pub fn inverse(&self) -> DMat4 {
        self.inverse
    }

    /// The inverse transform (matrices swapped).
    pub fn inverted(&self) -> Self {
        Self {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    /// Map a world-space ray into object space.
    ///
    /// The direction is re-normalized, so object-space `t` values differ from
    /// world-space ones under scaling; only their ordering carries over.
    pub fn ray_to_object(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.inverse.transform_point(ray.origin()),
            self.inverse.transform_direction(ray.direction()),
        )
    }

    pub fn point_to_world(&self, point: Point3) -> Point3 {
        self.matrix.transform_point(point)
    }

    /// Map an object-space normal to world space with the inverse-transpose.
    pub fn normal_to_world(&self, normal: Normal3) -> Normal3 {
        let n = self.inverse.transpose().transform_vector3(normal.to_dvec3());
        Normal3::from_dvec3(n).normalized()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
