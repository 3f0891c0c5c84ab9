//! Prism math - typed geometry over glam's f64 types.
//!
//! Points, directions and normals are distinct types (`Point3`, `Vector3`,
//! `Normal3`) so that affine and linear quantities cannot be mixed up, and
//! normals are always transformed with the inverse-transpose.

// Re-export glam for convenience
pub use glam::{DMat3, DMat4, DVec2, DVec3};

mod aabb;
mod matrix;
mod ray;
mod transform;
mod vector;

pub use aabb::Aabb;
pub use matrix::{solve_cramer, Mat3Ext};
pub use ray::Ray;
pub use transform::{Mat4Ext, Transform};
pub use vector::{Normal3, Point3, Vector3};

/// Self-intersection epsilon.
///
/// Minimum `t` accepted by every primitive, the tolerance used when testing
/// points against box faces, and the slack in shadow-ray distance checks.
pub const EPSILON: f64 = 1e-4;
