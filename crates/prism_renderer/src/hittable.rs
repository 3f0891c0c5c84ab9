//! Hittable trait and Hit record for ray-object intersection.

use prism_math::{Normal3, Point3, Ray};

use crate::Material;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Distance along the ray, always greater than `EPSILON`
    pub t: f64,
    /// The ray that produced this hit (world space)
    pub ray: Ray,
    /// Point of intersection
    pub point: Point3,
    /// Unit surface normal at the intersection
    pub normal: Normal3,
    /// Surface coordinates for texturing
    pub u: f64,
    pub v: f64,
    /// Material of the primitive that was hit
    pub material: &'a Material,
}

/// Geometric part of an intersection, before a material is attached.
///
/// Shapes that share one material (mesh triangles) or none at all (node
/// children are resolved recursively) report this, and the owner turns it
/// into a `Hit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub t: f64,
    pub point: Point3,
    pub normal: Normal3,
    pub u: f64,
    pub v: f64,
}

impl SurfaceHit {
    /// Attach the ray and material to form a full hit record.
    pub fn with_material<'a>(self, ray: &Ray, material: &'a Material) -> Hit<'a> {
        Hit {
            t: self.t,
            ray: *ray,
            point: self.point,
            normal: self.normal,
            u: self.u,
            v: self.v,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection in front of the ray origin, if any.
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>>;
}

/// Pick the hit with the smallest `t`.
///
/// On equal `t` the earlier hit wins, so scan order breaks ties.
pub(crate) fn nearest<'a, I>(hits: I) -> Option<Hit<'a>>
where
    I: IntoIterator<Item = Hit<'a>>,
{
    hits.into_iter()
        .fold(None, |closest: Option<Hit<'a>>, hit| match closest {
            Some(c) if c.t <= hit.t => Some(c),
            _ => Some(hit),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Color, Texture};
    use prism_math::Vector3;

    fn hit_at(t: f64, material: &Material) -> Hit<'_> {
        let ray = Ray::new(Point3::ORIGIN, Vector3::Z);
        SurfaceHit {
            t,
            point: ray.at(t),
            normal: Normal3::new(0.0, 0.0, -1.0),
            u: 0.0,
            v: 0.0,
        }
        .with_material(&ray, material)
    }

    #[test]
    fn test_nearest_picks_smallest_t() {
        let material = Material::lambert(Texture::solid(Color::WHITE));
        let hits = vec![hit_at(3.0, &material), hit_at(1.5, &material), hit_at(2.0, &material)];

        let closest = nearest(hits).unwrap();
        assert_eq!(closest.t, 1.5);
        assert_eq!(closest.point, Point3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn test_nearest_of_nothing() {
        assert!(nearest(Vec::<Hit>::new()).is_none());
    }
}
