//! Scene-graph node: child geometry placed by a transform.

use prism_math::{Ray, Transform, EPSILON};

use crate::hittable::{nearest, Hit, Hittable};
use crate::Geometry;

/// A group of child geometry under one object-to-world transform.
///
/// Children are owned by value, so the graph is a tree. A node has no
/// material; hits report the material of the child that was hit.
#[derive(Debug, Clone, Default)]
pub struct Node {
    transform: Transform,
    children: Vec<Geometry>,
}

impl Node {
    pub fn new(transform: Transform, children: Vec<Geometry>) -> Self {
        Self {
            transform,
            children,
        }
    }

    /// Add a child (builder style).
    pub fn with_child(mut self, child: impl Into<Geometry>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn children(&self) -> &[Geometry] {
        &self.children
    }
}

impl Hittable for Node {
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let local_ray = self.transform.ray_to_object(ray);
        let local = nearest(self.children.iter().filter_map(|child| child.hit(&local_ray)))?;

        // Object-space t is not a world distance under scaling
        let point = self.transform.point_to_world(local.point);
        let t = ray.t_of(point);
        if t <= EPSILON {
            return None;
        }

        Some(Hit {
            t,
            ray: *ray,
            point,
            normal: self.transform.normal_to_world(local.normal),
            u: local.u,
            v: local.v,
            material: local.material,
        })
    }
}
