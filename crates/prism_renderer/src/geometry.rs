//! Closed set of scene geometry.

use prism_math::Ray;

use crate::hittable::{Hit, Hittable};
use crate::{AxisAlignedBox, Mesh, Node, Plane, Sphere, Triangle};

/// Any object that can be placed in a world or a node.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
    AxisAlignedBox(AxisAlignedBox),
    Triangle(Triangle),
    Mesh(Mesh),
    Node(Node),
}

impl Hittable for Geometry {
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        match self {
            Geometry::Sphere(s) => s.hit(ray),
            Geometry::Plane(p) => p.hit(ray),
            Geometry::AxisAlignedBox(b) => b.hit(ray),
            Geometry::Triangle(t) => t.hit(ray),
            Geometry::Mesh(m) => m.hit(ray),
            Geometry::Node(n) => n.hit(ray),
        }
    }
}

macro_rules! impl_from_geometry {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(g: $variant) -> Self {
                    Geometry::$variant(g)
                }
            }
        )*
    };
}

impl_from_geometry!(Sphere, Plane, AxisAlignedBox, Triangle, Mesh, Node);
