//! Triangle primitive for ray tracing.
//!
//! Intersection solves for the barycentric coordinates and `t` at once with
//! Cramer's rule on the system `a + beta(b - a) + gamma(c - a) = o + t*d`.

use prism_core::{SceneError, SceneResult, TriangleData};
use prism_math::{solve_cramer, DMat3, DVec2, Normal3, Point3, Ray, EPSILON};

use crate::hittable::{Hit, Hittable, SurfaceHit};
use crate::Material;

/// Barycentric solution of a ray/triangle intersection.
#[derive(Debug, Clone, Copy)]
struct Barycentric {
    alpha: f64,
    beta: f64,
    gamma: f64,
    t: f64,
}

/// Triangle geometry without a material (shared by mesh faces).
#[derive(Debug, Clone)]
pub struct TriangleShape {
    a: Point3,
    b: Point3,
    c: Point3,
    /// Per-vertex normals for smooth shading
    normals: Option<[Normal3; 3]>,
    /// Per-vertex texture coordinates
    tex_coords: Option<[DVec2; 3]>,
    /// Unit face normal, counter-clockwise winding
    face_normal: Normal3,
}

impl TriangleShape {
    /// Create a flat triangle. Collinear vertices are rejected.
    pub fn new(a: Point3, b: Point3, c: Point3) -> SceneResult<Self> {
        let face_normal = (b - a)
            .cross(c - a)
            .try_normalized()
            .ok_or(SceneError::DegenerateTriangle)?
            .as_normal();

        Ok(Self {
            a,
            b,
            c,
            normals: None,
            tex_coords: None,
            face_normal,
        })
    }

    /// Set per-vertex normals (smooth shading).
    pub fn with_normals(mut self, normals: [Normal3; 3]) -> Self {
        self.normals = Some(normals.map(Normal3::normalized));
        self
    }

    /// Set per-vertex texture coordinates.
    pub fn with_tex_coords(mut self, tex_coords: [DVec2; 3]) -> Self {
        self.tex_coords = Some(tex_coords);
        self
    }

    /// Build from resolved mesh data.
    pub fn from_data(data: &TriangleData) -> SceneResult<Self> {
        let [a, b, c] = data.positions;
        let mut shape = Self::new(a, b, c)?;
        if let Some(normals) = data.normals {
            shape = shape.with_normals(normals);
        }
        if let Some(tex_coords) = data.tex_coords {
            shape = shape.with_tex_coords(tex_coords);
        }
        Ok(shape)
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    fn solve(&self, ray: &Ray) -> Option<Barycentric> {
        let (a, b, c) = (self.a.to_dvec3(), self.b.to_dvec3(), self.c.to_dvec3());
        let m = DMat3::from_cols(a - b, a - c, ray.direction().to_dvec3());
        let x = solve_cramer(&m, a - ray.origin().to_dvec3())?;

        let (beta, gamma, t) = (x.x, x.y, x.z);
        if !(0.0..=1.0).contains(&beta) || !(0.0..=1.0).contains(&gamma) {
            return None;
        }
        if beta + gamma > 1.0 || t <= EPSILON {
            return None;
        }

        Some(Barycentric {
            alpha: 1.0 - beta - gamma,
            beta,
            gamma,
            t,
        })
    }

    pub(crate) fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let Barycentric {
            alpha,
            beta,
            gamma,
            t,
        } = self.solve(ray)?;

        let normal = match self.normals {
            Some([na, nb, nc]) => (na * alpha + nb * beta + nc * gamma).normalized(),
            None => self.face_normal,
        };

        let (u, v) = match self.tex_coords {
            Some([ta, tb, tc]) => {
                let uv = ta * alpha + tb * beta + tc * gamma;
                (uv.x, uv.y)
            }
            None => (beta, gamma),
        };

        Some(SurfaceHit {
            t,
            point: ray.at(t),
            normal,
            u,
            v,
        })
    }
}

/// A single triangle with its own material.
#[derive(Debug, Clone)]
pub struct Triangle {
    shape: TriangleShape,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices (flat shaded).
    pub fn new(a: Point3, b: Point3, c: Point3, material: Material) -> SceneResult<Self> {
        Ok(Self::from_shape(TriangleShape::new(a, b, c)?, material))
    }

    /// Wrap prepared geometry (vertex normals, texture coordinates).
    pub fn from_shape(shape: TriangleShape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn shape(&self) -> &TriangleShape {
        &self.shape
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.shape
            .intersect(ray)
            .map(|surface| surface.with_material(ray, &self.material))
    }
}
