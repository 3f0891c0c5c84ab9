//! Triangle mesh geometry built from decoded mesh data.

use prism_core::{MeshData, MeshResult};
use prism_math::{Aabb, Ray};

use crate::hittable::{Hit, Hittable};
use crate::triangle::TriangleShape;
use crate::Material;

/// A triangle mesh sharing one material, pre-filtered by its bounding box.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<TriangleShape>,
    bounds: Aabb,
    material: Material,
}

impl Mesh {
    /// Build from already-validated triangles.
    pub fn new(triangles: Vec<TriangleShape>, material: Material) -> Self {
        let bounds = Aabb::enclosing(triangles.iter().flat_map(|tri| tri.vertices()));
        Self {
            triangles,
            bounds,
            material,
        }
    }

    /// Build from decoded mesh data.
    ///
    /// Any index error aborts the build. Zero-area faces cannot be hit and
    /// are dropped with a warning.
    pub fn from_data(data: &MeshData, material: Material) -> MeshResult<Self> {
        let resolved = data.triangles()?;
        let total = resolved.len();

        let triangles: Vec<TriangleShape> = resolved
            .iter()
            .enumerate()
            .filter_map(|(index, tri)| match TriangleShape::from_data(tri) {
                Ok(shape) => Some(shape),
                Err(err) => {
                    log::warn!("Dropping mesh face {}: {}", index + 1, err);
                    None
                }
            })
            .collect();

        log::debug!("Built mesh: {}/{} faces kept", triangles.len(), total);

        Ok(Self::new(triangles, material))
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl Hittable for Mesh {
    fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.bounds.hit(ray)?;

        self.triangles
            .iter()
            .filter_map(|tri| tri.intersect(ray))
            .min_by(|a, b| a.t.total_cmp(&b.t))
            .map(|surface| surface.with_material(ray, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Color, FaceVertex, Texture};
    use prism_math::{Point3, Vector3};

    const CUBE_FRONT_OBJ: &str = "\
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
f 1 2 3 4
f 8 7 6 5
";

    fn material() -> Material {
        Material::lambert(Texture::solid(Color::WHITE))
    }

    #[test]
    fn test_mesh_nearest_face() {
        let data = MeshData::read_obj(&mut CUBE_FRONT_OBJ.as_bytes()).unwrap();
        let mesh = Mesh::from_data(&data, material()).unwrap();
        assert_eq!(mesh.triangle_count(), 4);

        let ray = Ray::new(Point3::new(0.2, 0.3, 5.0), -Vector3::Z);
        let hit = mesh.hit(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert!((hit.normal.z() - 1.0).abs() < 1e-9);

        // From behind, the back quad is nearest
        let ray = Ray::new(Point3::new(0.2, 0.3, -5.0), Vector3::Z);
        let hit = mesh.hit(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_mesh_bounds_reject() {
        let data = MeshData::read_obj(&mut CUBE_FRONT_OBJ.as_bytes()).unwrap();
        let mesh = Mesh::from_data(&data, material()).unwrap();

        let ray = Ray::new(Point3::new(5.0, 0.0, 5.0), -Vector3::Z);
        assert!(mesh.hit(&ray).is_none());
    }

    #[test]
    fn test_degenerate_faces_dropped() {
        let _ = env_logger::builder().is_test(true).try_init();

        let data = MeshData {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            faces: vec![
                [FaceVertex::position(1), FaceVertex::position(2), FaceVertex::position(3)],
                [FaceVertex::position(1), FaceVertex::position(2), FaceVertex::position(4)],
            ],
            ..MeshData::default()
        };

        let mesh = Mesh::from_data(&data, material()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_bad_index_aborts_build() {
        let data = MeshData {
            positions: vec![Point3::ORIGIN],
            faces: vec![[FaceVertex::position(1), FaceVertex::position(2), FaceVertex::position(3)]],
            ..MeshData::default()
        };

        assert!(Mesh::from_data(&data, material()).is_err());
    }
}
