//! Decoded triangle-mesh data, the input side of mesh geometry.
//!
//! A `MeshData` is what an OBJ decoder produces: vertex positions, texture
//! coordinates, normals and triangular faces whose corners reference those
//! arrays with 1-based indices (texture and normal indices are optional per
//! corner). `triangles()` resolves and validates every index so the renderer
//! never sees a partially-populated mesh.
//!
//! OBJ text decoding itself is delegated to `tobj`.

use std::io::BufRead;
use std::path::Path;

use prism_math::{Aabb, DVec2, Normal3, Point3};
use thiserror::Error;

/// Errors that can occur while ingesting a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to load OBJ: {0}")]
    Load(#[from] tobj::LoadError),

    #[error("{kind} index {index} out of range (1..={len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Mesh has no faces")]
    Empty,
}

pub type MeshResult<T> = Result<T, MeshError>;

/// One corner of a face: 1-based indices into the mesh arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceVertex {
    /// A corner with only a position index.
    pub fn position(position: usize) -> Self {
        Self {
            position,
            tex_coord: None,
            normal: None,
        }
    }
}

pub type Face = [FaceVertex; 3];

/// A triangle with every index resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleData {
    pub positions: [Point3; 3],
    /// Present only if all three corners carry a texture coordinate
    pub tex_coords: Option<[DVec2; 3]>,
    /// Present only if all three corners carry a normal
    pub normals: Option<[Normal3; 3]>,
}

/// Decoded mesh arrays plus faces.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Point3>,
    pub tex_coords: Vec<DVec2>,
    pub normals: Vec<Normal3>,
    pub faces: Vec<Face>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an OBJ file (polygons are triangulated).
    pub fn load_obj(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        let data = Self::from_models(&models);

        log::info!(
            "Loaded mesh {}: {} vertices, {} faces",
            path.display(),
            data.vertex_count(),
            data.face_count()
        );

        Ok(data)
    }

    /// Decode OBJ text from a reader. Material libraries are ignored.
    pub fn read_obj<R: BufRead>(reader: &mut R) -> MeshResult<Self> {
        let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Ok(Self::from_models(&models))
    }

    /// Merge tobj models into one mesh, converting to 1-based indices.
    fn from_models(models: &[tobj::Model]) -> Self {
        let mut data = MeshData::new();

        for model in models {
            let mesh = &model.mesh;
            let position_base = data.positions.len();
            let tex_base = data.tex_coords.len();
            let normal_base = data.normals.len();

            data.positions.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
            );
            data.tex_coords.extend(
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| DVec2::new(t[0] as f64, t[1] as f64)),
            );
            data.normals.extend(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| Normal3::new(n[0] as f64, n[1] as f64, n[2] as f64)),
            );

            let corner = |i: usize| FaceVertex {
                position: position_base + mesh.indices[i] as usize + 1,
                tex_coord: mesh
                    .texcoord_indices
                    .get(i)
                    .map(|&t| tex_base + t as usize + 1),
                normal: mesh
                    .normal_indices
                    .get(i)
                    .map(|&n| normal_base + n as usize + 1),
            };

            for start in (0..mesh.indices.len() / 3).map(|f| f * 3) {
                data.faces
                    .push([corner(start), corner(start + 1), corner(start + 2)]);
            }
        }

        data
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Bounding box of all vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::enclosing(self.positions.iter().copied())
    }

    /// Resolve every face into concrete triangle data.
    ///
    /// Fails on the first index that is 0 or past the end of its array.
    pub fn triangles(&self) -> MeshResult<Vec<TriangleData>> {
        if self.faces.is_empty() {
            return Err(MeshError::Empty);
        }

        self.faces.iter().map(|face| self.resolve(face)).collect()
    }

    fn resolve(&self, face: &Face) -> MeshResult<TriangleData> {
        let mut positions = [Point3::ORIGIN; 3];
        let mut tex_coords = [DVec2::ZERO; 3];
        let mut normals = [Normal3::new(0.0, 0.0, 0.0); 3];
        let mut has_tex = true;
        let mut has_normals = true;

        for (i, corner) in face.iter().enumerate() {
            positions[i] = *lookup(&self.positions, corner.position, "position")?;

            match corner.tex_coord {
                Some(t) => tex_coords[i] = *lookup(&self.tex_coords, t, "texture coordinate")?,
                None => has_tex = false,
            }
            match corner.normal {
                Some(n) => normals[i] = *lookup(&self.normals, n, "normal")?,
                None => has_normals = false,
            }
        }

        Ok(TriangleData {
            positions,
            tex_coords: has_tex.then_some(tex_coords),
            normals: has_normals.then_some(normals),
        })
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    }
}

fn lookup<'a, T>(items: &'a [T], index: usize, kind: &'static str) -> MeshResult<&'a T> {
    index
        .checked_sub(1)
        .and_then(|i| items.get(i))
        .ok_or(MeshError::IndexOutOfRange {
            kind,
            index,
            len: items.len(),
        })
}
