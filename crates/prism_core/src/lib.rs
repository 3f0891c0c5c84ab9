//! Prism Core - scene data shared by the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Color**: clamped RGB with the arithmetic used by shading
//! - **Textures**: solid colors and decoded images sampled at `(u, v)`
//! - **Mesh ingestion**: decoded OBJ data with validated 1-based faces
//! - **Sampling patterns**: sub-pixel offsets for supersampling
//! - **Scene errors**: the `SceneError` returned by scene constructors
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{ImageTexture, MeshData};
//!
//! let mesh = MeshData::load_obj("teapot.obj")?;
//! let triangles = mesh.triangles()?;
//! let texture = ImageTexture::load("checker.png")?;
//! ```

pub mod color;
pub mod error;
pub mod mesh;
pub mod sampling;
pub mod texture;

// Re-export commonly used types
pub use color::Color;
pub use error::{SceneError, SceneResult};
pub use mesh::{Face, FaceVertex, MeshData, MeshError, MeshResult, TriangleData};
pub use sampling::SamplingPattern;
pub use texture::{ImageTexture, Texture, TextureError, TextureResult};
