//! Scene construction errors.

use thiserror::Error;

/// Invalid input detected while assembling a scene.
///
/// Raised by constructors so that degenerate geometry, lights or cameras
/// never reach the renderer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("{0} must not be a zero-length vector")]
    ZeroVector(&'static str),

    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("box corners must span a non-zero volume")]
    DegenerateBox,

    #[error("triangle vertices are collinear")]
    DegenerateTriangle,

    #[error("camera up vector is parallel to the gaze direction")]
    ParallelUpVector,

    #[error("sampling pattern must contain at least one offset")]
    EmptySamplingPattern,

    #[error("camera field of view must be in (0, pi), got {0}")]
    InvalidFieldOfView(f64),

    #[error("orthographic scale must be positive, got {0}")]
    InvalidScale(f64),

    #[error("spot light half angle must be in (0, pi), got {0}")]
    InvalidSpotAngle(f64),

    #[error("refractive index must be positive, got {0}")]
    InvalidRefractiveIndex(f64),
}

pub type SceneResult<T> = Result<T, SceneError>;
