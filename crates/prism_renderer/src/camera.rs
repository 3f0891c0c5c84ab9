//! Cameras for primary ray generation.

use std::f64::consts::PI;

use prism_core::{SamplingPattern, SceneError, SceneResult};
use prism_math::{Point3, Ray, Vector3};

/// How the image plane maps to rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Parallel rays; `scale` is the image height in world units.
    Orthographic { scale: f64 },
    /// Rays from the eye; `angle` is the vertical field of view in radians.
    Perspective { angle: f64 },
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Point3,
    gaze: Vector3,
    up: Vector3,
    // Orthonormal basis: u right, v up, w backwards
    u: Vector3,
    v: Vector3,
    w: Vector3,
    projection: Projection,
    pattern: SamplingPattern,
}

impl Camera {
    /// Perspective camera at `eye` looking along `gaze`.
    pub fn perspective(eye: Point3, gaze: Vector3, up: Vector3, angle: f64) -> SceneResult<Self> {
        if !(angle > 0.0 && angle < PI) {
            return Err(SceneError::InvalidFieldOfView(angle));
        }
        Self::new(eye, gaze, up, Projection::Perspective { angle })
    }

    /// Orthographic camera at `eye` looking along `gaze`.
    pub fn orthographic(eye: Point3, gaze: Vector3, up: Vector3, scale: f64) -> SceneResult<Self> {
        if scale.is_nan() || scale <= 0.0 {
            return Err(SceneError::InvalidScale(scale));
        }
        Self::new(eye, gaze, up, Projection::Orthographic { scale })
    }

    fn new(eye: Point3, gaze: Vector3, up: Vector3, projection: Projection) -> SceneResult<Self> {
        let w = -gaze
            .try_normalized()
            .ok_or(SceneError::ZeroVector("camera gaze"))?;
        let u = up
            .cross(w)
            .try_normalized()
            .ok_or(SceneError::ParallelUpVector)?;
        let v = w.cross(u);

        Ok(Self {
            eye,
            gaze,
            up,
            u,
            v,
            w,
            projection,
            pattern: SamplingPattern::single(),
        })
    }

    /// Set the per-pixel sampling pattern.
    pub fn with_pattern(mut self, pattern: SamplingPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn eye(&self) -> Point3 {
        self.eye
    }

    pub fn gaze(&self) -> Vector3 {
        self.gaze
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// The camera basis `(u, v, w)`.
    pub fn basis(&self) -> (Vector3, Vector3, Vector3) {
        (self.u, self.v, self.w)
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn pattern(&self) -> &SamplingPattern {
        &self.pattern
    }

    /// One ray per pattern offset for pixel `(x, y)` of a `width`×`height`
    /// image. `y` grows upwards.
    pub fn rays_for(&self, width: u32, height: u32, x: u32, y: u32) -> Vec<Ray> {
        let (w, h) = (width as f64, height as f64);
        // Centering is undefined for a single row or column; keep it finite
        let (span_x, span_y) = ((w - 1.0).max(1.0), (h - 1.0).max(1.0));

        self.pattern
            .points()
            .iter()
            .map(|p| {
                let px = (x as f64 + p.x) - (w - 1.0) / 2.0;
                let py = (y as f64 + p.y) - (h - 1.0) / 2.0;

                match self.projection {
                    Projection::Orthographic { scale } => {
                        let aspect = w / h;
                        let origin = self.eye
                            + self.u * (aspect * scale * px / span_x)
                            + self.v * (scale * py / span_y);
                        Ray::new(origin, -self.w)
                    }
                    Projection::Perspective { angle } => {
                        let focal = (h / 2.0) / (angle / 2.0).tan();
                        let direction = -self.w * focal + self.u * px + self.v * py;
                        Ray::new(self.eye, direction)
                    }
                }
            })
            .collect()
    }
}
