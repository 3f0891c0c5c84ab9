//! Light sources and shadow-ray visibility.

use std::f64::consts::PI;

use prism_core::{Color, SceneError, SceneResult};
use prism_math::{Point3, Ray, Vector3, EPSILON};

use crate::hittable::Hittable;
use crate::World;

/// Where light comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    /// Emits in all directions from a position.
    Point { position: Point3 },
    /// Parallel light travelling along `direction` (unit length).
    Directional { direction: Vector3 },
    /// A cone of light from `position` around `direction` (unit length).
    Spot {
        position: Point3,
        direction: Vector3,
        half_angle: f64,
    },
}

/// A light source with a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    color: Color,
    casts_shadows: bool,
    source: LightSource,
}

impl Light {
    /// A point light. Casts shadows unless disabled with `with_shadows`.
    pub fn point(color: Color, position: Point3) -> Self {
        Self {
            color,
            casts_shadows: true,
            source: LightSource::Point { position },
        }
    }

    /// A directional light travelling along `direction`.
    pub fn directional(color: Color, direction: Vector3) -> SceneResult<Self> {
        let direction = direction
            .try_normalized()
            .ok_or(SceneError::ZeroVector("light direction"))?;

        Ok(Self {
            color,
            casts_shadows: true,
            source: LightSource::Directional { direction },
        })
    }

    /// A spot light. `half_angle` is in radians and must lie in (0, pi).
    pub fn spot(
        color: Color,
        position: Point3,
        direction: Vector3,
        half_angle: f64,
    ) -> SceneResult<Self> {
        let direction = direction
            .try_normalized()
            .ok_or(SceneError::ZeroVector("light direction"))?;
        if !(half_angle > 0.0 && half_angle < PI) {
            return Err(SceneError::InvalidSpotAngle(half_angle));
        }

        Ok(Self {
            color,
            casts_shadows: true,
            source: LightSource::Spot {
                position,
                direction,
                half_angle,
            },
        })
    }

    /// Enable or disable shadow testing for this light.
    pub fn with_shadows(mut self, casts_shadows: bool) -> Self {
        self.casts_shadows = casts_shadows;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn casts_shadows(&self) -> bool {
        self.casts_shadows
    }

    pub fn source(&self) -> &LightSource {
        &self.source
    }

    /// Unit direction from `point` towards the light.
    ///
    /// Zero when `point` coincides with a positional light.
    pub fn direction_from(&self, point: Point3) -> Vector3 {
        match self.source {
            LightSource::Point { position } | LightSource::Spot { position, .. } => {
                (position - point).try_normalized().unwrap_or(Vector3::ZERO)
            }
            LightSource::Directional { direction } => -direction,
        }
    }

    /// Whether `point` receives light, tested with a shadow ray into `world`.
    pub fn illuminates(&self, point: Point3, world: &World) -> bool {
        match self.source {
            LightSource::Point { position } => unoccluded(point, position, world),
            LightSource::Directional { direction } => {
                world.hit(&Ray::new(point, -direction)).is_none()
            }
            LightSource::Spot {
                position,
                direction,
                half_angle,
            } => {
                let Some(to_point) = (point - position).try_normalized() else {
                    return false;
                };
                let angle = direction.dot(to_point).clamp(-1.0, 1.0).acos();
                angle < half_angle && unoccluded(point, position, world)
            }
        }
    }
}

/// True if nothing in `world` sits between `point` and `light`.
fn unoccluded(point: Point3, light: Point3, world: &World) -> bool {
    let Some(direction) = (light - point).try_normalized() else {
        return true;
    };
    let distance = point.distance(light);

    match world.hit(&Ray::new(point, direction)) {
        None => true,
        Some(hit) => hit.t + EPSILON > distance,
    }
}
