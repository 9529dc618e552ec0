use cgmath::{vec2, InnerSpace};

use crate::{error::GeometryError, types::{is_finite, Float, Vec2}};

/// Half-line `origin + t * dir` for `t >= 0`. `dir` is always unit length
/// when built through [`Ray::new`] or [`Ray::from_angle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub dir: Vec2,
}

impl Ray {
    pub fn new(origin: Vec2, dir: Vec2) -> Result<Self, GeometryError> {
        if !is_finite(origin) {
            return Err(GeometryError::NonFinite("ray origin"));
        }
        let length = dir.magnitude();
        if !length.is_finite() || length == 0.0 {
            return Err(GeometryError::DegenerateDirection);
        }
        Ok(Self { origin, dir: dir / length })
    }

    /// Unit ray leaving `origin` at `angle` radians from the +x axis.
    pub fn from_angle(origin: Vec2, angle: Float) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { origin, dir: vec2(cos, sin) }
    }

    pub fn position_at(&self, t: Float) -> Vec2 {
        self.origin + self.dir * t
    }
}
