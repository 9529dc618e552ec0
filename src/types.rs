use std::f64::consts::PI as WIDE_PI;

use cgmath::{Basis2, Vector2};

pub type Float = f64;
pub type Vec2 = Vector2<Float>;
pub type Rot2 = Basis2<Float>;

pub const PI: Float = WIDE_PI as Float;
/// Below this magnitude the 2-D cross product of a ray and a segment is
/// treated as zero (parallel lines).
pub const EPSILON: Float = Float::EPSILON * 100.0;
/// Distance at which a ray that hits nothing is terminated.
pub const MAX_RAY_DISTANCE: Float = 2000.0;

/// Scalar 2-D cross product `a.x * b.y - a.y * b.x`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> Float {
    a.x * b.y - a.y * b.x
}

pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
