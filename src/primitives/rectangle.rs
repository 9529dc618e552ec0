use cgmath::{vec2, Rad, Rotation as _, Rotation2 as _};

use crate::{
    error::GeometryError,
    intersections::{HitResult, Intersectable},
    primitives::segment::segment_coef,
    ray::Ray,
    types::{is_finite, Float, Rot2, Vec2, EPSILON},
};

/// Rectangle of `width` x `height` whose local origin corner sits at
/// `position`, rotated by `rotation` about that corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    position: Vec2,
    width: Float,
    height: Float,
    rotation: Rad<Float>,
}

impl OrientedRect {
    pub fn new(position: Vec2, width: Float, height: Float, rotation: Rad<Float>) -> Result<Self, GeometryError> {
        if !is_finite(position) {
            return Err(GeometryError::NonFinite("rectangle position"));
        }
        if !rotation.0.is_finite() {
            return Err(GeometryError::NonFinite("rectangle rotation"));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GeometryError::InvalidExtent { width, height });
        }
        Ok(Self { position, width, height, rotation })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn width(&self) -> Float {
        self.width
    }

    pub fn height(&self) -> Float {
        self.height
    }

    pub fn rotation(&self) -> Rad<Float> {
        self.rotation
    }

    /// Moves the rectangle without changing its size or rotation.
    pub fn translated(self, offset: Vec2) -> Self {
        Self { position: self.position + offset, ..self }
    }

    /// World-space corners in winding order, starting at `position`.
    pub fn corners(&self) -> [Vec2; 4] {
        let rot = Rot2::from_angle(self.rotation);
        [
            vec2(0.0, 0.0),
            vec2(self.width, 0.0),
            vec2(self.width, self.height),
            vec2(0.0, self.height),
        ]
        .map(|corner| rot.rotate_vector(corner) + self.position)
    }
}

impl Intersectable for OrientedRect {
    fn intersection(&self, ray: &Ray) -> HitResult {
        intersect_oriented_rect(ray, self)
    }
}

/// Tests the ray against each of the four edges and keeps the nearest hit.
pub fn intersect_oriented_rect(ray: &Ray, rect: &OrientedRect) -> HitResult {
    let corners = rect.corners();
    let nearest = (0..4)
        .filter_map(|i| segment_coef(ray, corners[i], corners[(i + 1) % 4]))
        .fold(None, |nearest: Option<Float>, t| match nearest {
            Some(min_t) if min_t <= t => Some(min_t),
            _ => Some(t),
        });
    HitResult::from_coef(ray, nearest)
}

/// Slab test against the box spanned by `min` and `max`. Agrees with
/// [`intersect_oriented_rect`] on unrotated rectangles except for rays that
/// start on an edge and run within `EPSILON` of parallel to it.
pub fn intersect_axis_aligned_rect(ray: &Ray, min: Vec2, max: Vec2) -> HitResult {
    let half = (max - min) / 2.0;
    let local_origin = ray.origin - (min + half);
    HitResult::from_coef(ray, slab_coef(half, local_origin, ray.dir))
}

fn slab_coef(half: Vec2, origin: Vec2, dir: Vec2) -> Option<Float> {
    let mut t: Option<(Float, Float)> = None;
    for i in 0..2 {
        // same parallel cut-off as the edge test
        if dir[i].abs() < EPSILON {
            if half[i] < origin[i].abs() {
                return None;
            }
            continue;
        }
        let (t1, t2) = slab_planes_intersect(half, origin, dir, i);
        t = Some(match t {
            Some((max_t1, min_t2)) => (t1.max(max_t1), t2.min(min_t2)),
            None => (t1, t2),
        });
    }

    let (near, far) = t?;
    if far < near {
        return None;
    }
    if 0.0 <= near {
        return Some(near);
    }
    if 0.0 <= far {
        return Some(far);
    }
    None
}

fn slab_planes_intersect(half: Vec2, origin: Vec2, dir: Vec2, index: usize) -> (Float, Float) {
    let t1 = (half[index] - origin[index]) / dir[index];
    let t2 = (-half[index] - origin[index]) / dir[index];
    if t1 < t2 { (t1, t2) } else { (t2, t1) }
}
