use crate::{intersections::HitResult, ray::Ray, types::{cross, Float, Vec2, EPSILON}};

pub fn intersect_segment(ray: &Ray, p1: Vec2, p2: Vec2) -> HitResult {
    HitResult::from_coef(ray, segment_coef(ray, p1, p2))
}

/// Solves `origin + t * dir = p1 + u * (p2 - p1)` and returns `t` when the
/// crossing is ahead of the ray (`t >= 0`) and on the segment (`0 <= u <= 1`).
pub(crate) fn segment_coef(ray: &Ray, p1: Vec2, p2: Vec2) -> Option<Float> {
    let segment_dir = p2 - p1;
    let oc = p1 - ray.origin;

    let denom = cross(ray.dir, segment_dir);
    if denom.abs() < EPSILON {
        return None;
    }

    let t = cross(oc, segment_dir) / denom;
    let u = cross(oc, ray.dir) / denom;
    if t >= 0.0 && (0.0..=1.0).contains(&u) { Some(t) } else { None }
}
