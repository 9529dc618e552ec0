use cgmath::num_traits::zero;

use crate::{ray::Ray, types::{Float, Vec2, MAX_RAY_DISTANCE}};

/// Outcome of casting one ray. A miss carries an infinite `distance` and a
/// `point` capped at [`MAX_RAY_DISTANCE`] so it can still be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub hit: bool,
    pub distance: Float,
    pub point: Vec2,
}

pub trait Intersectable {
    /// Nearest forward intersection of `ray` with `self`.
    fn intersection(&self, ray: &Ray) -> HitResult;
}

impl HitResult {
    pub fn miss(ray: &Ray) -> Self {
        Self { hit: false, distance: Float::INFINITY, point: ray.position_at(MAX_RAY_DISTANCE) }
    }

    pub fn at(ray: &Ray, t: Float) -> Self {
        Self { hit: true, distance: t, point: ray.position_at(t) }
    }

    pub fn from_coef(ray: &Ray, t: Option<Float>) -> Self {
        match t {
            Some(t) => Self::at(ray, t),
            None => Self::miss(ray),
        }
    }

    /// Keeps `self` unless `other` is a hit strictly closer than it.
    pub fn nearest(self, other: HitResult) -> Self {
        if other.hit && other.distance < self.distance { other } else { self }
    }
}

impl Default for HitResult {
    fn default() -> Self {
        Self { hit: false, distance: Float::INFINITY, point: zero() }
    }
}

#[cfg(test)]
mod test {
    use cgmath::vec2;

    use crate::{ray::Ray, types::MAX_RAY_DISTANCE};

    use super::HitResult;

    #[test]
    fn miss_is_capped() {
        let ray = Ray::new(vec2(1.0, 1.0), vec2(0.0, 1.0)).unwrap();
        let miss = HitResult::miss(&ray);
        assert!(!miss.hit);
        assert_eq!(miss.distance, f64::INFINITY);
        assert_eq!(miss.point, vec2(1.0, 1.0 + MAX_RAY_DISTANCE));
    }

    #[test]
    fn nearest_prefers_first_on_tie() {
        let ray = Ray::new(vec2(0.0, 0.0), vec2(1.0, 0.0)).unwrap();
        let first = HitResult::at(&ray, 3.0);
        let mut second = HitResult::at(&ray, 3.0);
        second.point = vec2(-1.0, -1.0);
        assert_eq!(first.nearest(second), first);
        assert_eq!(first.nearest(HitResult::at(&ray, 2.0)).distance, 2.0);
        assert_eq!(HitResult::miss(&ray).nearest(first), first);
        assert_eq!(first.nearest(HitResult::miss(&ray)), first);
    }
}
