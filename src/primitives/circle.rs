use cgmath::InnerSpace as _;

use crate::{error::GeometryError, intersections::{HitResult, Intersectable}, ray::Ray, types::{is_finite, Float, Vec2}};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Vec2,
    radius: Float,
}

impl Circle {
    pub fn new(center: Vec2, radius: Float) -> Result<Self, GeometryError> {
        if !is_finite(center) {
            return Err(GeometryError::NonFinite("circle center"));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl Intersectable for Circle {
    fn intersection(&self, ray: &Ray) -> HitResult {
        intersect_circle(ray, self)
    }
}

pub fn intersect_circle(ray: &Ray, circle: &Circle) -> HitResult {
    HitResult::from_coef(ray, circle_coef(circle.center, circle.radius, ray))
}

fn circle_coef(center: Vec2, radius: Float, ray: &Ray) -> Option<Float> {
    let oc = ray.origin - center;

    // t^2 + 2 * b * t + c = 0, dir is unit so the quadratic term is 1
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let d = b * b - c;
    if d < 0.0 {
        return None;
    }
    let ds = d.sqrt();
    let t1 = -b - ds;
    let t2 = -b + ds;

    // t2 alone is forward only when the origin is inside the circle
    if t1 > 0.0 {
        return Some(t1);
    }
    if t2 > 0.0 {
        return Some(t2);
    }
    None
}

#[cfg(test)]
mod test {
    use cgmath::{vec2, InnerSpace};

    use crate::{error::GeometryError, intersections::Intersectable, ray::Ray};

    use super::Circle;

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(vec2(x, y), r).unwrap()
    }

    #[test]
    fn hits_near_surface() {
        let ray = Ray::new(vec2(0.0, 100.0), vec2(1.0, 0.0)).unwrap();
        let hit = circle(100.0, 100.0, 20.0).intersection(&ray);
        assert!(hit.hit);
        assert!((hit.distance - 80.0).abs() < 1e-9);
        assert!((hit.point - vec2(80.0, 100.0)).magnitude() < 1e-9);
    }

    #[test]
    fn misses_when_off_axis() {
        let ray = Ray::new(vec2(0.0, 0.0), vec2(1.0, 0.0)).unwrap();
        assert!(!circle(10.0, 5.0, 2.0).intersection(&ray).hit);
    }

    #[test]
    fn misses_when_behind() {
        let ray = Ray::new(vec2(0.0, 0.0), vec2(-1.0, 0.0)).unwrap();
        assert!(!circle(10.0, 0.0, 2.0).intersection(&ray).hit);
    }

    #[test]
    fn inside_takes_far_root() {
        let ray = Ray::new(vec2(1.0, 0.0), vec2(1.0, 0.0)).unwrap();
        let hit = circle(0.0, 0.0, 5.0).intersection(&ray);
        assert!(hit.hit);
        assert!((hit.distance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn origin_on_boundary() {
        let r = 7.0;
        let away = Ray::new(vec2(r, 0.0), vec2(1.0, 0.0)).unwrap();
        assert!(!circle(0.0, 0.0, r).intersection(&away).hit);

        let toward = Ray::new(vec2(r, 0.0), vec2(-1.0, 0.0)).unwrap();
        let hit = circle(0.0, 0.0, r).intersection(&toward);
        assert!(hit.hit);
        assert!((hit.distance - 2.0 * r).abs() < 1e-9);
        assert!((hit.point - vec2(-r, 0.0)).magnitude() < 1e-9);
    }

    #[test]
    fn tangent_counts_as_hit() {
        let ray = Ray::new(vec2(-10.0, 3.0), vec2(1.0, 0.0)).unwrap();
        let hit = circle(0.0, 0.0, 3.0).intersection(&ray);
        assert!(hit.hit);
        assert!((hit.distance - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_degenerate_radius() {
        assert_eq!(Circle::new(vec2(0.0, 0.0), 0.0), Err(GeometryError::InvalidRadius(0.0)));
        assert_eq!(Circle::new(vec2(0.0, 0.0), -1.0), Err(GeometryError::InvalidRadius(-1.0)));
        assert!(Circle::new(vec2(0.0, 0.0), f64::NAN).is_err());
        assert!(Circle::new(vec2(f64::NAN, 0.0), 1.0).is_err());
    }
}
