use std::{fs, path::Path};

use cgmath::{num_traits::zero, vec2, Deg, Rad};
use log::info;

use crate::{
    error::{GeometryError, SceneError},
    intersections::{HitResult, Intersectable},
    parsed_scene,
    primitives::{Circle, OrientedRect},
    ray::Ray,
    types::{Float, Vec2},
};

pub const DEFAULT_BOUNDS: [Float; 2] = [1000.0, 600.0];

/// Anything a ray can be cast against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Circle(Circle),
    Rect(OrientedRect),
}

impl From<Circle> for Primitive {
    fn from(circle: Circle) -> Self {
        Primitive::Circle(circle)
    }
}

impl From<OrientedRect> for Primitive {
    fn from(rect: OrientedRect) -> Self {
        Primitive::Rect(rect)
    }
}

impl Intersectable for Primitive {
    fn intersection(&self, ray: &Ray) -> HitResult {
        match self {
            Primitive::Circle(circle) => circle.intersection(ray),
            Primitive::Rect(rect) => rect.intersection(ray),
        }
    }
}

/// Primitive set plus the window bounds it was laid out in. Read-only while
/// rays are cast against it, so it is shared across workers by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
    bounds: Vec2,
}

impl Scene {
    pub fn empty(bounds: Vec2) -> Self {
        Self { primitives: vec![], bounds }
    }

    pub fn with_primitives(bounds: Vec2, primitives: Vec<Primitive>) -> Self {
        Self { primitives, bounds }
    }

    pub fn new(scene: parsed_scene::Scene) -> Result<Self, SceneError> {
        let [width, height] = scene.bounds.unwrap_or(DEFAULT_BOUNDS);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SceneError::InvalidBounds(width, height));
        }

        let mut primitives = Vec::with_capacity(scene.circles.len() + scene.rectangles.len());
        for (index, circle) in scene.circles.iter().enumerate() {
            primitives.push(build_circle(index, circle)?.into());
        }
        for (index, rect) in scene.rectangles.iter().enumerate() {
            primitives.push(build_rect(index, rect)?.into());
        }

        Ok(Self { primitives, bounds: vec2(width, height) })
    }

    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Self::new(parsed_scene::Scene::from_json(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let scene = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded {} primitives from {}", scene.primitives.len(), path.display());
        Ok(scene)
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn center(&self) -> Vec2 {
        self.bounds / 2.0
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Converts back into the on-disk form, rotations in degrees.
    pub fn describe(&self) -> parsed_scene::Scene {
        let mut scene = parsed_scene::Scene {
            bounds: Some([self.bounds.x, self.bounds.y]),
            ..Default::default()
        };
        for primitive in &self.primitives {
            match primitive {
                Primitive::Circle(circle) => scene.circles.push(parsed_scene::Circle {
                    center: Some([circle.center().x, circle.center().y]),
                    radius: Some(circle.radius()),
                }),
                Primitive::Rect(rect) => scene.rectangles.push(parsed_scene::Rectangle {
                    position: Some([rect.position().x, rect.position().y]),
                    width: Some(rect.width()),
                    height: Some(rect.height()),
                    rotation: Some(Deg::from(rect.rotation()).0),
                }),
            }
        }
        scene
    }

    /// Nearest hit over every primitive; on a distance tie the earlier
    /// primitive wins. A miss is capped at `MAX_RAY_DISTANCE`.
    pub fn closest_hit(&self, ray: &Ray) -> HitResult {
        self.primitives
            .iter()
            .fold(HitResult::miss(ray), |closest, primitive| closest.nearest(primitive.intersection(ray)))
    }
}

fn build_circle(index: usize, circle: &parsed_scene::Circle) -> Result<Circle, SceneError> {
    let invalid = |source| SceneError::InvalidPrimitive { kind: "circle", index, source };
    let radius = circle.radius.ok_or(SceneError::MissingField { kind: "circle", index, field: "radius" })?;
    let center = circle.center.map(Vec2::from).unwrap_or(zero());
    Circle::new(center, radius).map_err(invalid)
}

fn build_rect(index: usize, rect: &parsed_scene::Rectangle) -> Result<OrientedRect, SceneError> {
    let invalid = |source: GeometryError| SceneError::InvalidPrimitive { kind: "rectangle", index, source };
    let missing = |field| SceneError::MissingField { kind: "rectangle", index, field };
    let width = rect.width.ok_or_else(|| missing("width"))?;
    let height = rect.height.ok_or_else(|| missing("height"))?;
    let position = rect.position.map(Vec2::from).unwrap_or(zero());
    let rotation: Rad<Float> = Deg(rect.rotation.unwrap_or(0.0)).into();
    OrientedRect::new(position, width, height, rotation).map_err(invalid)
}

#[cfg(test)]
mod test {
    use cgmath::{vec2, InnerSpace, Rad};

    use crate::{
        error::SceneError,
        primitives::{intersect_oriented_rect, Circle, OrientedRect},
        ray::Ray,
        raytrace::ray_angle,
        types::{Float, PI, MAX_RAY_DISTANCE},
    };

    use super::Scene;

    #[test]
    fn single_circle_scenario() {
        let mut scene = Scene::empty(vec2(1000.0, 600.0));
        scene.push(Circle::new(vec2(100.0, 100.0), 20.0).unwrap());

        let ray = Ray::new(vec2(0.0, 100.0), vec2(1.0, 0.0)).unwrap();
        let hit = scene.closest_hit(&ray);
        assert!(hit.hit);
        assert!((hit.distance - 80.0).abs() < 1e-9);
        assert!((hit.point - vec2(80.0, 100.0)).magnitude() < 1e-9);
    }

    #[test]
    fn empty_scene_caps_every_ray() {
        let scene = Scene::empty(vec2(1000.0, 600.0));
        let origin = vec2(12.0, -3.0);
        for i in 0..360 {
            let ray = Ray::from_angle(origin, 2.0 * PI * i as Float / 360.0);
            let hit = scene.closest_hit(&ray);
            assert!(!hit.hit);
            assert_eq!(hit.distance, Float::INFINITY);
            assert_eq!(hit.point, origin + ray.dir * MAX_RAY_DISTANCE);
        }
    }

    #[test]
    fn nearest_primitive_wins() {
        let mut scene = Scene::empty(vec2(1000.0, 600.0));
        scene.push(Circle::new(vec2(50.0, 0.0), 5.0).unwrap());
        scene.push(OrientedRect::new(vec2(20.0, -10.0), 2.0, 20.0, Rad(0.0)).unwrap());
        scene.push(Circle::new(vec2(-30.0, 0.0), 5.0).unwrap());

        let ray = Ray::new(vec2(0.0, 0.0), vec2(1.0, 0.0)).unwrap();
        let hit = scene.closest_hit(&ray);
        assert!(hit.hit);
        assert!((hit.distance - 20.0).abs() < 1e-12);
    }

    #[test]
    fn rect_hits_from_its_own_edges_use_corner_edges() {
        let bar = OrientedRect::new(vec2(100.0, 100.0), 200.0, 5.0, Rad(0.0)).unwrap();
        let mut scene = Scene::empty(vec2(1000.0, 600.0));
        scene.push(bar);

        let origins = [vec2(100.0, 102.0), vec2(100.0, 100.0), vec2(300.0, 105.0), vec2(200.0, 100.0)];
        for origin in origins {
            for i in 0..3600 {
                let ray = Ray::from_angle(origin, ray_angle(i, 3600));
                assert_eq!(scene.closest_hit(&ray), intersect_oriented_rect(&ray, &bar), "origin {:?}, ray {}", origin, i);
            }
        }
    }

    #[test]
    fn builds_from_description() {
        let scene = Scene::from_json(r#"{
            "bounds": [800, 400],
            "circles": [{ "center": [100, 100], "radius": 20 }],
            "rectangles": [{ "position": [300, 0], "width": 5, "height": 200, "rotation": 90 }]
        }"#).unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.bounds(), vec2(800.0, 400.0));
        assert_eq!(Scene::new(scene.describe()).unwrap().len(), 2);
    }

    #[test]
    fn description_round_trips_rotation() {
        let mut scene = Scene::empty(vec2(100.0, 100.0));
        scene.push(OrientedRect::new(vec2(1.0, 2.0), 3.0, 4.0, Rad(PI / 6.0)).unwrap());
        let rebuilt = Scene::new(scene.describe()).unwrap();
        let ray = Ray::from_angle(vec2(-10.0, 0.0), 0.3);
        let (a, b) = (scene.closest_hit(&ray), rebuilt.closest_hit(&ray));
        assert_eq!(a.hit, b.hit);
        assert!((a.point - b.point).magnitude() < 1e-9);
    }

    #[test]
    fn rejects_bad_descriptions() {
        assert!(matches!(
            Scene::from_json(r#"{ "circles": [{ "center": [0, 0], "radius": 0 }] }"#),
            Err(SceneError::InvalidPrimitive { kind: "circle", index: 0, .. })
        ));
        assert!(matches!(
            Scene::from_json(r#"{ "rectangles": [{ "width": 4 }] }"#),
            Err(SceneError::MissingField { kind: "rectangle", field: "height", .. })
        ));
        assert!(matches!(Scene::from_json(r#"{ "bounds": [0, 10] }"#), Err(SceneError::InvalidBounds(..))));
        assert!(matches!(Scene::from_json("not json"), Err(SceneError::Parse(_))));
    }
}
