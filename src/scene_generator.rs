//! Random scene layout. The generator owns its RNG so a seed fully
//! determines the scene it builds.

use cgmath::{vec2, Deg, Rad};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::GeometryError,
    primitives::{Circle, OrientedRect},
    scene::Scene,
    types::{Float, Vec2},
};

const MIN_RADIUS: Float = 20.0;
const RADIUS_SPAN: Float = 100.0;
const CIRCLE_MARGIN: Float = 10.0;
const WALL_THICKNESS: Float = 5.0;
const MIN_WALL_LENGTH: Float = 200.0;
const WALL_MARGIN: Float = 100.0;

pub struct SceneGenerator {
    rng: StdRng,
    bounds: Vec2,
    circles: usize,
    walls: usize,
}

impl SceneGenerator {
    pub fn new(rng: StdRng, bounds: Vec2, circles: usize, walls: usize) -> Self {
        Self { rng, bounds, circles, walls }
    }

    pub fn from_seed(seed: u64, bounds: Vec2, circles: usize, walls: usize) -> Self {
        Self::new(StdRng::seed_from_u64(seed), bounds, circles, walls)
    }

    /// Builds a fresh scene, circles first then walls. Each call draws new
    /// values from the generator's RNG.
    pub fn generate(&mut self) -> Result<Scene, GeometryError> {
        let mut scene = Scene::empty(self.bounds);
        for _ in 0..self.circles {
            scene.push(self.circle()?);
        }
        for _ in 0..self.walls {
            scene.push(self.wall()?);
        }
        info!("Generated scene with {} circles and {} walls", self.circles, self.walls);
        Ok(scene)
    }

    fn circle(&mut self) -> Result<Circle, GeometryError> {
        // shrink the radius range on windows too small for the default one
        let max_radius = ((self.bounds.x.min(self.bounds.y) - CIRCLE_MARGIN) / 2.0).max(1.0);
        let radius = (MIN_RADIUS + self.rng.gen_range(0.0..RADIUS_SPAN)).min(max_radius);
        let free = vec2(
            (self.bounds.x - CIRCLE_MARGIN - 2.0 * radius).max(0.0),
            (self.bounds.y - CIRCLE_MARGIN - 2.0 * radius).max(0.0),
        );
        let corner = vec2(self.sample(free.x), self.sample(free.y));
        Circle::new(corner + vec2(radius, radius), radius)
    }

    fn wall(&mut self) -> Result<OrientedRect, GeometryError> {
        let (width, height) = if self.rng.gen_bool(0.5) {
            (self.wall_length(self.bounds.x), WALL_THICKNESS)
        } else {
            (WALL_THICKNESS, self.wall_length(self.bounds.y))
        };
        let position = vec2(self.sample(self.bounds.x), self.sample(self.bounds.y));
        let rotation: Rad<Float> = Deg(self.rng.gen_range(0..360u32) as Float).into();

        let wall = OrientedRect::new(position, width, height, rotation)?;
        let shifted = wall.translated(fit_offset(&wall.corners(), self.bounds));
        debug!("Wall {}x{} at {:?} rotated {:?}", width, height, shifted.position(), rotation);
        Ok(shifted)
    }

    /// `min(200 + rand(extent - 100), extent - 100)` along the wall's own axis.
    fn wall_length(&mut self, extent: Float) -> Float {
        let longest = (extent - WALL_MARGIN).max(WALL_THICKNESS);
        (MIN_WALL_LENGTH + self.sample(extent - WALL_MARGIN)).min(longest)
    }

    fn sample(&mut self, upper: Float) -> Float {
        if upper > 0.0 { self.rng.gen_range(0.0..upper) } else { 0.0 }
    }
}

/// Smallest shift that brings every corner inside `[0, bounds]`, per axis.
/// A wall rotated so it spans more than the window on an axis is aligned to
/// the low edge of that axis.
fn fit_offset(corners: &[Vec2; 4], bounds: Vec2) -> Vec2 {
    let axis = |values: [Float; 4], limit: Float| {
        let min = values.iter().copied().fold(Float::INFINITY, Float::min);
        let max = values.iter().copied().fold(Float::NEG_INFINITY, Float::max);
        if min < 0.0 {
            -min
        } else if max > limit {
            limit - max
        } else {
            0.0
        }
    };
    vec2(
        axis(corners.map(|c| c.x), bounds.x),
        axis(corners.map(|c| c.y), bounds.y),
    )
}
