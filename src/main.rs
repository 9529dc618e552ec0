use std::{fs, time::Instant};

use anyhow::{bail, Context, Result};
use cgmath::vec2;
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use raycast_2d::{
    cast_into,
    raytrace::{clamp_workers, max_workers},
    scene_generator::SceneGenerator,
    types::Float,
    HitResult, Scene,
};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

#[derive(Serialize)]
struct RayRecord {
    index: usize,
    hit: bool,
    distance: Option<Float>,
    point: [Float; 2],
}

impl RayRecord {
    fn new(index: usize, result: &HitResult) -> Self {
        Self {
            index,
            hit: result.hit,
            distance: result.hit.then_some(result.distance),
            point: [result.point.x, result.point.y],
        }
    }
}

fn load_scene(args: &Args) -> Result<Scene> {
    if let Some(path) = &args.scene {
        return Scene::load(path).with_context(|| format!("cannot load scene from {}", path.display()));
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating {}x{} scene with seed {}", args.width, args.height, seed);
    let mut generator = SceneGenerator::from_seed(seed, vec2(args.width, args.height), args.circles, args.walls);
    Ok(generator.generate()?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Available CPU threads: {}", max_workers());
    let scene = load_scene(&args)?;
    if let Some(path) = &args.save_scene {
        fs::write(path, scene.describe().to_json()?)
            .with_context(|| format!("cannot write scene to {}", path.display()))?;
        info!("Scene written to {}", path.display());
    }

    let center = scene.center();
    let origin = vec2(args.origin_x.unwrap_or(center.x), args.origin_y.unwrap_or(center.y));
    let ray_count = args.rays as usize;
    let workers = clamp_workers(args.workers);
    info!("Casting {} rays from ({}, {}) against {} primitives", ray_count, origin.x, origin.y, scene.len());

    let mut results = Vec::with_capacity(ray_count);
    let mut reference: Option<(_, Vec<HitResult>)> = None;
    for strategy in args.strategy.strategies() {
        let started = Instant::now();
        for _ in 0..args.frames {
            cast_into(&mut results, origin, ray_count, &scene, strategy, workers)?;
        }
        let per_frame = started.elapsed() / args.frames;
        let hits = results.iter().filter(|r| r.hit).count();
        info!("{:<16} {:>4} workers  {:>10.2?}/frame  {} of {} rays hit", strategy, workers, per_frame, hits, ray_count);

        if let Some((first, expected)) = &reference {
            if *expected != results {
                bail!("{} results differ from {}", strategy, first);
            }
        } else {
            reference = Some((strategy, results.clone()));
        }
    }

    if let Some(path) = &args.output {
        let records: Vec<RayRecord> = results.iter().enumerate().map(|(i, r)| RayRecord::new(i, r)).collect();
        fs::write(path, serde_json::to_string_pretty(&records)?)
            .with_context(|| format!("cannot write results to {}", path.display()))?;
        info!("Results written to {}", path.display());
    } else if results.iter().all(|r| !r.hit) {
        warn!("No ray hit anything; is the origin outside the scene?");
    }
    Ok(())
}
