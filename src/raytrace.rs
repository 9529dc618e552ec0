//! Fans a batch of rays around a light origin out over the scene.
//!
//! Ray `i` of `n` leaves the origin at angle `2π·i/n` and its result lands at
//! index `i` of the buffer. Every strategy computes each ray with the same
//! code from the same inputs, so results are bit-identical across them.
//! Workers are handed disjoint sub-slices of the buffer and never share an
//! index, which keeps the buffer free of locks.

use std::{
    collections::HashMap,
    fmt,
    num::NonZeroUsize,
    ops::Range,
    sync::{Arc, Mutex, OnceLock, PoisonError},
    thread,
};

use log::{debug, trace, warn};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};

use crate::{
    error::CastError,
    intersections::HitResult,
    ray::Ray,
    scene::Scene,
    types::{is_finite, Float, Vec2, PI},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One ray after another on the calling thread.
    Sequential,
    /// Equal static chunks scheduled on a rayon pool of the requested size.
    DataParallel,
    /// One scoped thread per contiguous range from [`partition`].
    ManualPartition,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::DataParallel, Strategy::ManualPartition];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sequential => "Single-Threaded",
            Strategy::DataParallel => "Data-Parallel",
            Strategy::ManualPartition => "Manual-Partition",
        }
    }

    /// The strategy a "cycle mode" key press switches to.
    pub fn next(self) -> Self {
        match self {
            Strategy::Sequential => Strategy::DataParallel,
            Strategy::DataParallel => Strategy::ManualPartition,
            Strategy::ManualPartition => Strategy::Sequential,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

pub fn max_workers() -> usize {
    thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

/// Clamps a requested worker count to `[1, max_workers()]`.
pub fn clamp_workers(requested: usize) -> usize {
    let workers = requested.clamp(1, max_workers());
    if workers != requested {
        warn!("Requested {} workers, using {}", requested, workers);
    }
    workers
}

/// Contiguous half-open ranges covering `[0, len)`, at most `workers` of them.
/// Each is `ceil(len / workers)` long except the last, which takes what is
/// left. Ranges that would be empty are not produced.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk = len.div_ceil(workers);
    if chunk == 0 {
        return vec![];
    }
    (0..workers)
        .map(|worker| worker * chunk)
        .take_while(|&start| start < len)
        .map(|start| start..len.min(start + chunk))
        .collect()
}

pub fn ray_angle(index: usize, count: usize) -> Float {
    2.0 * PI * index as Float / count as Float
}

pub fn cast_ray(origin: Vec2, index: usize, count: usize, scene: &Scene) -> HitResult {
    scene.closest_hit(&Ray::from_angle(origin, ray_angle(index, count)))
}

/// Casts `ray_count` rays into a new buffer.
pub fn cast(
    origin: Vec2,
    ray_count: usize,
    scene: &Scene,
    strategy: Strategy,
    workers: usize,
) -> Result<Vec<HitResult>, CastError> {
    let mut results = Vec::new();
    cast_into(&mut results, origin, ray_count, scene, strategy, workers)?;
    Ok(results)
}

/// Casts into a caller-owned buffer, resizing it to `ray_count`. On error the
/// buffer is left empty.
pub fn cast_into(
    results: &mut Vec<HitResult>,
    origin: Vec2,
    ray_count: usize,
    scene: &Scene,
    strategy: Strategy,
    workers: usize,
) -> Result<(), CastError> {
    if ray_count == 0 {
        results.clear();
        return Err(CastError::ZeroRays);
    }
    if !is_finite(origin) {
        results.clear();
        return Err(CastError::NonFiniteOrigin);
    }
    results.clear();
    results.resize(ray_count, HitResult::default());

    let outcome = match strategy {
        Strategy::Sequential => {
            debug!("Casting {} rays sequentially", ray_count);
            fill_range(origin, ray_count, scene, 0, results);
            Ok(())
        }
        Strategy::DataParallel => cast_data_parallel(origin, scene, results, clamp_workers(workers)),
        Strategy::ManualPartition => cast_manual_partition(origin, scene, results, clamp_workers(workers)),
    };
    if outcome.is_err() {
        results.clear();
    }
    outcome
}

fn fill_range(origin: Vec2, count: usize, scene: &Scene, start: usize, slots: &mut [HitResult]) {
    for (offset, slot) in slots.iter_mut().enumerate() {
        *slot = cast_ray(origin, start + offset, count, scene);
    }
}

static POOLS: OnceLock<Mutex<HashMap<usize, Arc<ThreadPool>>>> = OnceLock::new();

/// Rayon pool with exactly `workers` threads, built on first use and kept for
/// the rest of the process.
fn pool(workers: usize) -> Result<Arc<ThreadPool>, CastError> {
    let mut pools = POOLS.get_or_init(Default::default).lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(pool) = pools.get(&workers) {
        return Ok(Arc::clone(pool));
    }
    let pool = Arc::new(
        ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("raycast-pool-{index}"))
            .build()?,
    );
    debug!("Built a pool of {} workers", workers);
    pools.insert(workers, Arc::clone(&pool));
    Ok(pool)
}

fn cast_data_parallel(origin: Vec2, scene: &Scene, results: &mut [HitResult], workers: usize) -> Result<(), CastError> {
    let count = results.len();
    let chunk = count.div_ceil(workers);
    debug!("Casting {} rays on {} pooled workers, chunk {}", count, workers, chunk);

    pool(workers)?.install(|| {
        results.par_chunks_mut(chunk).enumerate().for_each(|(index, slots)| {
            fill_range(origin, count, scene, index * chunk, slots);
        });
    });
    Ok(())
}

fn cast_manual_partition(origin: Vec2, scene: &Scene, results: &mut [HitResult], workers: usize) -> Result<(), CastError> {
    let count = results.len();
    let ranges = partition(count, workers);
    debug!("Casting {} rays on {} spawned workers", count, ranges.len());

    thread::scope(|scope| {
        let mut rest = results;
        let mut handles = Vec::with_capacity(ranges.len());
        for (worker, range) in ranges.into_iter().enumerate() {
            let (slots, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            trace!("Worker {} takes rays {:?}", worker, range);
            handles.push(scope.spawn(move || fill_range(origin, count, scene, range.start, slots)));
        }

        // join every worker before reporting so none is left running
        let mut outcome = Ok(());
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && outcome.is_ok() {
                outcome = Err(CastError::WorkerPanicked(worker));
            }
        }
        outcome
    })
}
