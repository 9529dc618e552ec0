//! 2-D ray casting against circles and oriented rectangles.
//!
//! A light origin emits `n` rays at evenly spaced angles; each ray is
//! resolved to its closest hit in a [`Scene`]. The batch can run on the
//! calling thread, on a rayon pool or on manually partitioned threads, and
//! all three produce the same results.
//!
//! - [`primitives`] - ray/segment, ray/circle and ray/rectangle intersection
//! - [`scene`] - primitive set and closest-hit query
//! - [`raytrace`] - batch dispatch over a [`Strategy`]
//! - [`scene_generator`] - seeded random scene layout

pub mod types;
pub mod error;
pub mod ray;
pub mod intersections;
pub mod primitives;
pub mod parsed_scene;
pub mod scene;
pub mod scene_generator;
pub mod raytrace;

pub use error::{CastError, GeometryError, SceneError};
pub use intersections::{HitResult, Intersectable};
pub use ray::Ray;
pub use raytrace::{cast, cast_into, partition, Strategy};
pub use scene::{Primitive, Scene};
