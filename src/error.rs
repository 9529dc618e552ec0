//! Error types for geometry construction, scene loading and casting.

use thiserror::Error;

use crate::types::Float;

/// Rejected geometry. Degenerate shapes never reach the intersection code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Ray direction has zero length or is not finite.
    #[error("ray direction must be a finite, non-zero vector")]
    DegenerateDirection,

    /// Circle radius is zero, negative or not finite.
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(Float),

    /// Rectangle has a zero, negative or non-finite side.
    #[error("rectangle extent must be positive and finite, got {width}x{height}")]
    InvalidExtent { width: Float, height: Float },

    /// A coordinate or angle is NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

/// Contract violations reported by the ray dispatcher.
#[derive(Error, Debug)]
pub enum CastError {
    /// At least one ray must be cast.
    #[error("ray count must be at least 1")]
    ZeroRays,

    /// The light origin is NaN or infinite.
    #[error("light origin must be finite")]
    NonFiniteOrigin,

    /// The data-parallel worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A manual-partition worker panicked before finishing its range.
    #[error("worker {0} panicked while casting rays")]
    WorkerPanicked(usize),
}

/// Errors raised while building a scene from a description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A primitive in the description is degenerate.
    #[error("invalid {kind} #{index}: {source}")]
    InvalidPrimitive {
        kind: &'static str,
        index: usize,
        #[source]
        source: GeometryError,
    },

    /// A required field is absent.
    #[error("missing field `{field}` in {kind} #{index}")]
    MissingField {
        kind: &'static str,
        index: usize,
        field: &'static str,
    },

    /// Scene bounds are not positive.
    #[error("scene bounds must be positive, got {0}x{1}")]
    InvalidBounds(Float, Float),

    /// The description file is not valid JSON for a scene.
    #[error("failed to parse scene description: {0}")]
    Parse(#[from] serde_json::Error),

    /// The description file could not be read.
    #[error("failed to read scene description: {0}")]
    Io(#[from] std::io::Error),
}
