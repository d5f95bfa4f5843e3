//! Error types for rendering.

use csgray_math::ValueError;
use csgray_solid::SolidError;
use thiserror::Error;

/// Errors that can occur while tracing rays or converting the image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// More than one surface lies at the closest distance along a ray.
    #[error("ambiguous intersection: {ties} surfaces at the closest distance")]
    AmbiguousIntersection {
        /// How many intersections tied.
        ties: usize,
    },

    /// Pixel coordinates outside the buffer.
    #[error("pixel ({i}, {j}) is outside the {width}x{height} buffer")]
    PixelOutOfBounds {
        /// Column.
        i: usize,
        /// Row.
        j: usize,
        /// Buffer width in samples.
        width: usize,
        /// Buffer height in samples.
        height: usize,
    },

    /// The cosine between a ray and a surface normal left [-1, 1] by more
    /// than rounding error.
    #[error("dot product {0} out of range")]
    DotProductOutOfRange(f64),

    /// No refracted direction aligned with the incident ray.
    #[error("could not find a refracted ray direction")]
    RefractionFailure,

    /// Invalid render settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Containment or intersection failure in the scene's solids.
    #[error(transparent)]
    Solid(#[from] SolidError),

    /// Invalid value, e.g. a negative color channel.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
