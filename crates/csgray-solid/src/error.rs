//! Error types for the solid object model.

use csgray_math::{ValueError, Vec3};
use thiserror::Error;

/// Errors raised while intersecting or classifying solids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolidError {
    /// A containment ray crossed a surface edge-on (normal perpendicular to
    /// the ray), so entering and exiting cannot be told apart.
    #[error("ambiguous transition while testing containment of {point:?}")]
    AmbiguousTransition {
        /// The point whose containment was being tested.
        point: Vec3,
    },

    /// Exits minus entries along a containment ray was neither 0 nor 1.
    #[error("cannot determine containment of {point:?}: exits - enters = {difference}")]
    ContainmentUndetermined {
        /// The point whose containment was being tested.
        point: Vec3,
        /// Signed crossing count, exits minus entries.
        difference: i32,
    },

    /// An invalid configuration value.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Result type for solid operations.
pub type Result<T> = std::result::Result<T, SolidError>;
