//! Error types for value validation.

use thiserror::Error;

/// An out-of-range configuration value, rejected at the setter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// A color (light or accumulated) has a negative channel.
    #[error("negative color values not allowed: ({0}, {1}, {2})")]
    NegativeColor(f64, f64, f64),

    /// A reflection color channel lies outside 0..1.
    #[error("invalid {channel} color component: {value}")]
    ColorComponent {
        /// Name of the offending channel.
        channel: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Opacity lies outside 0..1.
    #[error("invalid opacity: {0}")]
    Opacity(f64),

    /// Gloss factor lies outside 0..1.
    #[error("gloss factor must be in the range 0..1, got {0}")]
    GlossFactor(f64),

    /// Refractive index lies outside the supported range.
    #[error("invalid refractive index: {0}")]
    RefractiveIndex(f64),

    /// A primitive dimension is not a positive finite number.
    #[error("invalid {name}: {value}")]
    Dimension {
        /// Name of the offending dimension.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result type for value validation.
pub type Result<T> = std::result::Result<T, ValueError>;
