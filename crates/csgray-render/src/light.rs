//! Point light sources.

use csgray_math::{Color, Result, Vec3};

/// A point emitting light of a given color in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    /// Position in camera coordinates.
    pub location: Vec3,
    /// Intensity per channel.
    pub color: Color,
}

impl LightSource {
    /// Light at `location` with the given color. Fails if any channel is
    /// negative.
    pub fn new(location: Vec3, color: Color) -> Result<Self> {
        color.validate()?;
        Ok(Self { location, color })
    }
}
