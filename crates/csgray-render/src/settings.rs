//! Render settings.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Image size, camera and recursion limits for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output image width in pixels.
    pub pixels_wide: usize,
    /// Output image height in pixels.
    pub pixels_high: usize,
    /// Camera magnification; larger values narrow the field of view.
    pub zoom: f64,
    /// Each pixel is sampled on an `anti_alias x anti_alias` grid.
    pub anti_alias: usize,
    /// Rays that have bounced more often than this contribute nothing.
    pub max_recursion_depth: u32,
    /// Rays whose every intensity channel is below this contribute nothing.
    pub min_intensity: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            pixels_wide: 300,
            pixels_high: 300,
            zoom: 3.0,
            anti_alias: 1,
            max_recursion_depth: 20,
            min_intensity: 0.001,
        }
    }
}

impl RenderSettings {
    /// Settings with the given image size and camera, default limits.
    pub fn new(pixels_wide: usize, pixels_high: usize, zoom: f64, anti_alias: usize) -> Self {
        Self {
            pixels_wide,
            pixels_high,
            zoom,
            anti_alias,
            ..Self::default()
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.pixels_wide == 0 || self.pixels_high == 0 {
            return Err(RenderError::InvalidSettings(format!(
                "image must be at least 1x1 pixels, got {}x{}",
                self.pixels_wide, self.pixels_high
            )));
        }
        if self.anti_alias == 0 {
            return Err(RenderError::InvalidSettings(
                "anti_alias must be at least 1".into(),
            ));
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        if !(self.min_intensity.is_finite() && self.min_intensity >= 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "min_intensity must be non-negative, got {}",
                self.min_intensity
            )));
        }
        Ok(())
    }

    /// Supersampled buffer width.
    pub fn samples_wide(&self) -> usize {
        self.pixels_wide * self.anti_alias
    }

    /// Supersampled buffer height.
    pub fn samples_high(&self) -> usize {
        self.pixels_high * self.anti_alias
    }
}
