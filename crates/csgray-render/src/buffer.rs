//! Supersampled image buffer and conversion to 8-bit RGBA.

use csgray_math::Color;

use crate::error::{RenderError, Result};

/// One supersample of the rendered image.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelData {
    /// Linear (pre-normalization) color.
    pub color: Color,
    /// Set when the sample could not be traced because several surfaces
    /// tied for closest; its color is then borrowed from its neighbors.
    pub is_ambiguous: bool,
}

/// Row-major grid of `anti_alias`-times-supersampled pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pixels_wide: usize,
    pixels_high: usize,
    anti_alias: usize,
    samples: Vec<PixelData>,
}

impl ImageBuffer {
    /// Black buffer for an image of `pixels_wide x pixels_high` output pixels,
    /// each sampled on an `anti_alias x anti_alias` grid.
    pub fn new(pixels_wide: usize, pixels_high: usize, anti_alias: usize) -> Self {
        let samples = pixels_wide * anti_alias * pixels_high * anti_alias;
        Self {
            pixels_wide,
            pixels_high,
            anti_alias,
            samples: vec![PixelData::default(); samples],
        }
    }

    /// Output image width.
    pub fn pixels_wide(&self) -> usize {
        self.pixels_wide
    }

    /// Output image height.
    pub fn pixels_high(&self) -> usize {
        self.pixels_high
    }

    /// Supersampling factor per axis.
    pub fn anti_alias(&self) -> usize {
        self.anti_alias
    }

    /// Width in samples.
    pub fn samples_wide(&self) -> usize {
        self.pixels_wide * self.anti_alias
    }

    /// Height in samples.
    pub fn samples_high(&self) -> usize {
        self.pixels_high * self.anti_alias
    }

    fn index(&self, i: usize, j: usize) -> Result<usize> {
        let (width, height) = (self.samples_wide(), self.samples_high());
        if i < width && j < height {
            Ok(j * width + i)
        } else {
            Err(RenderError::PixelOutOfBounds {
                i,
                j,
                width,
                height,
            })
        }
    }

    /// Sample at column `i`, row `j`.
    pub fn pixel(&self, i: usize, j: usize) -> Result<&PixelData> {
        let index = self.index(i, j)?;
        Ok(&self.samples[index])
    }

    /// Mutable sample at column `i`, row `j`.
    pub fn pixel_mut(&mut self, i: usize, j: usize) -> Result<&mut PixelData> {
        let index = self.index(i, j)?;
        Ok(&mut self.samples[index])
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[PixelData] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [PixelData] {
        &mut self.samples
    }

    /// Replace each ambiguous sample's color with the average of its
    /// non-ambiguous 8-neighbors, or black when it has none.
    pub fn resolve_ambiguous_samples(&mut self) {
        let (width, height) = (self.samples_wide(), self.samples_high());
        for j in 0..height {
            for i in 0..width {
                if !self.samples[j * width + i].is_ambiguous {
                    continue;
                }
                let mut sum = Color::BLACK;
                let mut count = 0usize;
                for nj in j.saturating_sub(1)..=(j + 1).min(height - 1) {
                    for ni in i.saturating_sub(1)..=(i + 1).min(width - 1) {
                        let neighbor = &self.samples[nj * width + ni];
                        if !neighbor.is_ambiguous {
                            sum += neighbor.color;
                            count += 1;
                        }
                    }
                }
                self.samples[j * width + i].color = if count > 0 {
                    sum / count as f64
                } else {
                    Color::BLACK
                };
            }
        }
    }

    /// Largest channel value over every sample, or 1.0 when the buffer is
    /// entirely black. Fails if any sample has a negative channel.
    pub fn max_color_value(&self) -> Result<f64> {
        let mut max = 0.0f64;
        for sample in &self.samples {
            sample.color.validate()?;
            max = max.max(sample.color.max_component());
        }
        Ok(if max == 0.0 { 1.0 } else { max })
    }

    /// Average each `anti_alias x anti_alias` patch, normalize by
    /// [`max_color_value`](Self::max_color_value) and quantize to opaque
    /// 8-bit RGBA, row-major.
    pub fn to_rgba8(&self) -> Result<Vec<u8>> {
        let max = self.max_color_value()?;
        let aa = self.anti_alias;
        let width = self.samples_wide();
        let patch_area = (aa * aa) as f64;

        let mut rgba = Vec::with_capacity(self.pixels_wide * self.pixels_high * 4);
        for j in 0..self.pixels_high {
            for i in 0..self.pixels_wide {
                let mut sum = Color::BLACK;
                for dj in 0..aa {
                    let row = (j * aa + dj) * width;
                    for di in 0..aa {
                        sum += self.samples[row + i * aa + di].color;
                    }
                }
                let average = sum / patch_area;
                rgba.push(quantize(average.red, max));
                rgba.push(quantize(average.green, max));
                rgba.push(quantize(average.blue, max));
                rgba.push(u8::MAX);
            }
        }
        Ok(rgba)
    }
}

/// `floor(255 * value / max)`, clamped to the byte range.
fn quantize(value: f64, max: f64) -> u8 {
    (255.0 * value / max).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_out_of_bounds_access() {
        let mut buffer = ImageBuffer::new(4, 3, 2);
        assert!(buffer.pixel(7, 5).is_ok());
        assert_eq!(
            buffer.pixel(8, 0),
            Err(RenderError::PixelOutOfBounds {
                i: 8,
                j: 0,
                width: 8,
                height: 6
            })
        );
        assert!(buffer.pixel_mut(0, 6).is_err());
    }

    #[test]
    fn test_all_black_normalizes_by_one() {
        let buffer = ImageBuffer::new(2, 2, 1);
        assert_eq!(buffer.max_color_value().unwrap(), 1.0);
        let rgba = buffer.to_rgba8().unwrap();
        assert_eq!(rgba, vec![0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_negative_channel_rejected() {
        let mut buffer = ImageBuffer::new(1, 1, 1);
        buffer.pixel_mut(0, 0).unwrap().color = Color::new(0.5, -0.1, 0.0);
        assert!(matches!(buffer.max_color_value(), Err(RenderError::Value(_))));
        assert!(buffer.to_rgba8().is_err());
    }

    #[test]
    fn test_normalization_and_truncation() {
        let mut buffer = ImageBuffer::new(2, 1, 1);
        buffer.pixel_mut(0, 0).unwrap().color = Color::new(2.0, 1.0, 0.0);
        buffer.pixel_mut(1, 0).unwrap().color = Color::new(0.5, 0.0, 0.01);
        assert_eq!(buffer.max_color_value().unwrap(), 2.0);
        let rgba = buffer.to_rgba8().unwrap();
        // 255 * 1/2 = 127.5 -> 127; 255 * 0.25 = 63.75 -> 63; 255 * 0.005 = 1.275 -> 1
        assert_eq!(rgba, vec![255, 127, 0, 255, 63, 0, 1, 255]);
    }

    #[test]
    fn test_scale_before_dividing_by_max() {
        // (255 * 0.6) / 3 truncates to 51; 255 * (0.6 / 3) would give 50.
        assert_eq!(quantize(0.6, 3.0), 51);

        let mut buffer = ImageBuffer::new(2, 1, 1);
        buffer.pixel_mut(0, 0).unwrap().color = Color::new(3.0, 0.0, 0.0);
        buffer.pixel_mut(1, 0).unwrap().color = Color::new(0.6, 0.0, 0.0);
        assert_eq!(buffer.to_rgba8().unwrap(), vec![255, 0, 0, 255, 51, 0, 0, 255]);
    }

    #[test]
    fn test_anti_alias_patches_average() {
        let mut buffer = ImageBuffer::new(1, 1, 2);
        buffer.pixel_mut(0, 0).unwrap().color = Color::new(1.0, 1.0, 1.0);
        buffer.pixel_mut(1, 1).unwrap().color = Color::new(1.0, 0.0, 0.0);
        let rgba = buffer.to_rgba8().unwrap();
        // red averages to 0.5 of max 1.0, green/blue to 0.25.
        assert_eq!(rgba, vec![127, 63, 63, 255]);
    }

    #[test]
    fn test_ambiguous_samples_take_neighbor_average() {
        let mut buffer = ImageBuffer::new(3, 1, 1);
        buffer.pixel_mut(0, 0).unwrap().color = Color::new(1.0, 0.0, 0.0);
        buffer.pixel_mut(2, 0).unwrap().color = Color::new(0.0, 0.0, 1.0);
        *buffer.pixel_mut(1, 0).unwrap() = PixelData {
            color: Color::new(9.0, 9.0, 9.0),
            is_ambiguous: true,
        };
        buffer.resolve_ambiguous_samples();
        let healed = buffer.pixel(1, 0).unwrap().color;
        assert_abs_diff_eq!(healed.red, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(healed.green, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(healed.blue, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_isolated_ambiguous_sample_goes_black() {
        let mut buffer = ImageBuffer::new(1, 1, 1);
        *buffer.pixel_mut(0, 0).unwrap() = PixelData {
            color: Color::WHITE,
            is_ambiguous: true,
        };
        buffer.resolve_ambiguous_samples();
        assert_eq!(buffer.pixel(0, 0).unwrap().color, Color::BLACK);
    }
}
