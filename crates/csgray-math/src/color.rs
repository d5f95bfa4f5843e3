//! RGB color / light intensity.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};

use crate::error::{Result, ValueError};

/// Red, green and blue intensities.
///
/// Components are linear (pre-gamma) and unbounded above; accumulated
/// colors may exceed 1.0 and are normalized only when an image is produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red intensity.
    pub red: f64,
    /// Green intensity.
    pub green: f64,
    /// Blue intensity.
    pub blue: f64,
}

impl Color {
    /// No light at all.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit intensity on every channel.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from its three channels.
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Create a color whose channels are all scaled by `luminosity`.
    pub fn with_luminosity(red: f64, green: f64, blue: f64, luminosity: f64) -> Self {
        Self::new(luminosity * red, luminosity * green, luminosity * blue)
    }

    /// Largest of the three channels.
    pub fn max_component(&self) -> f64 {
        self.red.max(self.green).max(self.blue)
    }

    /// True when at least one channel reaches `threshold`.
    pub fn any_at_least(&self, threshold: f64) -> bool {
        self.red >= threshold || self.green >= threshold || self.blue >= threshold
    }

    /// Reject colors with a negative channel.
    pub fn validate(&self) -> Result<()> {
        if self.red < 0.0 || self.green < 0.0 || self.blue < 0.0 {
            Err(ValueError::NegativeColor(self.red, self.green, self.blue))
        } else {
            Ok(())
        }
    }

    /// Reject colors with any channel outside 0..1, as required for
    /// reflection (matte/gloss) colors.
    pub fn validate_reflection(&self) -> Result<()> {
        for (channel, value) in [("red", self.red), ("green", self.green), ("blue", self.blue)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValueError::ColorComponent { channel, value });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.red, self.green, self.blue)
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color::new(self.red + rhs.red, self.green + rhs.green, self.blue + rhs.blue)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.red += rhs.red;
        self.green += rhs.green;
        self.blue += rhs.blue;
    }
}

impl Mul for Color {
    type Output = Color;
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.red * rhs.red, self.green * rhs.green, self.blue * rhs.blue)
    }
}

impl MulAssign for Color {
    fn mul_assign(&mut self, rhs: Color) {
        self.red *= rhs.red;
        self.green *= rhs.green;
        self.blue *= rhs.blue;
    }
}

impl Mul<f64> for Color {
    type Output = Color;
    fn mul(self, rhs: f64) -> Color {
        Color::new(self.red * rhs, self.green * rhs, self.blue * rhs)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;
    fn mul(self, rhs: Color) -> Color {
        rhs * self
    }
}

impl MulAssign<f64> for Color {
    fn mul_assign(&mut self, rhs: f64) {
        self.red *= rhs;
        self.green *= rhs;
        self.blue *= rhs;
    }
}

impl Div<f64> for Color {
    type Output = Color;
    fn div(self, rhs: f64) -> Color {
        Color::new(self.red / rhs, self.green / rhs, self.blue / rhs)
    }
}

impl DivAssign<f64> for Color {
    fn div_assign(&mut self, rhs: f64) {
        self.red /= rhs;
        self.green /= rhs;
        self.blue /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_operations() {
        let a = Color::new(0.5, 0.25, 1.0);
        let b = Color::new(2.0, 4.0, 0.5);
        assert_eq!(a * b, Color::new(1.0, 1.0, 0.5));
        assert_eq!(a + b, Color::new(2.5, 4.25, 1.5));
        assert_eq!(2.0 * a, Color::new(1.0, 0.5, 2.0));
        assert_eq!(a / 0.5, Color::new(1.0, 0.5, 2.0));
    }

    #[test]
    fn test_luminosity() {
        let c = Color::with_luminosity(0.5, 1.0, 0.0, 2.0);
        assert_eq!(c, Color::new(1.0, 2.0, 0.0));
        assert_eq!(c.max_component(), 2.0);
    }

    #[test]
    fn test_negative_color_rejected() {
        assert!(Color::new(0.0, 0.0, 0.0).validate().is_ok());
        assert!(matches!(
            Color::new(0.1, -0.2, 0.0).validate(),
            Err(ValueError::NegativeColor(..))
        ));
    }

    #[test]
    fn test_reflection_range() {
        assert!(Color::new(1.0, 0.0, 0.5).validate_reflection().is_ok());
        let err = Color::new(0.2, 0.3, 1.2).validate_reflection().unwrap_err();
        assert_eq!(
            err,
            ValueError::ColorComponent {
                channel: "blue",
                value: 1.2
            }
        );
    }

    #[test]
    fn test_intensity_threshold() {
        let dim = Color::new(0.0005, 0.0001, 0.0);
        assert!(!dim.any_at_least(0.001));
        assert!(Color::new(0.0, 0.0, 0.001).any_at_least(0.001));
    }
}
