//! Surface optics: matte, gloss, opacity and refraction.

use csgray_math::{validate_refraction, Color, Result, ValueError, REFRACTION_GLASS};

/// Optical properties of a point on the surface of a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optics {
    /// Color and intensity of scattered (diffuse) reflection.
    matte_color: Color,
    /// Color and intensity of mirror reflection.
    gloss_color: Color,
    /// Fraction 0..1 of light reflected rather than transmitted.
    opacity: f64,
}

impl Optics {
    /// Build optics from explicit colors and opacity, validating each.
    pub fn new(matte_color: Color, gloss_color: Color, opacity: f64) -> Result<Self> {
        let mut optics = Self::default();
        optics.set_matte_color(matte_color)?;
        optics.set_gloss_color(gloss_color)?;
        optics.set_opacity(opacity)?;
        Ok(optics)
    }

    /// Fully matte, fully opaque optics.
    pub fn matte(color: Color) -> Result<Self> {
        Self::new(color, Color::BLACK, 1.0)
    }

    /// Split reflected light between matte and gloss.
    ///
    /// `gloss_factor` 0 is fully matte, 1 fully glossy. The matte color
    /// becomes `(1 - gloss_factor) * raw_matte` and the gloss color
    /// `gloss_factor * raw_gloss`, so no channel is double-counted. Nothing
    /// is modified unless every argument is valid.
    pub fn set_matte_gloss_balance(
        &mut self,
        gloss_factor: f64,
        raw_matte: Color,
        raw_gloss: Color,
    ) -> Result<()> {
        raw_matte.validate_reflection()?;
        raw_gloss.validate_reflection()?;
        if !(0.0..=1.0).contains(&gloss_factor) {
            return Err(ValueError::GlossFactor(gloss_factor));
        }
        self.matte_color = (1.0 - gloss_factor) * raw_matte;
        self.gloss_color = gloss_factor * raw_gloss;
        Ok(())
    }

    /// Set the matte color; every channel must lie in 0..1.
    pub fn set_matte_color(&mut self, color: Color) -> Result<()> {
        color.validate_reflection()?;
        self.matte_color = color;
        Ok(())
    }

    /// Set the gloss color; every channel must lie in 0..1.
    pub fn set_gloss_color(&mut self, color: Color) -> Result<()> {
        color.validate_reflection()?;
        self.gloss_color = color;
        Ok(())
    }

    /// Set the opacity; must lie in 0..1.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ValueError::Opacity(opacity));
        }
        self.opacity = opacity;
        Ok(())
    }

    /// Matte (diffuse) color.
    pub fn matte_color(&self) -> Color {
        self.matte_color
    }

    /// Gloss (mirror) color.
    pub fn gloss_color(&self) -> Color {
        self.gloss_color
    }

    /// Opacity in 0..1.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

impl Default for Optics {
    fn default() -> Self {
        Self {
            matte_color: Color::WHITE,
            gloss_color: Color::BLACK,
            opacity: 1.0,
        }
    }
}

/// Everything a solid owns about how it interacts with light: its uniform
/// surface optics and the refractive index of its interior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    optics: Optics,
    refractive_index: f64,
}

impl Appearance {
    /// Uniform surface optics.
    pub fn optics(&self) -> &Optics {
        &self.optics
    }

    /// Mutable access to the surface optics; its setters validate.
    pub fn optics_mut(&mut self) -> &mut Optics {
        &mut self.optics
    }

    /// Replace the surface optics.
    pub fn set_optics(&mut self, optics: Optics) {
        self.optics = optics;
    }

    /// Refractive index of the solid's interior.
    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }

    /// Set the refractive index, rejecting values outside the plausible range.
    pub fn set_refractive_index(&mut self, refraction: f64) -> Result<()> {
        self.refractive_index = validate_refraction(refraction)?;
        Ok(())
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            optics: Optics::default(),
            refractive_index: REFRACTION_GLASS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_optics() {
        let optics = Optics::default();
        assert_eq!(optics.matte_color(), Color::WHITE);
        assert_eq!(optics.gloss_color(), Color::BLACK);
        assert_eq!(optics.opacity(), 1.0);
    }

    #[test]
    fn test_matte_gloss_balance_sums_to_input() {
        let mut optics = Optics::default();
        let raw = Color::new(0.8, 0.4, 1.0);
        optics.set_matte_gloss_balance(0.25, raw, raw).unwrap();
        let sum = optics.matte_color() + optics.gloss_color();
        assert_abs_diff_eq!(sum.red, raw.red, epsilon = 1e-12);
        assert_abs_diff_eq!(sum.green, raw.green, epsilon = 1e-12);
        assert_abs_diff_eq!(sum.blue, raw.blue, epsilon = 1e-12);
        assert_abs_diff_eq!(optics.gloss_color().red, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_balance_leaves_optics_unchanged() {
        let mut optics = Optics::matte(Color::new(0.5, 0.5, 0.5)).unwrap();
        let before = optics;
        assert_eq!(
            optics.set_matte_gloss_balance(1.5, Color::WHITE, Color::WHITE),
            Err(ValueError::GlossFactor(1.5))
        );
        assert!(optics
            .set_matte_gloss_balance(0.5, Color::new(2.0, 0.0, 0.0), Color::WHITE)
            .is_err());
        assert_eq!(optics, before);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Optics::new(Color::new(1.1, 0.0, 0.0), Color::BLACK, 1.0).is_err());
        assert!(Optics::new(Color::WHITE, Color::new(0.0, -0.1, 0.0), 1.0).is_err());
        assert_eq!(
            Optics::new(Color::WHITE, Color::BLACK, 1.5),
            Err(ValueError::Opacity(1.5))
        );
    }

    #[test]
    fn test_appearance_refraction_validated() {
        let mut appearance = Appearance::default();
        assert_eq!(appearance.refractive_index(), REFRACTION_GLASS);
        appearance.set_refractive_index(1.33).unwrap();
        assert_eq!(appearance.refractive_index(), 1.33);
        assert!(appearance.set_refractive_index(0.9).is_err());
        assert_eq!(appearance.refractive_index(), 1.33);
    }
}
