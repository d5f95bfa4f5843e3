//! Recursive light transport.
//!
//! A ray that hits a surface is shaded from three contributions: matte
//! light from every visible point source, a mirror reflection, and (for
//! translucent surfaces) a refracted ray. Reflection and refraction recurse
//! with attenuated intensity until the intensity drops below the configured
//! floor or the recursion limit is reached.

use csgray_algebra::solve_real_quadratic;
use csgray_math::{Color, Vec3, EPSILON};
use csgray_solid::Intersection;

use crate::error::{RenderError, Result};
use crate::scene::Scene;
use crate::settings::RenderSettings;

/// Offset along a refracted ray used to find the medium it enters.
pub const SMALL_SHIFT: f64 = 0.001;

/// Debug trace macro - prints only when the debug-trace feature is enabled
/// and the sample being traced was registered as a debug point.
#[cfg(feature = "debug-trace")]
macro_rules! debug_trace {
    ($ctx:expr, $depth:expr, $($arg:tt)*) => {
        if $ctx.is_active() {
            eprintln!("{:indent$}{}", "", format_args!($($arg)*), indent = 2 * ($depth as usize))
        }
    };
}

/// No-op version when debug-trace feature is disabled
#[cfg(not(feature = "debug-trace"))]
macro_rules! debug_trace {
    ($($arg:tt)*) => {};
}

/// Per-sample diagnostic state, passed down the recursion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceContext {
    active: bool,
}

impl TraceContext {
    /// Context that emits trace output when `active`.
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    /// Whether this sample is being traced.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A ray to be traced, with the state the recursion carries along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point.
    pub vantage: Vec3,
    /// Direction; need not be a unit vector.
    pub direction: Vec3,
    /// Refractive index of the medium the ray travels through.
    pub refractive_index: f64,
    /// Fraction of light per channel that this ray can still contribute.
    pub intensity: Color,
    /// Number of bounces so far.
    pub depth: u32,
}

impl Ray {
    /// A camera ray from the origin through the ambient medium.
    pub fn primary(direction: Vec3, ambient_refraction: f64) -> Self {
        Self {
            vantage: Vec3::zeros(),
            direction,
            refractive_index: ambient_refraction,
            intensity: Color::WHITE,
            depth: 0,
        }
    }
}

/// Fraction of light reflected at an interface between media of index
/// `n1` and `n2`, given the cosines of the incident and refracted angles.
///
/// Clamped to 1; a vanishing denominator means total reflection.
pub fn polarized_reflection(n1: f64, n2: f64, cos_a1: f64, cos_a2: f64) -> f64 {
    let left = n1 * cos_a1;
    let right = n2 * cos_a2;
    let numerator = left - right;
    let denominator = left + right;
    let denominator_squared = denominator * denominator;
    if denominator_squared < EPSILON {
        return 1.0;
    }
    (numerator * numerator / denominator_squared).min(1.0)
}

/// Shades rays against a scene under fixed render settings.
pub(crate) struct Tracer<'s> {
    scene: &'s Scene,
    settings: &'s RenderSettings,
}

impl<'s> Tracer<'s> {
    pub(crate) fn new(scene: &'s Scene, settings: &'s RenderSettings) -> Self {
        Self { scene, settings }
    }

    /// Color seen along `ray`, already scaled by its intensity.
    pub(crate) fn trace_ray(&self, ray: &Ray, ctx: TraceContext) -> Result<Color> {
        let closest = match self
            .scene
            .find_closest_intersection(&ray.vantage, &ray.direction)?
        {
            Some(closest) => closest,
            None => return Ok(ray.intensity * self.scene.background()),
        };
        if closest.is_ambiguous() {
            return Err(RenderError::AmbiguousIntersection {
                ties: closest.ties,
            });
        }

        let hit = &closest.intersection;
        debug_trace!(
            ctx,
            ray.depth,
            "hit {} ({}) at {:?} normal {:?}",
            hit.solid.tag(),
            hit.tag,
            hit.point,
            hit.surface_normal
        );
        self.lighting(hit, ray, ray.depth + 1, ctx)
    }

    fn lighting(
        &self,
        hit: &Intersection<'_>,
        ray: &Ray,
        depth: u32,
        ctx: TraceContext,
    ) -> Result<Color> {
        let mut color = Color::BLACK;
        if depth > self.settings.max_recursion_depth
            || !ray.intensity.any_at_least(self.settings.min_intensity)
        {
            return Ok(color);
        }

        let optics = hit.solid.surface_optics(&hit.point, hit.context);
        let opacity = optics.opacity();
        let transparency = 1.0 - opacity;

        if opacity > 0.0 {
            let matte = self.matte(hit)?;
            color += opacity * optics.matte_color() * ray.intensity * matte;
            debug_trace!(ctx, depth, "matte {}", color);
        }

        let mut reflection_factor = 0.0;
        if transparency > 0.0 {
            let (refracted, factor) =
                self.refraction(hit, ray, transparency * ray.intensity, depth, ctx)?;
            color += refracted;
            reflection_factor = factor;
            debug_trace!(ctx, depth, "refraction {} reflectance {}", refracted, factor);
        }

        let reflection_weight = ray.intensity
            * (opacity * optics.gloss_color() + (transparency * reflection_factor) * Color::WHITE);
        if reflection_weight.any_at_least(self.settings.min_intensity) {
            let reflected = self.reflection(hit, ray, reflection_weight, depth, ctx)?;
            color += reflected;
            debug_trace!(ctx, depth, "reflection {}", reflected);
        }

        Ok(color)
    }

    /// Sum of light arriving at the hit point from every unobstructed
    /// source, with Lambertian incidence and inverse-square falloff.
    fn matte(&self, hit: &Intersection<'_>) -> Result<Color> {
        let mut sum = Color::BLACK;
        for light in self.scene.lights() {
            let to_light = light.location - hit.point;
            let incidence = hit.surface_normal.dot(&to_light.normalize());
            if incidence > 0.0
                && self
                    .scene
                    .has_clear_line_of_sight(&hit.point, &light.location)?
            {
                sum += (incidence / to_light.norm_squared()) * light.color;
            }
        }
        Ok(sum)
    }

    fn reflection(
        &self,
        hit: &Intersection<'_>,
        ray: &Ray,
        intensity: Color,
        depth: u32,
        ctx: TraceContext,
    ) -> Result<Color> {
        let normal = hit.surface_normal;
        let perpendicular = 2.0 * ray.direction.dot(&normal);
        let reflected = Ray {
            vantage: hit.point,
            direction: ray.direction - perpendicular * normal,
            refractive_index: ray.refractive_index,
            intensity,
            depth,
        };
        self.trace_ray(&reflected, ctx)
    }

    /// Trace the transmitted ray. Returns its color and the fraction of
    /// light reflected at the interface instead of transmitted.
    fn refraction(
        &self,
        hit: &Intersection<'_>,
        ray: &Ray,
        intensity: Color,
        depth: u32,
        ctx: TraceContext,
    ) -> Result<(Color, f64)> {
        let direction = ray.direction.normalize();
        let normal = hit.surface_normal;

        let mut cos_a1 = direction.dot(&normal);
        if cos_a1 <= -1.0 {
            if cos_a1 < -1.0001 {
                return Err(RenderError::DotProductOutOfRange(cos_a1));
            }
            cos_a1 = -1.0;
        } else if cos_a1 >= 1.0 {
            if cos_a1 > 1.0001 {
                return Err(RenderError::DotProductOutOfRange(cos_a1));
            }
            cos_a1 = 1.0;
        }

        // Which medium is just past the surface?
        let probe = hit.point + SMALL_SHIFT * direction;
        let target_index = match self.scene.primary_container(&probe)? {
            Some(solid) => solid.refractive_index(),
            None => self.scene.ambient_refraction(),
        };

        let ratio = ray.refractive_index / target_index;
        let sin_a1 = (1.0 - cos_a1 * cos_a1).sqrt();
        let sin_a2 = ratio * sin_a1;
        if sin_a2 <= -1.0 || sin_a2 >= 1.0 {
            // Total internal reflection.
            return Ok((Color::BLACK, 1.0));
        }

        // The refracted direction is direction + k * normal, with |.| = 1/ratio.
        let roots = solve_real_quadratic(1.0, 2.0 * cos_a1, 1.0 - 1.0 / (ratio * ratio));
        let mut best: Option<Vec3> = None;
        let mut max_alignment = -0.0001;
        for k in &roots {
            let candidate = direction + *k * normal;
            let alignment = direction.dot(&candidate);
            if alignment > max_alignment {
                max_alignment = alignment;
                best = Some(candidate);
            }
        }
        let refracted_direction = match best {
            Some(d) if max_alignment > 0.0 => d,
            _ => return Err(RenderError::RefractionFailure),
        };

        let mut cos_a2 = (1.0 - sin_a2 * sin_a2).sqrt();
        if cos_a1 < 0.0 {
            cos_a2 = -cos_a2;
        }
        let reflection_factor =
            polarized_reflection(ray.refractive_index, target_index, cos_a1, cos_a2);

        let transmitted = Ray {
            vantage: hit.point,
            direction: refracted_direction,
            refractive_index: target_index,
            intensity: (1.0 - reflection_factor) * intensity,
            depth,
        };
        let color = self.trace_ray(&transmitted, ctx)?;
        Ok((color, reflection_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normal_incidence_reflectance() {
        // ((1 - 1.5) / (1 + 1.5))^2 = 0.04
        assert_abs_diff_eq!(polarized_reflection(1.0, 1.5, -1.0, -1.0), 0.04, epsilon = 1e-12);
        assert_abs_diff_eq!(polarized_reflection(1.5, 1.0, 1.0, 1.0), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_matching_media_do_not_reflect() {
        assert_abs_diff_eq!(polarized_reflection(1.3, 1.3, 0.6, 0.6), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grazing_incidence_reflects_everything() {
        assert_eq!(polarized_reflection(1.0, 1.5, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_primary_ray() {
        let ray = Ray::primary(Vec3::new(0.1, -0.2, -1.0), 1.33);
        assert_eq!(ray.vantage, Vec3::zeros());
        assert_eq!(ray.intensity, Color::WHITE);
        assert_eq!(ray.depth, 0);
        assert_eq!(ray.refractive_index, 1.33);
    }
}
