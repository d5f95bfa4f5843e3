//! Scene: solids, lights and the render loop.

use rayon::prelude::*;

use csgray_math::{validate_refraction, Color, Vec3, REFRACTION_VACUUM};
use csgray_solid::{pick_closest_intersection, ClosestIntersection, IntersectionList, Solid};

use crate::buffer::ImageBuffer;
use crate::error::{RenderError, Result};
use crate::light::LightSource;
use crate::settings::RenderSettings;
use crate::trace::{Ray, TraceContext, Tracer};

/// Everything visible in a render: solids, point lights, the background
/// color and the refractive index of the space between solids.
///
/// The camera sits at the origin looking down the -z axis.
pub struct Scene {
    solids: Vec<Box<dyn Solid>>,
    lights: Vec<LightSource>,
    background: Color,
    ambient_refraction: f64,
    debug_points: Vec<(usize, usize)>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with a black background in a vacuum.
    pub fn new() -> Self {
        Self {
            solids: Vec::new(),
            lights: Vec::new(),
            background: Color::BLACK,
            ambient_refraction: REFRACTION_VACUUM,
            debug_points: Vec::new(),
        }
    }

    /// Take ownership of a solid; returns it for further placement.
    pub fn add_solid<S: Solid + 'static>(&mut self, solid: S) -> &mut dyn Solid {
        self.add_boxed_solid(Box::new(solid))
    }

    /// Take ownership of an already boxed solid.
    pub fn add_boxed_solid(&mut self, solid: Box<dyn Solid>) -> &mut dyn Solid {
        let index = self.solids.len();
        self.solids.push(solid);
        self.solids[index].as_mut()
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: LightSource) {
        self.lights.push(light);
    }

    /// Set the refractive index of the space between solids.
    pub fn set_ambient_refraction(&mut self, refraction: f64) -> csgray_math::Result<()> {
        self.ambient_refraction = validate_refraction(refraction)?;
        Ok(())
    }

    /// Set the color seen by rays that escape the scene.
    pub fn set_background(&mut self, color: Color) -> csgray_math::Result<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    /// Print a shading trace for the sample at column `i`, row `j` of the
    /// supersampled buffer. Only has an effect with the `debug-trace` feature.
    pub fn add_debug_point(&mut self, i: usize, j: usize) {
        self.debug_points.push((i, j));
    }

    /// Solids in insertion order.
    pub fn solids(&self) -> impl Iterator<Item = &dyn Solid> {
        self.solids.iter().map(|s| s.as_ref())
    }

    /// Light sources.
    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Refractive index of the space between solids.
    pub fn ambient_refraction(&self) -> f64 {
        self.ambient_refraction
    }

    fn is_debug_point(&self, i: usize, j: usize) -> bool {
        self.debug_points.contains(&(i, j))
    }

    /// Closest intersection of a ray with any solid, with its tie count.
    pub fn find_closest_intersection(
        &self,
        vantage: &Vec3,
        direction: &Vec3,
    ) -> Result<Option<ClosestIntersection<'_>>> {
        let mut list = IntersectionList::new();
        for solid in &self.solids {
            solid.append_all_intersections(vantage, direction, &mut list)?;
        }
        Ok(pick_closest_intersection(&list))
    }

    /// True when no solid's surface lies strictly between `from` and `to`.
    pub fn has_clear_line_of_sight(&self, from: &Vec3, to: &Vec3) -> Result<bool> {
        let direction = to - from;
        let gap = direction.norm_squared();
        for solid in &self.solids {
            if let Some(closest) = solid.find_closest_intersection(from, &direction)? {
                if closest.intersection.distance_squared < gap {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// The first solid, in insertion order, that contains `point`.
    pub fn primary_container(&self, point: &Vec3) -> Result<Option<&dyn Solid>> {
        for solid in &self.solids {
            if solid.contains(point)? {
                return Ok(Some(solid.as_ref()));
            }
        }
        Ok(None)
    }

    /// Color seen along `ray`, scaled by its intensity.
    pub fn trace_ray(&self, ray: &Ray, settings: &RenderSettings) -> Result<Color> {
        Tracer::new(self, settings).trace_ray(ray, TraceContext::default())
    }

    /// Render with default recursion limits.
    pub fn render(
        &self,
        pixels_wide: usize,
        pixels_high: usize,
        zoom: f64,
        anti_alias: usize,
    ) -> Result<ImageBuffer> {
        self.render_with(&RenderSettings::new(pixels_wide, pixels_high, zoom, anti_alias))
    }

    /// Trace every sample of a supersampled buffer.
    ///
    /// Rows are traced in parallel. A sample whose closest surface is
    /// ambiguous is flagged and later colored from its neighbors; any other
    /// error aborts the render.
    pub fn render_with(&self, settings: &RenderSettings) -> Result<ImageBuffer> {
        settings.validate()?;

        let mut buffer = ImageBuffer::new(
            settings.pixels_wide,
            settings.pixels_high,
            settings.anti_alias,
        );
        let samples_wide = buffer.samples_wide();
        let half_wide = samples_wide as f64 / 2.0;
        let half_high = buffer.samples_high() as f64 / 2.0;
        let large_zoom = settings.anti_alias as f64
            * settings.zoom
            * settings.pixels_wide.min(settings.pixels_high) as f64;

        let tracer = Tracer::new(self, settings);
        buffer
            .samples_mut()
            .par_chunks_mut(samples_wide)
            .enumerate()
            .try_for_each(|(j, row)| -> Result<()> {
                for (i, sample) in row.iter_mut().enumerate() {
                    let direction = Vec3::new(
                        (i as f64 - half_wide) / large_zoom,
                        (half_high - j as f64) / large_zoom,
                        -1.0,
                    );
                    let ray = Ray::primary(direction, self.ambient_refraction);
                    let ctx = TraceContext::new(self.is_debug_point(i, j));
                    match tracer.trace_ray(&ray, ctx) {
                        Ok(color) => sample.color = color,
                        Err(RenderError::AmbiguousIntersection { .. }) => {
                            sample.is_ambiguous = true;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(())
            })?;

        buffer.resolve_ambiguous_samples();
        Ok(buffer)
    }
}
