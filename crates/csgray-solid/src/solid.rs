//! The [`Solid`] trait shared by primitives and set combinators.

use csgray_math::{Axis, Color, Vec3, EPSILON};

use crate::error::{Result, SolidError};
use crate::intersection::{pick_closest_intersection, ClosestIntersection, IntersectionList};
use crate::optics::{Appearance, Optics};

/// A closed region of space that rays can intersect.
///
/// Every solid has a center used as its pivot for rotation, an appearance
/// (surface optics plus interior refractive index), and can enumerate every
/// place a ray crosses its surface.
pub trait Solid: Send + Sync {
    /// Diagnostic name of the solid.
    fn tag(&self) -> &str;

    /// Pivot point for rotation, in camera coordinates.
    fn center(&self) -> Vec3;

    /// Whether the solid's surface bounds a finite interior. Only fully
    /// enclosed solids may use parity-counting containment.
    fn is_fully_enclosed(&self) -> bool {
        true
    }

    /// Surface optics and refractive index.
    fn appearance(&self) -> &Appearance;

    /// Mutable surface optics and refractive index.
    fn appearance_mut(&mut self) -> &mut Appearance;

    /// Append every intersection of the ray `vantage + u * direction`
    /// (`u > EPSILON`) with this solid's surface to `list`.
    ///
    /// `direction` need not be a unit vector.
    fn append_all_intersections<'a>(
        &'a self,
        vantage: &Vec3,
        direction: &Vec3,
        list: &mut IntersectionList<'a>,
    ) -> Result<()>;

    /// Whether `point` lies inside the solid or on its surface.
    fn contains(&self, point: &Vec3) -> Result<bool> {
        contains_by_parity(self, point)
    }

    /// Optics at a point on the surface. `context` is the region index
    /// carried by the intersection.
    fn surface_optics(&self, _point: &Vec3, _context: Option<usize>) -> Optics {
        *self.appearance().optics()
    }

    /// Refractive index of the solid's interior.
    fn refractive_index(&self) -> f64 {
        self.appearance().refractive_index()
    }

    /// Rotate counterclockwise by `degrees` about `axis`, pivoting on the
    /// solid's own center.
    fn rotate(&mut self, axis: Axis, degrees: f64);

    /// Move by the given offset.
    fn translate(&mut self, dx: f64, dy: f64, dz: f64);

    /// Rotate about the X axis through the center.
    fn rotate_x(&mut self, degrees: f64) {
        self.rotate(Axis::X, degrees);
    }

    /// Rotate about the Y axis through the center.
    fn rotate_y(&mut self, degrees: f64) {
        self.rotate(Axis::Y, degrees);
    }

    /// Rotate about the Z axis through the center.
    fn rotate_z(&mut self, degrees: f64) {
        self.rotate(Axis::Z, degrees);
    }

    /// Translate so the center lands on `(x, y, z)`.
    fn move_to(&mut self, x: f64, y: f64, z: f64) {
        let center = self.center();
        self.translate(x - center.x, y - center.y, z - center.z);
    }

    /// Closest intersection of a ray with this solid alone.
    fn find_closest_intersection<'a>(
        &'a self,
        vantage: &Vec3,
        direction: &Vec3,
    ) -> Result<Option<ClosestIntersection<'a>>> {
        let mut list = IntersectionList::new();
        self.append_all_intersections(vantage, direction, &mut list)?;
        Ok(pick_closest_intersection(&list))
    }

    /// Replace the surface optics.
    fn set_uniform_optics(&mut self, optics: Optics) {
        self.appearance_mut().set_optics(optics);
    }

    /// Make the surface fully matte and opaque.
    fn set_full_matte(&mut self, color: Color) -> csgray_math::Result<()> {
        self.set_uniform_optics(Optics::matte(color)?);
        Ok(())
    }

    /// Split reflection between matte and gloss; see
    /// [`Optics::set_matte_gloss_balance`].
    fn set_matte_gloss_balance(
        &mut self,
        gloss_factor: f64,
        raw_matte: Color,
        raw_gloss: Color,
    ) -> csgray_math::Result<()> {
        self.appearance_mut()
            .optics_mut()
            .set_matte_gloss_balance(gloss_factor, raw_matte, raw_gloss)
    }

    /// Set the surface opacity.
    fn set_opacity(&mut self, opacity: f64) -> csgray_math::Result<()> {
        self.appearance_mut().optics_mut().set_opacity(opacity)
    }

    /// Set the interior refractive index.
    fn set_refraction(&mut self, refraction: f64) -> csgray_math::Result<()> {
        self.appearance_mut().set_refractive_index(refraction)
    }
}

/// Containment by counting surface crossings along a ray cast from `point`.
///
/// A point is inside when the ray exits the surface exactly once more than
/// it enters. Solids that are not fully enclosed contain nothing.
pub fn contains_by_parity<S: Solid + ?Sized>(solid: &S, point: &Vec3) -> Result<bool> {
    if !solid.is_fully_enclosed() {
        return Ok(false);
    }

    let direction = Vec3::new(0.0, 0.0, 1.0);
    let mut list = IntersectionList::new();
    solid.append_all_intersections(point, &direction, &mut list)?;

    let mut enters = 0i32;
    let mut exits = 0i32;
    for hit in &list {
        let alignment = direction.dot(&hit.surface_normal);
        if alignment > EPSILON {
            exits += 1;
        } else if alignment < -EPSILON {
            enters += 1;
        } else {
            return Err(SolidError::AmbiguousTransition { point: *point });
        }
    }

    match exits - enters {
        0 => Ok(false),
        1 => Ok(true),
        difference => Err(SolidError::ContainmentUndetermined {
            point: *point,
            difference,
        }),
    }
}
