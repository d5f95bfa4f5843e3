//! Ray/surface intersection records.

use std::fmt;

use csgray_math::{Vec3, EPSILON};

use crate::Solid;

/// A point where a ray crosses the surface of a solid.
///
/// Borrows the solid it belongs to, so a list of intersections cannot
/// outlive the scene that produced it.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Squared distance from the ray's vantage point to `point`.
    pub distance_squared: f64,
    /// Location of the intersection in camera coordinates.
    pub point: Vec3,
    /// Outward unit normal at `point`, in camera coordinates.
    pub surface_normal: Vec3,
    /// The primitive solid whose surface was hit.
    pub solid: &'a dyn Solid,
    /// Human-readable name of the surface region, for diagnostics.
    pub tag: &'static str,
    /// Solid-specific surface region index (e.g. a cuboid face).
    pub context: Option<usize>,
}

impl fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("distance_squared", &self.distance_squared)
            .field("point", &self.point)
            .field("surface_normal", &self.surface_normal)
            .field("solid", &self.solid.tag())
            .field("tag", &self.tag)
            .field("context", &self.context)
            .finish()
    }
}

/// Growable list of intersections collected along a single ray.
pub type IntersectionList<'a> = Vec<Intersection<'a>>;

/// The closest intersection along a ray, plus how many intersections tie
/// with it (including itself).
#[derive(Debug, Clone, Copy)]
pub struct ClosestIntersection<'a> {
    /// The first intersection found at the minimum distance.
    pub intersection: Intersection<'a>,
    /// Number of intersections whose squared distance lies within
    /// [`EPSILON`] of the minimum. Greater than 1 means the closest surface
    /// is ambiguous.
    pub ties: usize,
}

impl ClosestIntersection<'_> {
    /// True when more than one surface lies at the closest distance.
    pub fn is_ambiguous(&self) -> bool {
        self.ties > 1
    }
}

/// Pick the intersection nearest the vantage point, counting ties.
///
/// Returns `None` for an empty list.
pub fn pick_closest_intersection<'a>(list: &[Intersection<'a>]) -> Option<ClosestIntersection<'a>> {
    let mut closest = *list.first()?;
    for candidate in &list[1..] {
        if candidate.distance_squared < closest.distance_squared {
            closest = *candidate;
        }
    }
    let ties = list
        .iter()
        .filter(|i| (i.distance_squared - closest.distance_squared).abs() < EPSILON)
        .count();
    Some(ClosestIntersection {
        intersection: closest,
        ties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Sphere;
    use crate::Primitive;

    fn hit<'a>(solid: &'a dyn Solid, distance_squared: f64, tag: &'static str) -> Intersection<'a> {
        Intersection {
            distance_squared,
            point: Vec3::zeros(),
            surface_normal: Vec3::new(0.0, 0.0, 1.0),
            solid,
            tag,
            context: None,
        }
    }

    #[test]
    fn test_empty_list_has_no_closest() {
        assert!(pick_closest_intersection(&[]).is_none());
    }

    #[test]
    fn test_picks_minimum_distance() {
        let sphere: Primitive<Sphere> = Sphere::solid(1.0).unwrap();
        let list = [hit(&sphere, 9.0, "far"), hit(&sphere, 4.0, "near"), hit(&sphere, 16.0, "farther")];
        let closest = pick_closest_intersection(&list).unwrap();
        assert_eq!(closest.intersection.tag, "near");
        assert_eq!(closest.ties, 1);
        assert!(!closest.is_ambiguous());
    }

    #[test]
    fn test_counts_ties_within_epsilon() {
        let sphere = Sphere::solid(1.0).unwrap();
        let list = [
            hit(&sphere, 4.0, "first"),
            hit(&sphere, 4.0 + 1e-7, "second"),
            hit(&sphere, 4.1, "third"),
        ];
        let closest = pick_closest_intersection(&list).unwrap();
        assert_eq!(closest.intersection.tag, "first");
        assert_eq!(closest.ties, 2);
        assert!(closest.is_ambiguous());
    }

    #[test]
    fn test_debug_names_solid() {
        let sphere = Sphere::solid(1.0).unwrap();
        let text = format!("{:?}", hit(&sphere, 1.0, "probe"));
        assert!(text.contains("Sphere"));
        assert!(text.contains("probe"));
    }
}
