//! Constructive solid geometry: union, intersection, complement and
//! difference of solids.
//!
//! Combinators own their operands as boxed trait objects and have a center
//! of their own. Rotating a binary combinator spins each operand about its
//! own center and swings that center about the combinator's center, so the
//! composite rotates as a rigid body.

use csgray_math::{rotate_about, Axis, Vec3};

use crate::error::Result;
use crate::intersection::IntersectionList;
use crate::optics::Appearance;
use crate::solid::Solid;

/// Two operands sharing a pivot.
struct Operands {
    center: Vec3,
    left: Box<dyn Solid>,
    right: Box<dyn Solid>,
}

impl Operands {
    fn rotate(&mut self, axis: Axis, degrees: f64) {
        let rotation = axis.rotation(degrees);
        for child in [&mut self.left, &mut self.right] {
            child.rotate(axis, degrees);
            let from = child.center();
            let to = rotate_about(&from, &self.center, &rotation);
            child.translate(to.x - from.x, to.y - from.y, to.z - from.z);
        }
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.center += Vec3::new(dx, dy, dz);
        self.left.translate(dx, dy, dz);
        self.right.translate(dx, dy, dz);
    }
}

/// Points inside either operand.
pub struct SetUnion {
    operands: Operands,
    appearance: Appearance,
}

impl SetUnion {
    /// Union of `left` and `right`, pivoting on `center`.
    pub fn new(center: Vec3, left: Box<dyn Solid>, right: Box<dyn Solid>) -> Self {
        Self {
            operands: Operands {
                center,
                left,
                right,
            },
            appearance: Appearance::default(),
        }
    }
}

impl Solid for SetUnion {
    fn tag(&self) -> &str {
        "SetUnion"
    }

    fn center(&self) -> Vec3 {
        self.operands.center
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    /// Every surface crossing of either operand, including those buried
    /// inside the other operand.
    fn append_all_intersections<'a>(
        &'a self,
        vantage: &Vec3,
        direction: &Vec3,
        list: &mut IntersectionList<'a>,
    ) -> Result<()> {
        self.operands
            .left
            .append_all_intersections(vantage, direction, list)?;
        self.operands
            .right
            .append_all_intersections(vantage, direction, list)
    }

    fn contains(&self, point: &Vec3) -> Result<bool> {
        Ok(self.operands.left.contains(point)? || self.operands.right.contains(point)?)
    }

    fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.operands.rotate(axis, degrees);
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.operands.translate(dx, dy, dz);
    }
}

/// Points inside both operands.
pub struct SetIntersection {
    tag: &'static str,
    operands: Operands,
    appearance: Appearance,
}

impl SetIntersection {
    /// Intersection of `left` and `right`, pivoting on `center`.
    pub fn new(center: Vec3, left: Box<dyn Solid>, right: Box<dyn Solid>) -> Self {
        Self::tagged("SetIntersection", center, left, right)
    }

    /// Points inside `left` but not inside `right`: the intersection of
    /// `left` with the complement of `right`.
    pub fn difference(center: Vec3, left: Box<dyn Solid>, right: Box<dyn Solid>) -> Self {
        let complement = SetComplement::new(right);
        Self::tagged("SetDifference", center, left, Box::new(complement))
    }

    fn tagged(
        tag: &'static str,
        center: Vec3,
        left: Box<dyn Solid>,
        right: Box<dyn Solid>,
    ) -> Self {
        Self {
            tag,
            operands: Operands {
                center,
                left,
                right,
            },
            appearance: Appearance::default(),
        }
    }
}

/// Append the crossings of `surface` that lie within `clip`.
fn append_clipped<'a>(
    surface: &'a dyn Solid,
    clip: &dyn Solid,
    vantage: &Vec3,
    direction: &Vec3,
    list: &mut IntersectionList<'a>,
) -> Result<()> {
    let mut candidates = IntersectionList::new();
    surface.append_all_intersections(vantage, direction, &mut candidates)?;
    for hit in candidates {
        if clip.contains(&hit.point)? {
            list.push(hit);
        }
    }
    Ok(())
}

impl Solid for SetIntersection {
    fn tag(&self) -> &str {
        self.tag
    }

    fn center(&self) -> Vec3 {
        self.operands.center
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    fn append_all_intersections<'a>(
        &'a self,
        vantage: &Vec3,
        direction: &Vec3,
        list: &mut IntersectionList<'a>,
    ) -> Result<()> {
        let left = self.operands.left.as_ref();
        let right = self.operands.right.as_ref();
        append_clipped(left, right, vantage, direction, list)?;
        append_clipped(right, left, vantage, direction, list)
    }

    fn contains(&self, point: &Vec3) -> Result<bool> {
        Ok(self.operands.left.contains(point)? && self.operands.right.contains(point)?)
    }

    fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.operands.rotate(axis, degrees);
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.operands.translate(dx, dy, dz);
    }
}

/// Points not inside the operand. Its surface is the operand's surface with
/// every normal reversed.
pub struct SetComplement {
    center: Vec3,
    solid: Box<dyn Solid>,
    appearance: Appearance,
}

impl SetComplement {
    /// Complement of `solid`, sharing its center.
    pub fn new(solid: Box<dyn Solid>) -> Self {
        Self {
            center: solid.center(),
            solid,
            appearance: Appearance::default(),
        }
    }
}

impl Solid for SetComplement {
    fn tag(&self) -> &str {
        "SetComplement"
    }

    fn center(&self) -> Vec3 {
        self.center
    }

    /// Unbounded, so parity counting never applies.
    fn is_fully_enclosed(&self) -> bool {
        false
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    fn append_all_intersections<'a>(
        &'a self,
        vantage: &Vec3,
        direction: &Vec3,
        list: &mut IntersectionList<'a>,
    ) -> Result<()> {
        let start = list.len();
        self.solid
            .append_all_intersections(vantage, direction, list)?;
        for hit in &mut list[start..] {
            hit.surface_normal = -hit.surface_normal;
        }
        Ok(())
    }

    fn contains(&self, point: &Vec3) -> Result<bool> {
        Ok(!self.solid.contains(point)?)
    }

    fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.solid.rotate(axis, degrees);
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.center += Vec3::new(dx, dy, dz);
        self.solid.translate(dx, dy, dz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Cuboid, Sphere};
    use crate::SolidError;
    use approx::assert_abs_diff_eq;

    fn down() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    fn unit_cube_at(x: f64, y: f64, z: f64) -> Box<dyn Solid> {
        let mut cube = Cuboid::solid(1.0, 1.0, 1.0).unwrap();
        cube.move_to(x, y, z);
        Box::new(cube)
    }

    fn sphere_at(radius: f64, x: f64, y: f64, z: f64) -> Box<dyn Solid> {
        let mut sphere = Sphere::solid(radius).unwrap();
        sphere.move_to(x, y, z);
        Box::new(sphere)
    }

    /// Two unit cubes overlapping in the slab 0..1 along x.
    fn overlapping_pair() -> (Box<dyn Solid>, Box<dyn Solid>) {
        (unit_cube_at(-0.5, 0.0, 0.0), unit_cube_at(0.5, 0.0, 0.0))
    }

    #[test]
    fn test_union_contains_either() {
        let (a, b) = overlapping_pair();
        let union = SetUnion::new(Vec3::zeros(), a, b);
        assert!(union.contains(&Vec3::new(-1.4, 0.0, 0.0)).unwrap());
        assert!(union.contains(&Vec3::new(1.4, 0.0, 0.0)).unwrap());
        assert!(!union.contains(&Vec3::new(1.6, 0.0, 0.0)).unwrap());
    }

    #[test]
    fn test_union_keeps_all_child_crossings() {
        let (a, b) = overlapping_pair();
        let union = SetUnion::new(Vec3::zeros(), a, b);
        let mut list = IntersectionList::new();
        union
            .append_all_intersections(&Vec3::new(-5.0, 0.0, 0.0), &Vec3::new(1.0, 0.0, 0.0), &mut list)
            .unwrap();
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_intersection_keeps_only_shared_surface() {
        let (a, b) = overlapping_pair();
        let both = SetIntersection::new(Vec3::zeros(), a, b);
        assert!(both.contains(&Vec3::new(0.0, 0.0, 0.0)).unwrap());
        assert!(!both.contains(&Vec3::new(-1.2, 0.0, 0.0)).unwrap());

        let mut list = IntersectionList::new();
        both.append_all_intersections(&Vec3::new(-5.0, 0.0, 0.0), &Vec3::new(1.0, 0.0, 0.0), &mut list)
            .unwrap();
        // Right cube's left face at x=-0.5, left cube's right face at x=0.5.
        assert_eq!(list.len(), 2);
        let mut xs: Vec<f64> = list.iter().map(|i| i.point.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_abs_diff_eq!(xs[0], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(xs[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_complement_negates() {
        let complement = SetComplement::new(sphere_at(1.0, 0.0, 0.0, 0.0));
        assert!(!complement.contains(&Vec3::zeros()).unwrap());
        assert!(complement.contains(&Vec3::new(2.0, 0.0, 0.0)).unwrap());

        let mut list = IntersectionList::new();
        complement
            .append_all_intersections(&Vec3::new(0.0, 0.0, 5.0), &down(), &mut list)
            .unwrap();
        let top = list.iter().find(|i| i.point.z > 0.0).unwrap();
        assert_abs_diff_eq!(top.surface_normal.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_difference_carves_hole() {
        // Unit cube minus a sphere of radius 0.5 at its top face center.
        let diff = SetIntersection::difference(
            Vec3::zeros(),
            unit_cube_at(0.0, 0.0, 0.0),
            sphere_at(0.5, 0.0, 0.0, 1.0),
        );
        assert_eq!(diff.tag(), "SetDifference");
        assert!(!diff.contains(&Vec3::new(0.0, 0.0, 0.9)).unwrap());
        assert!(diff.contains(&Vec3::new(0.0, 0.0, 0.0)).unwrap());

        // Looking straight down, the first surface is the bottom of the dimple.
        let closest = diff
            .find_closest_intersection(&Vec3::new(0.0, 0.0, 5.0), &down())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(closest.intersection.point.z, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(closest.intersection.surface_normal.z, 1.0, epsilon = 1e-9);
        assert_eq!(closest.ties, 1);

        // Off to the side, the original top face is still there.
        let closest = diff
            .find_closest_intersection(&Vec3::new(0.8, 0.8, 5.0), &down())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(closest.intersection.point.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_swings_children_about_center() {
        let mut union = SetUnion::new(
            Vec3::zeros(),
            unit_cube_at(3.0, 0.0, 0.0),
            unit_cube_at(-3.0, 0.0, 0.0),
        );
        union.rotate_z(90.0);
        assert!(union.contains(&Vec3::new(0.0, 3.0, 0.0)).unwrap());
        assert!(union.contains(&Vec3::new(0.0, -3.0, 0.0)).unwrap());
        assert!(!union.contains(&Vec3::new(3.0, 0.0, 0.0)).unwrap());
        assert_eq!(union.center(), Vec3::zeros());
    }

    #[test]
    fn test_translate_moves_center_and_children() {
        let (a, b) = overlapping_pair();
        let mut both = SetIntersection::new(Vec3::zeros(), a, b);
        both.move_to(10.0, 0.0, 0.0);
        assert_eq!(both.center(), Vec3::new(10.0, 0.0, 0.0));
        assert!(both.contains(&Vec3::new(10.0, 0.0, 0.0)).unwrap());
        assert!(!both.contains(&Vec3::zeros()).unwrap());
    }

    #[test]
    fn test_rotated_difference_is_rigid() {
        let mut diff = SetIntersection::difference(
            Vec3::zeros(),
            unit_cube_at(0.0, 0.0, 0.0),
            sphere_at(0.5, 0.0, 0.0, 1.0),
        );
        // The dimple moves from the top face to the -y face.
        diff.rotate_x(90.0);
        assert!(!diff.contains(&Vec3::new(0.0, -0.9, 0.0)).unwrap());
        assert!(diff.contains(&Vec3::new(0.0, 0.9, 0.0)).unwrap());
    }

    #[test]
    fn test_tangent_containment_ray_is_ambiguous() {
        let sphere = Sphere::solid(1.0).unwrap();
        // The +z ray from here grazes the sphere at (1, 0, 0).
        let result = crate::solid::contains_by_parity(&sphere, &Vec3::new(1.0, 0.0, -5.0));
        assert!(matches!(
            result,
            Err(SolidError::AmbiguousTransition { .. })
        ));
    }
}
