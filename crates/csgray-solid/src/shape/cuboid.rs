//! Axis-aligned box.

use csgray_math::{Result, Vec3, EPSILON};

use super::check_dimension;
use crate::reorient::{Primitive, Shape, SurfaceHit};

/// Faces in context-index order: (axis, outward sign, tag).
const FACES: [(usize, f64, &str); 6] = [
    (0, 1.0, "right face"),
    (0, -1.0, "left face"),
    (1, 1.0, "front face"),
    (1, -1.0, "back face"),
    (2, 1.0, "top face"),
    (2, -1.0, "bottom face"),
];

/// A rectangular box centered on the origin, spanning `-a..a` in x,
/// `-b..b` in y and `-c..c` in z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    half: [f64; 3],
}

impl Cuboid {
    /// Box with the given half-widths along x, y and z.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        Ok(Self {
            half: [
                check_dimension("cuboid half-width a", a)?,
                check_dimension("cuboid half-width b", b)?,
                check_dimension("cuboid half-width c", c)?,
            ],
        })
    }

    /// Convenience: the box wrapped as a placeable primitive.
    pub fn solid(a: f64, b: f64, c: f64) -> Result<Primitive<Self>> {
        Ok(Primitive::new(Self::new(a, b, c)?))
    }

    /// Half-widths along x, y and z.
    pub fn half_widths(&self) -> [f64; 3] {
        self.half
    }

    fn encloses(&self, point: &Vec3) -> bool {
        (0..3).all(|axis| point[axis].abs() <= self.half[axis] + EPSILON)
    }
}

impl Shape for Cuboid {
    const TAG: &'static str = "Cuboid";

    fn intersect(&self, vantage: &Vec3, direction: &Vec3, hits: &mut Vec<SurfaceHit>) {
        for (index, &(axis, sign, tag)) in FACES.iter().enumerate() {
            // A ray parallel to this pair of faces cannot cross either.
            if direction[axis].abs() <= EPSILON {
                continue;
            }
            let u = (sign * self.half[axis] - vantage[axis]) / direction[axis];
            if u <= EPSILON {
                continue;
            }
            let displacement = u * direction;
            let point = vantage + displacement;
            if !self.encloses(&point) {
                continue;
            }
            let mut normal = Vec3::zeros();
            normal[axis] = sign;
            hits.push(SurfaceHit {
                distance_squared: displacement.norm_squared(),
                point,
                normal,
                tag,
                context: Some(index),
            });
        }
    }

    fn contains(&self, point: &Vec3) -> Option<bool> {
        Some(self.encloses(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solid;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_along_axis_hits_two_faces() {
        let cube = Cuboid::new(1.0, 1.0, 1.0).unwrap();
        let mut hits = Vec::new();
        cube.intersect(&Vec3::new(0.0, 0.0, 10.0), &Vec3::new(0.0, 0.0, -1.0), &mut hits);
        assert_eq!(hits.len(), 2);
        let top = hits.iter().find(|h| h.tag == "top face").unwrap();
        assert_abs_diff_eq!(top.distance_squared, 81.0, epsilon = 1e-12);
        assert_eq!(top.normal, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(top.context, Some(4));
        let bottom = hits.iter().find(|h| h.tag == "bottom face").unwrap();
        assert_abs_diff_eq!(bottom.distance_squared, 121.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let cube = Cuboid::new(1.0, 2.0, 3.0).unwrap();
        let mut hits = Vec::new();
        cube.intersect(&Vec3::new(0.0, 0.0, 10.0), &Vec3::new(0.0, 0.0, 1.0), &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_ray_from_inside_exits_once() {
        let cube = Cuboid::new(1.0, 2.0, 3.0).unwrap();
        let mut hits = Vec::new();
        cube.intersect(&Vec3::zeros(), &Vec3::new(0.0, 1.0, 0.0), &mut hits);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tag, "front face");
        assert_abs_diff_eq!(hits[0].distance_squared, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_containment_with_slack() {
        let cube = Cuboid::new(1.0, 2.0, 3.0).unwrap();
        assert_eq!(Shape::contains(&cube, &Vec3::new(1.0, 2.0, 3.0)), Some(true));
        assert_eq!(Shape::contains(&cube, &Vec3::new(0.0, 2.0 + 1e-7, 0.0)), Some(true));
        assert_eq!(Shape::contains(&cube, &Vec3::new(0.0, 0.0, 3.01)), Some(false));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Cuboid::new(0.0, 1.0, 1.0).is_err());
        assert!(Cuboid::new(1.0, -2.0, 1.0).is_err());
        assert!(Cuboid::new(1.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rotated_cuboid_reports_camera_normals() {
        let mut solid = Cuboid::solid(1.0, 1.0, 1.0).unwrap();
        solid.rotate_y(-90.0);
        solid.move_to(0.0, 0.0, -10.0);
        let closest = solid
            .find_closest_intersection(&Vec3::zeros(), &Vec3::new(0.0, 0.0, -1.0))
            .unwrap()
            .unwrap();
        // Object +x now faces the camera (+z).
        assert_eq!(closest.intersection.tag, "right face");
        assert_abs_diff_eq!(closest.intersection.surface_normal.z, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(closest.intersection.point.z, -9.0, epsilon = 1e-12);
        assert_eq!(closest.ties, 1);
    }
}
