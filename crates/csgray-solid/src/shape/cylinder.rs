//! Ray-cylinder intersection: a quadratic for the tube plus two end discs.

use csgray_algebra::solve_real_quadratic;
use csgray_math::{Result, Vec3, EPSILON};

use super::check_dimension;
use crate::reorient::{Primitive, Shape, SurfaceHit};

/// Region indices carried in [`SurfaceHit::context`].
const SIDE: usize = 0;
const TOP: usize = 1;
const BOTTOM: usize = 2;

/// A closed circular cylinder centered on the origin with its axis along z,
/// spanning `-half_height..half_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    radius: f64,
    half_height: f64,
}

impl Cylinder {
    /// Cylinder of the given radius and half-height.
    pub fn new(radius: f64, half_height: f64) -> Result<Self> {
        Ok(Self {
            radius: check_dimension("cylinder radius", radius)?,
            half_height: check_dimension("cylinder half-height", half_height)?,
        })
    }

    /// Convenience: the cylinder wrapped as a placeable primitive.
    pub fn solid(radius: f64, half_height: f64) -> Result<Primitive<Self>> {
        Ok(Primitive::new(Self::new(radius, half_height)?))
    }

    /// Radius of the tube.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Half the length along z.
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    fn intersect_tube(&self, vantage: &Vec3, direction: &Vec3, hits: &mut Vec<SurfaceHit>) {
        let a = direction.x * direction.x + direction.y * direction.y;
        if a <= EPSILON {
            // Parallel to the axis: only the discs can be hit.
            return;
        }
        let b = 2.0 * (vantage.x * direction.x + vantage.y * direction.y);
        let c = vantage.x * vantage.x + vantage.y * vantage.y - self.radius * self.radius;

        for u in &solve_real_quadratic(a, b, c) {
            if *u <= EPSILON {
                continue;
            }
            let displacement = *u * direction;
            let point = vantage + displacement;
            if point.z.abs() > self.half_height + EPSILON {
                continue;
            }
            hits.push(SurfaceHit {
                distance_squared: displacement.norm_squared(),
                point,
                normal: Vec3::new(point.x / self.radius, point.y / self.radius, 0.0),
                tag: "cylinder side",
                context: Some(SIDE),
            });
        }
    }

    fn intersect_discs(&self, vantage: &Vec3, direction: &Vec3, hits: &mut Vec<SurfaceHit>) {
        if direction.z.abs() <= EPSILON {
            return;
        }
        for (sign, tag, context) in [(1.0, "cylinder top", TOP), (-1.0, "cylinder bottom", BOTTOM)] {
            let u = (sign * self.half_height - vantage.z) / direction.z;
            if u <= EPSILON {
                continue;
            }
            let displacement = u * direction;
            let point = vantage + displacement;
            if point.x * point.x + point.y * point.y > self.radius * self.radius + EPSILON {
                continue;
            }
            hits.push(SurfaceHit {
                distance_squared: displacement.norm_squared(),
                point,
                normal: Vec3::new(0.0, 0.0, sign),
                tag,
                context: Some(context),
            });
        }
    }
}

impl Shape for Cylinder {
    const TAG: &'static str = "Cylinder";

    fn intersect(&self, vantage: &Vec3, direction: &Vec3, hits: &mut Vec<SurfaceHit>) {
        self.intersect_tube(vantage, direction, hits);
        self.intersect_discs(vantage, direction, hits);
    }

    fn contains(&self, point: &Vec3) -> Option<bool> {
        let radial = point.x * point.x + point.y * point.y;
        Some(
            radial <= self.radius * self.radius + EPSILON
                && point.z.abs() <= self.half_height + EPSILON,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_through_side() {
        let cyl = Cylinder::new(1.0, 2.0).unwrap();
        let mut hits = Vec::new();
        cyl.intersect(&Vec3::new(-5.0, 0.0, 0.5), &Vec3::new(1.0, 0.0, 0.0), &mut hits);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.context == Some(SIDE)));
        let near = hits.iter().find(|h| h.point.x < 0.0).unwrap();
        assert_abs_diff_eq!(near.distance_squared, 16.0, epsilon = 1e-9);
        assert_abs_diff_eq!(near.normal.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_along_axis_hits_caps() {
        let cyl = Cylinder::new(1.0, 2.0).unwrap();
        let mut hits = Vec::new();
        cyl.intersect(&Vec3::new(0.0, 0.0, 10.0), &Vec3::new(0.0, 0.0, -1.0), &mut hits);
        assert_eq!(hits.len(), 2);
        let top = hits.iter().find(|h| h.context == Some(TOP)).unwrap();
        assert_abs_diff_eq!(top.distance_squared, 64.0, epsilon = 1e-12);
        assert_eq!(top.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ray_above_misses() {
        let cyl = Cylinder::new(1.0, 2.0).unwrap();
        let mut hits = Vec::new();
        cyl.intersect(&Vec3::new(-5.0, 0.0, 3.0), &Vec3::new(1.0, 0.0, 0.0), &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_diagonal_ray_enters_side_exits_cap() {
        let cyl = Cylinder::new(1.0, 1.0).unwrap();
        let mut hits = Vec::new();
        cyl.intersect(&Vec3::new(-2.0, 0.0, -0.5), &Vec3::new(1.0, 0.0, 1.0), &mut hits);
        // Enters the side at x=-1, z=0.5; exits the top at x=-0.5, z=1.
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|h| h.context == Some(SIDE)));
        let top = hits.iter().find(|h| h.context == Some(TOP)).unwrap();
        assert_abs_diff_eq!(top.point.x, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_containment() {
        let cyl = Cylinder::new(1.0, 2.0).unwrap();
        assert_eq!(cyl.contains(&Vec3::new(0.5, 0.5, 1.9)), Some(true));
        assert_eq!(cyl.contains(&Vec3::new(0.0, 0.0, 2.1)), Some(false));
        assert_eq!(cyl.contains(&Vec3::new(0.8, 0.8, 0.0)), Some(false));
    }
}
