//! Ray-torus intersection (quartic equation).

use csgray_algebra::solve_real_quartic;
use csgray_math::{Result, Vec3, EPSILON};

use super::check_dimension;
use crate::reorient::{Primitive, Shape, SurfaceHit};

/// A ring torus centered on the origin with its axis of symmetry along z.
///
/// The surface is `(x^2 + y^2 + z^2 + R^2 - r^2)^2 = 4 R^2 (x^2 + y^2)`,
/// where `R` is the distance from the axis to the center of the tube and
/// `r` the radius of the tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    major_radius: f64,
    minor_radius: f64,
}

impl Torus {
    /// Torus with the given major (ring) and minor (tube) radii.
    pub fn new(major_radius: f64, minor_radius: f64) -> Result<Self> {
        Ok(Self {
            major_radius: check_dimension("torus major radius", major_radius)?,
            minor_radius: check_dimension("torus minor radius", minor_radius)?,
        })
    }

    /// Convenience: the torus wrapped as a placeable primitive.
    pub fn solid(major_radius: f64, minor_radius: f64) -> Result<Primitive<Self>> {
        Ok(Primitive::new(Self::new(major_radius, minor_radius)?))
    }

    /// Distance from the axis to the center of the tube.
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    /// Radius of the tube.
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Outward unit normal: the normalized gradient of the implicit surface.
    fn normal_at(&self, point: &Vec3) -> Vec3 {
        let s = point.norm_squared() + self.major_radius * self.major_radius
            - self.minor_radius * self.minor_radius;
        let g = 4.0 * self.major_radius * self.major_radius;
        Vec3::new(
            4.0 * point.x * s - 2.0 * g * point.x,
            4.0 * point.y * s - 2.0 * g * point.y,
            4.0 * point.z * s,
        )
        .normalize()
    }
}

impl Shape for Torus {
    const TAG: &'static str = "Torus";

    fn intersect(&self, vantage: &Vec3, direction: &Vec3, hits: &mut Vec<SurfaceHit>) {
        let t = self.major_radius * self.major_radius - self.minor_radius * self.minor_radius;
        let g = 4.0 * self.major_radius * self.major_radius;

        let a = direction.dot(direction);
        let b = 2.0 * vantage.dot(direction);
        let c = vantage.dot(vantage) + t;

        // Projections onto the equatorial plane.
        let i = direction.x * direction.x + direction.y * direction.y;
        let j = 2.0 * (vantage.x * direction.x + vantage.y * direction.y);
        let k = vantage.x * vantage.x + vantage.y * vantage.y;

        let roots = solve_real_quartic(
            a * a,
            2.0 * a * b,
            b * b + 2.0 * a * c - g * i,
            2.0 * b * c - g * j,
            c * c - g * k,
        );

        for u in &roots {
            if *u <= EPSILON {
                continue;
            }
            let displacement = *u * direction;
            let point = vantage + displacement;
            hits.push(SurfaceHit {
                distance_squared: displacement.norm_squared(),
                point,
                normal: self.normal_at(&point),
                tag: "torus surface",
                context: None,
            });
        }
    }
}
