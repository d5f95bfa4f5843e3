//! Ray-sphere intersection (quadratic equation).

use csgray_algebra::solve_real_quadratic;
use csgray_math::{Result, Vec3, EPSILON};

use super::check_dimension;
use crate::reorient::{Primitive, Shape, SurfaceHit};

/// A sphere centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    radius: f64,
}

impl Sphere {
    /// Sphere of the given radius.
    pub fn new(radius: f64) -> Result<Self> {
        Ok(Self {
            radius: check_dimension("sphere radius", radius)?,
        })
    }

    /// Convenience: the sphere wrapped as a placeable primitive.
    pub fn solid(radius: f64) -> Result<Primitive<Self>> {
        Ok(Primitive::new(Self::new(radius)?))
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Sphere {
    const TAG: &'static str = "Sphere";

    fn intersect(&self, vantage: &Vec3, direction: &Vec3, hits: &mut Vec<SurfaceHit>) {
        // |v + u*d|^2 = r^2
        let a = direction.dot(direction);
        let b = 2.0 * vantage.dot(direction);
        let c = vantage.dot(vantage) - self.radius * self.radius;

        for u in &solve_real_quadratic(a, b, c) {
            if *u <= EPSILON {
                continue;
            }
            let displacement = *u * direction;
            let point = vantage + displacement;
            hits.push(SurfaceHit {
                distance_squared: displacement.norm_squared(),
                point,
                normal: point / self.radius,
                tag: "sphere surface",
                context: None,
            });
        }
    }

    fn contains(&self, point: &Vec3) -> Option<bool> {
        Some(point.norm_squared() <= self.radius * self.radius + EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_sphere_hit() {
        let sphere = Sphere::new(1.0).unwrap();
        let mut hits = Vec::new();
        sphere.intersect(&Vec3::new(0.0, 0.0, -5.0), &Vec3::new(0.0, 0.0, 1.0), &mut hits);
        assert_eq!(hits.len(), 2);
        let mut distances: Vec<f64> = hits.iter().map(|h| h.distance_squared).collect();
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_abs_diff_eq!(distances[0], 16.0, epsilon = 1e-9);
        assert_abs_diff_eq!(distances[1], 36.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let sphere = Sphere::new(1.0).unwrap();
        let mut hits = Vec::new();
        sphere.intersect(&Vec3::new(0.0, 2.0, -5.0), &Vec3::new(0.0, 0.0, 1.0), &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_normals_point_outward() {
        let sphere = Sphere::new(2.0).unwrap();
        let mut hits = Vec::new();
        // Unnormalized direction: distances still measure true length.
        sphere.intersect(&Vec3::new(-10.0, 0.0, 0.0), &Vec3::new(4.0, 0.0, 0.0), &mut hits);
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert_abs_diff_eq!(hit.normal.norm(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(hit.normal.x, hit.point.x.signum(), epsilon = 1e-12);
        }
        let near = hits.iter().find(|h| h.point.x < 0.0).unwrap();
        assert_abs_diff_eq!(near.distance_squared, 64.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ray_from_inside() {
        let sphere = Sphere::new(3.0).unwrap();
        let mut hits = Vec::new();
        sphere.intersect(&Vec3::zeros(), &Vec3::new(0.0, 1.0, 0.0), &mut hits);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].point.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_containment() {
        let sphere = Sphere::new(2.0).unwrap();
        assert_eq!(sphere.contains(&Vec3::new(1.0, 1.0, 1.0)), Some(true));
        assert_eq!(sphere.contains(&Vec3::new(2.0, 0.0, 0.0)), Some(true));
        assert_eq!(sphere.contains(&Vec3::new(1.5, 1.5, 0.0)), Some(false));
    }
}
