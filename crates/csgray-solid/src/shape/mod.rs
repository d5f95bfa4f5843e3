//! Primitive shapes in object coordinates.
//!
//! Each shape sits at the origin aligned with the axes and reports its own
//! ray crossings; [`crate::Primitive`] places it in the scene.

mod cuboid;
mod cylinder;
mod sphere;
mod torus;

pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use sphere::Sphere;
pub use torus::Torus;

use csgray_math::{Result, ValueError};

/// Reject dimensions that are not finite and strictly positive.
fn check_dimension(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValueError::Dimension { name, value })
    }
}
