#![warn(missing_docs)]

//! Math types for the csgray ray tracer.
//!
//! Thin wrappers around nalgebra providing the vector, rotation and
//! tolerance vocabulary shared by every solid and by the renderer, plus the
//! RGB [`Color`] value type used for light intensities and surface optics.

mod color;
mod error;

pub use color::Color;
pub use error::{Result, ValueError};

use nalgebra::{Matrix3, Vector3};

/// A point or direction in 3D space.
pub type Vec3 = Vector3<f64>;

/// A 3x3 rotation matrix.
pub type Mat3 = Matrix3<f64>;

/// Tolerance for geometric comparisons (ray parameters, containment slack,
/// normal/ray alignment).
pub const EPSILON: f64 = 1.0e-6;

/// Refractive index of a vacuum; the default ambient medium.
pub const REFRACTION_VACUUM: f64 = 1.0;

/// Refractive index of ordinary glass; the default for every solid.
pub const REFRACTION_GLASS: f64 = 1.55;

/// Smallest refractive index accepted by [`validate_refraction`].
pub const REFRACTION_MINIMUM: f64 = 1.0;

/// Largest refractive index accepted by [`validate_refraction`].
pub const REFRACTION_MAXIMUM: f64 = 9.0;

/// Convert an angle in degrees to radians.
#[inline]
pub fn radians_from_degrees(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Check that a refractive index lies in the plausible physical range.
pub fn validate_refraction(refraction: f64) -> Result<f64> {
    if (REFRACTION_MINIMUM..=REFRACTION_MAXIMUM).contains(&refraction) {
        Ok(refraction)
    } else {
        Err(ValueError::RefractiveIndex(refraction))
    }
}

/// Counterclockwise rotation about the X axis by `degrees`, looking into the axis.
pub fn rotation_x(degrees: f64) -> Mat3 {
    let (s, c) = radians_from_degrees(degrees).sin_cos();
    let mut m = Mat3::identity();
    m[(1, 1)] = c;
    m[(1, 2)] = -s;
    m[(2, 1)] = s;
    m[(2, 2)] = c;
    m
}

/// Counterclockwise rotation about the Y axis by `degrees`, looking into the axis.
pub fn rotation_y(degrees: f64) -> Mat3 {
    let (s, c) = radians_from_degrees(degrees).sin_cos();
    let mut m = Mat3::identity();
    m[(0, 0)] = c;
    m[(0, 2)] = s;
    m[(2, 0)] = -s;
    m[(2, 2)] = c;
    m
}

/// Counterclockwise rotation about the Z axis by `degrees`, looking into the axis.
pub fn rotation_z(degrees: f64) -> Mat3 {
    let (s, c) = radians_from_degrees(degrees).sin_cos();
    let mut m = Mat3::identity();
    m[(0, 0)] = c;
    m[(0, 1)] = -s;
    m[(1, 0)] = s;
    m[(1, 1)] = c;
    m
}

/// A coordinate axis, used to select a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Counterclockwise rotation about this axis by `degrees`.
    pub fn rotation(self, degrees: f64) -> Mat3 {
        match self {
            Axis::X => rotation_x(degrees),
            Axis::Y => rotation_y(degrees),
            Axis::Z => rotation_z(degrees),
        }
    }
}

/// Rotate `point` about `pivot` with the rotation matrix `rotation`.
#[inline]
pub fn rotate_about(point: &Vec3, pivot: &Vec3, rotation: &Mat3) -> Vec3 {
    pivot + rotation * (point - pivot)
}
