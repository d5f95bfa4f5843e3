#![warn(missing_docs)]

//! Exact algebraic solvers for the csgray ray tracer.
//!
//! Solves linear systems of 3 equations in 3 unknowns, and quadratic, cubic
//! and quartic equations of one complex variable, all in closed form.
//! Curved-surface intersection routines use the real-coefficient wrappers,
//! which keep only the roots whose imaginary part vanishes.
//!
//! # Architecture
//!
//! - [`solve_linear_equations`] - Cramer-style elimination with pivot checks
//! - [`solve_quadratic_equation`], [`solve_cubic_equation`],
//!   [`solve_quartic_equation`] - complex closed-form solvers
//! - [`filter_real_numbers`] - complex roots to real ray distances
//! - [`validate`] - self-test helpers that check solvers against known roots
//!
//! Every "is this zero" decision goes through [`is_zero`] and the single
//! shared [`TOLERANCE`], so the solvers agree on degeneracy.

mod error;
mod linear;
mod polynomial;
pub mod validate;

pub use error::{Result, SolverError};
pub use linear::solve_linear_equations;
pub use polynomial::{
    complex_cube_root, filter_real_numbers, solve_cubic_equation, solve_quadratic_equation,
    solve_quartic_equation, solve_real_cubic, solve_real_quadratic, solve_real_quartic,
};

use std::ops::Deref;

/// Complex number type used by the polynomial solvers.
pub type Complex = nalgebra::Complex<f64>;

/// Magnitude below which a value is treated as zero by every solver.
pub const TOLERANCE: f64 = 1.0e-8;

/// Most roots any solver in this crate can produce.
pub const MAX_ROOTS: usize = 4;

/// True when both parts of `x` are within [`TOLERANCE`] of zero.
#[inline]
pub fn is_zero(x: Complex) -> bool {
    x.re.abs() < TOLERANCE && x.im.abs() < TOLERANCE
}

/// A fixed-capacity list of up to [`MAX_ROOTS`] roots.
///
/// Dereferences to a slice of the roots actually found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots<T> {
    values: [T; MAX_ROOTS],
    len: usize,
}

impl<T: Copy + Default> Roots<T> {
    /// An empty root list.
    pub fn new() -> Self {
        Self {
            values: [T::default(); MAX_ROOTS],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(self.len < MAX_ROOTS, "root list overflow");
        self.values[self.len] = value;
        self.len += 1;
    }
}

impl<T: Copy + Default> Default for Roots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> FromIterator<T> for Roots<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut roots = Self::new();
        for value in iter.into_iter().take(MAX_ROOTS) {
            roots.push(value);
        }
        roots
    }
}

impl<T> Deref for Roots<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        &self.values[..self.len]
    }
}

impl<'a, T> IntoIterator for &'a Roots<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.deref().iter()
    }
}
