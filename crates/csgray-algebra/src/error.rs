//! Error types for solver self-validation.

use thiserror::Error;

use crate::Complex;

/// Internal-consistency failures detected by the [`crate::validate`] helpers.
///
/// Normal solving never produces these; they signal a solver bug.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A root list length outside `0..=MAX_ROOTS` was supplied.
    #[error("internal error: root count {0} is out of bounds")]
    RootCountOutOfBounds(usize),

    /// The solver reported a different number of roots than expected.
    #[error("expected {expected} roots, but found {found}")]
    WrongRootCount {
        /// Number of roots the polynomial was built with.
        expected: usize,
        /// Number of roots the solver reported.
        found: usize,
    },

    /// The found roots do not match the known roots one-to-one.
    #[error("solver produced incorrect value(s) for complex roots: known {known:?}, found {found:?}")]
    IncorrectRoots {
        /// Known correct roots.
        known: Vec<Complex>,
        /// Roots reported by the solver.
        found: Vec<Complex>,
    },

    /// A claimed root does not satisfy the polynomial.
    #[error("invalid polynomial: {root} is not a root (residual {residual})")]
    InvalidPolynomial {
        /// The claimed root.
        root: Complex,
        /// Value of the polynomial at `root`.
        residual: Complex,
    },
}

/// Result type for solver validation.
pub type Result<T> = std::result::Result<T, SolverError>;
