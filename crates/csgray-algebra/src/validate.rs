//! Self-test helpers for the polynomial solvers.
//!
//! Each `verify_known_*_roots` function builds the polynomial with the
//! given roots, confirms the roots actually satisfy it, solves it, and
//! checks that the found roots match the known ones one-to-one.

use crate::error::{Result, SolverError};
use crate::{
    is_zero, solve_cubic_equation, solve_quadratic_equation, solve_quartic_equation, Complex,
    MAX_ROOTS,
};

/// Check that `found` matches `known` as a multiset within tolerance.
///
/// Every known root must be paired with a distinct found root, so
/// `{1, 1}` does not match `{1, 2}`.
pub fn check_roots(known: &[Complex], found: &[Complex]) -> Result<()> {
    if known.len() > MAX_ROOTS {
        return Err(SolverError::RootCountOutOfBounds(known.len()));
    }
    if known.len() != found.len() {
        return Err(SolverError::WrongRootCount {
            expected: known.len(),
            found: found.len(),
        });
    }

    let mut used = [false; MAX_ROOTS];
    for k in known {
        let pair = (0..found.len()).find(|&f| !used[f] && is_zero(*k - found[f]));
        match pair {
            Some(f) => used[f] = true,
            None => {
                return Err(SolverError::IncorrectRoots {
                    known: known.to_vec(),
                    found: found.to_vec(),
                })
            }
        }
    }
    Ok(())
}

/// Check that `root` satisfies the polynomial whose coefficients are
/// listed lowest power first.
pub fn validate_polynomial(poly: &[Complex], root: Complex) -> Result<()> {
    let mut power = Complex::new(1.0, 0.0);
    let mut sum = Complex::new(0.0, 0.0);
    for coefficient in poly {
        sum += coefficient * power;
        power *= root;
    }
    if is_zero(sum) {
        Ok(())
    } else {
        Err(SolverError::InvalidPolynomial {
            root,
            residual: sum,
        })
    }
}

/// Solve `m (x - k)(x - l) = 0` and compare against `{k, l}`.
///
/// When `k` and `l` coincide the solver reports a single root, and a
/// single-root expectation is used.
pub fn verify_known_quadratic_roots(m: Complex, k: Complex, l: Complex) -> Result<()> {
    let a = m;
    let b = -m * (k + l);
    let c = m * k * l;
    let poly = [c, b, a];
    validate_polynomial(&poly, k)?;
    validate_polynomial(&poly, l)?;

    let found = solve_quadratic_equation(a, b, c);
    let expected = if is_zero(k - l) { 1 } else { 2 };
    if found.len() != expected {
        return Err(SolverError::WrongRootCount {
            expected,
            found: found.len(),
        });
    }
    check_roots(&[k, l][..expected], &found)
}

/// Solve `m (x - k)(x - l)(x - n) = 0` and compare against `{k, l, n}`.
pub fn verify_known_cubic_roots(m: Complex, k: Complex, l: Complex, n: Complex) -> Result<()> {
    let a = m;
    let b = -m * (k + l + n);
    let c = m * (k * l + n * k + n * l);
    let d = -m * k * l * n;
    let poly = [d, c, b, a];
    for root in [k, l, n] {
        validate_polynomial(&poly, root)?;
    }

    let found = solve_cubic_equation(a, b, c, d);
    check_roots(&[k, l, n], &found)
}

/// Solve `m (x - a)(x - b)(x - c)(x - d) = 0` and compare against `{a, b, c, d}`.
pub fn verify_known_quartic_roots(
    m: Complex,
    a: Complex,
    b: Complex,
    c: Complex,
    d: Complex,
) -> Result<()> {
    let c4 = m;
    let c3 = -m * (a + b + c + d);
    let c2 = m * (a * b + c * d + (a + b) * (c + d));
    let c1 = -m * (c * d * (a + b) + a * b * (c + d));
    let c0 = m * a * b * c * d;
    let poly = [c0, c1, c2, c3, c4];
    for root in [a, b, c, d] {
        validate_polynomial(&poly, root)?;
    }

    let found = solve_quartic_equation(c4, c3, c2, c1, c0);
    check_roots(&[a, b, c, d], &found)
}
