//! Closed-form polynomial root finding in the complex domain.
//!
//! Cubics use Cardano's depressed-cubic substitution; quartics use
//! Ferrari's reduction with a biquadratic fast path when the depressed
//! quartic has no linear term. Each solver degrades to the next-lower
//! degree when its leading coefficient is zero.

use std::f64::consts::TAU;

use crate::{is_zero, Complex, Roots, TOLERANCE};

/// Keep the roots whose imaginary part is zero, as real numbers.
///
/// Order is preserved; the length of the result is the number retained.
/// This is the only place complex roots become real distances.
pub fn filter_real_numbers(roots: &Roots<Complex>) -> Roots<f64> {
    roots
        .iter()
        .filter(|z| z.im.abs() < TOLERANCE)
        .map(|z| z.re)
        .collect()
}

/// Solve `a x^2 + b x + c = 0`.
///
/// Degrades to the linear solution `-c / b` when `a` is zero, and to no
/// roots when `b` is zero as well. A zero discriminant yields exactly one
/// (doubled) root.
pub fn solve_quadratic_equation(a: Complex, b: Complex, c: Complex) -> Roots<Complex> {
    let mut roots = Roots::new();
    if is_zero(a) {
        if !is_zero(b) {
            roots.push(-c / b);
        }
        return roots;
    }

    let radicand = b * b - 4.0 * a * c;
    if is_zero(radicand) {
        roots.push(-b / (2.0 * a));
    } else {
        let r = radicand.sqrt();
        let d = 2.0 * a;
        roots.push((-b + r) / d);
        roots.push((-b - r) / d);
    }
    roots
}

/// One of the three complex cube roots of `a`, selected by `branch` (0..=2).
///
/// Branch 0 is the principal root.
pub fn complex_cube_root(a: Complex, branch: u32) -> Complex {
    let rho = a.norm().powf(1.0 / 3.0);
    let theta = (TAU * f64::from(branch) + a.arg()) / 3.0;
    Complex::from_polar(rho, theta)
}

/// Solve `a x^3 + b x^2 + c x + d = 0`.
///
/// Always yields 3 roots (with multiplicity) unless `a` is zero, in which
/// case the quadratic solution is returned.
pub fn solve_cubic_equation(a: Complex, b: Complex, c: Complex, d: Complex) -> Roots<Complex> {
    if is_zero(a) {
        return solve_quadratic_equation(b, c, d);
    }

    let b = b / a;
    let c = c / a;
    let d = d / a;

    let s = b / 3.0;
    let dd = c / 3.0 - s * s;
    let e = s * s * s + (d - s * c) / 2.0;
    let f_root = (e * e + dd * dd * dd).sqrt();
    let mut f = -f_root - e;
    if is_zero(f) {
        f = f_root - e;
    }

    let mut roots = Roots::new();
    for branch in 0..3 {
        let g = complex_cube_root(f, branch);
        // g vanishes only for a triple root, where dd vanishes too.
        if is_zero(g) {
            roots.push(-s);
        } else {
            roots.push(g - dd / g - s);
        }
    }
    roots
}

/// Solve `a x^4 + b x^3 + c x^2 + d x + e = 0`.
///
/// Always yields 4 roots (with multiplicity) unless `a` is zero, in which
/// case the cubic solution is returned.
pub fn solve_quartic_equation(
    a: Complex,
    b: Complex,
    c: Complex,
    d: Complex,
    e: Complex,
) -> Roots<Complex> {
    if is_zero(a) {
        return solve_cubic_equation(b, c, d, e);
    }

    let b = b / a;
    let c = c / a;
    let d = d / a;
    let e = e / a;

    let b2 = b * b;
    let b3 = b * b2;
    let b4 = b2 * b2;

    // Depressed quartic y^4 + alpha y^2 + beta y + gamma = 0, with x = y - b/4.
    let alpha = (-3.0 / 8.0) * b2 + c;
    let beta = b3 / 8.0 - b * c / 2.0 + d;
    let gamma = (-3.0 / 256.0) * b4 + b2 * c / 16.0 - b * d / 4.0 + e;

    let alpha2 = alpha * alpha;
    let t = -b / 4.0;

    let mut roots = Roots::new();
    if is_zero(beta) {
        // Biquadratic: solve for y^2 first.
        let rad = (alpha2 - 4.0 * gamma).sqrt();
        let r1 = ((-alpha + rad) / 2.0).sqrt();
        let r2 = ((-alpha - rad) / 2.0).sqrt();

        roots.push(t + r1);
        roots.push(t - r1);
        roots.push(t + r2);
        roots.push(t - r2);
    } else {
        // Resolvent cubic, solved directly for one root y.
        let alpha3 = alpha * alpha2;
        let p = -(alpha2 / 12.0 + gamma);
        let q = -alpha3 / 108.0 + alpha * gamma / 3.0 - beta * beta / 8.0;
        let r = -q / 2.0 + (q * q / 4.0 + p * p * p / 27.0).sqrt();
        let u = complex_cube_root(r, 0);
        let mut y = (-5.0 / 6.0) * alpha + u;
        if is_zero(u) {
            y -= complex_cube_root(q, 0);
        } else {
            y -= p / (3.0 * u);
        }
        let w = (alpha + 2.0 * y).sqrt();

        let r1 = (-(3.0 * alpha + 2.0 * y + 2.0 * beta / w)).sqrt();
        let r2 = (-(3.0 * alpha + 2.0 * y - 2.0 * beta / w)).sqrt();

        roots.push(t + (w - r1) / 2.0);
        roots.push(t + (w + r1) / 2.0);
        roots.push(t + (-w - r2) / 2.0);
        roots.push(t + (-w + r2) / 2.0);
    }
    roots
}

/// Real roots of `a x^2 + b x + c = 0` with real coefficients.
pub fn solve_real_quadratic(a: f64, b: f64, c: f64) -> Roots<f64> {
    filter_real_numbers(&solve_quadratic_equation(a.into(), b.into(), c.into()))
}

/// Real roots of `a x^3 + b x^2 + c x + d = 0` with real coefficients.
pub fn solve_real_cubic(a: f64, b: f64, c: f64, d: f64) -> Roots<f64> {
    filter_real_numbers(&solve_cubic_equation(a.into(), b.into(), c.into(), d.into()))
}

/// Real roots of `a x^4 + b x^3 + c x^2 + d x + e = 0` with real coefficients.
pub fn solve_real_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Roots<f64> {
    filter_real_numbers(&solve_quartic_equation(
        a.into(),
        b.into(),
        c.into(),
        d.into(),
        e.into(),
    ))
}
