//! Linear systems of 3 equations in 3 unknowns.

use crate::TOLERANCE;

/// Solve the linear system for `(u, v, w)`:
///
/// ```text
/// D u + E v + F w + G = 0
/// H u + I v + J w + K = 0
/// L u + M v + N w + P = 0
/// ```
///
/// `rows` holds `[D, E, F, G]`, `[H, I, J, K]` and `[L, M, N, P]`.
///
/// Returns `None` instead of dividing whenever a pivot magnitude falls below
/// [`TOLERANCE`]; this includes every singular system, but also some
/// solvable systems whose elimination order happens to hit a zero pivot
/// (for example `F = 0`).
pub fn solve_linear_equations(rows: &[[f64; 4]; 3]) -> Option<[f64; 3]> {
    let [d, e, f, g] = rows[0];
    let [h, i, j, k] = rows[1];
    let [l, m, n, p] = rows[2];

    if f.abs() < TOLERANCE {
        return None;
    }

    let b = e * j - f * i;
    if b.abs() < TOLERANCE {
        return None;
    }

    let a = d * j - f * h;
    let dd = h * n - j * l;
    let ee = i * n - j * m;
    let denom = a * ee - b * dd;
    if denom.abs() < TOLERANCE {
        return None;
    }

    let c = g * j - f * k;
    let ff = k * n - j * p;

    let u = (b * ff - ee * c) / denom;
    let v = -(a * u + c) / b;
    let w = -(d * u + e * v + g) / f;
    Some([u, v, w])
}
