//! 1D root-finding solvers.

use mjd_core::{
    ensure, ensure_finite,
    errors::{Error, Result},
    fail, Real,
};

const MAX_ITERATIONS: u32 = 100;
const DEFAULT_ACCURACY: Real = 1.0e-11;

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation. The
/// bracket must straddle a sign change, otherwise
/// [`Error::RootNotBracketed`] is returned with `target = 0`; callers that
/// solve `g(x) = target` rewrap it with their own target. A non-positive
/// `accuracy` selects the default of `1e-11`.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    ensure!(
        x_min.is_finite() && x_max.is_finite() && x_min < x_max,
        "Brent: invalid bracket [{x_min}, {x_max}]"
    );
    let acc = if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    };
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a);
    let mut fb = f(b);
    ensure_finite!(fa, "Brent: f({a})");
    ensure_finite!(fb, "Brent: f({b})");

    if fa * fb > 0.0 {
        return Err(Error::RootNotBracketed {
            target: 0.0,
            lower: x_min,
            upper: x_max,
        });
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                let p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                let q = (q - 1.0) * (r - 1.0) * (s - 1.0);
                (p, q)
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b);
        ensure_finite!(fb, "Brent: f({b})");
    }
    fail!("Brent solver: maximum iterations ({MAX_ITERATIONS}) reached")
}
