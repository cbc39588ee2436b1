//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{AllowedSolution, SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Combines the reliability of bisection with the speed of the secant method
/// and inverse quadratic interpolation. This is generally the best choice
/// when a derivative is not available.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Example
///
/// ```rust
/// use strata_math::solvers::{brent, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-9);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    brent_with_side(f, a, b, AllowedSolution::Any, config)
}

/// Brent's method reporting the requested side of the final bracket.
///
/// Convergence is declared once the bracket is narrower than
/// `config.tolerance` (plus a few ulps of the iterate), or when the
/// objective is exactly zero.
///
/// # Errors
///
/// Returns `MathError::InvalidBracket` if the endpoints do not straddle a
/// root, `MathError::InvalidInput` if the objective is not finite, and
/// `MathError::ConvergenceFailed` after `config.max_iterations` steps.
#[allow(clippy::many_single_char_names)]
pub fn brent_with_side<F>(
    f: F,
    a: f64,
    b: f64,
    side: AllowedSolution,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if !fa.is_finite() || !fb.is_finite() {
        return Err(MathError::invalid_input(format!(
            "objective is not finite at the bracket ends: f({a}) = {fa}, f({b}) = {fb}"
        )));
    }

    if fa == 0.0 {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    if fb == 0.0 {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        });
    }

    // Check that root is bracketed
    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // b is the best estimate, c the opposite end of the bracket and a the
    // previous iterate.
    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
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

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let xm = 0.5 * (c - b);

        if xm.abs() <= tol || fb == 0.0 {
            let (root, residual) = select_side(side, b, fb, c, fc);
            log::debug!(
                "brent converged to {root} after {iteration} iterations (residual {residual:.2e})"
            );
            return Ok(SolverResult {
                root,
                iterations: iteration,
                residual,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * xm * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                // Interpolation rejected, bisect
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(xm) };
        fb = f(b);

        if !fb.is_finite() {
            return Err(MathError::invalid_input(format!(
                "objective is not finite at {b}"
            )));
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fb.abs()))
}

/// Picks the end of the converged bracket `[b, c]` to report.
fn select_side(side: AllowedSolution, b: f64, fb: f64, c: f64, fc: f64) -> (f64, f64) {
    if fb == 0.0 {
        return (b, fb);
    }
    match side {
        AllowedSolution::Any => (b, fb),
        AllowedSolution::AboveSide => {
            if fb >= 0.0 {
                (b, fb)
            } else {
                (c, fc)
            }
        }
        AllowedSolution::BelowSide => {
            if fb <= 0.0 {
                (b, fb)
            } else {
                (c, fc)
            }
        }
    }
}
