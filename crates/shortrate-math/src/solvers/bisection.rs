//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Halves the bracket until either the residual or the half-width drops
/// below `config.tolerance`. Linear convergence, but it cannot fail once a
/// sign change is bracketed, which makes it the fallback when faster
/// methods stall.
///
/// Requires: `f(a) * f(b) <= 0`.
///
/// # Example
///
/// ```rust
/// use shortrate_math::solvers::{bisection, SolverConfig};
///
/// // Discount rate that makes a 2-year zero worth 90
/// let f = |r: f64| 100.0 * (-2.0 * r).exp() - 90.0;
///
/// let result = bisection(f, 0.0, 0.2, &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.052680).abs() < 1e-6);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    let mut mid = 0.5 * (lo + hi);
    let mut f_mid = f(mid);

    for iteration in 1..=config.max_iterations {
        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }

        mid = 0.5 * (lo + hi);
        f_mid = f(mid);
    }

    Err(MathError::convergence_failed(config.max_iterations, f_mid.abs()))
}
