//! Root-finding algorithms.
//!
//! Bracketing solvers used by the closed-form pricers:
//!
//! - [`brent`]: Inverse quadratic interpolation with bisection safeguard
//! - [`bisection`]: Slow but unconditionally convergent halving
//! - [`expand_bracket`]: Grows an interval until it brackets a sign change
//!
//! All solvers take a [`SolverConfig`] so that the iteration budget is fixed
//! up front; exhausting it is reported as [`MathError::ConvergenceFailed`]
//! rather than returning a best guess.
//!
//! # Example: critical rate of a coupon bond
//!
//! ```rust
//! use shortrate_math::solvers::{brent, expand_bracket, SolverConfig};
//!
//! // Price of a 3-year annual 5% bond as a function of a flat rate
//! let price = |r: f64| (1..=3).map(|t| 5.0 * (-r * t as f64).exp()).sum::<f64>()
//!     + 100.0 * (-r * 3.0).exp();
//! let f = |r: f64| price(r) - 98.0;
//!
//! let (lo, hi) = expand_bracket(f, 0.0, 0.01, 1.6, 50).unwrap();
//! let result = brent(f, lo, hi, &SolverConfig::default()).unwrap();
//! assert!(f(result.root).abs() < 1e-9);
//! ```

mod bisection;
mod brent;

pub use bisection::bisection;
pub use brent::brent;

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence (applied to both |f(x)| and the bracket width).
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Expands `[lo, hi]` geometrically until `f` changes sign across it.
///
/// Each expansion moves the endpoint whose function value is smaller in
/// magnitude further out by `factor` times the current width. Intended for
/// monotone functions such as a bond price against its discount rate.
///
/// # Errors
///
/// Returns [`MathError::InvalidBracket`] with the last interval tried if no
/// sign change is found within `max_expansions`, and
/// [`MathError::InvalidInput`] for a degenerate starting interval or factor.
pub fn expand_bracket<F>(
    f: F,
    lo: f64,
    hi: f64,
    factor: f64,
    max_expansions: u32,
) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if !(lo < hi) {
        return Err(MathError::invalid_input(format!(
            "bracket start [{lo}, {hi}] is empty"
        )));
    }
    if factor <= 0.0 {
        return Err(MathError::invalid_input("expansion factor must be positive"));
    }

    let (mut a, mut b) = (lo, hi);
    let (mut fa, mut fb) = (f(a), f(b));

    for _ in 0..max_expansions {
        if fa * fb <= 0.0 {
            return Ok((a, b));
        }
        let width = b - a;
        if fa.abs() < fb.abs() {
            a -= factor * width;
            fa = f(a);
        } else {
            b += factor * width;
            fb = f(b);
        }
        if !fa.is_finite() || !fb.is_finite() {
            break;
        }
    }

    if fa * fb <= 0.0 {
        return Ok((a, b));
    }
    log::debug!("bracket expansion stopped at [{a}, {b}] without a sign change");
    Err(MathError::InvalidBracket { a, b, fa, fb })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Continuously compounded price of an annual coupon bond.
    fn bond_price(rate: f64, coupon: f64, years: u32) -> f64 {
        let coupons: f64 = (1..=years)
            .map(|t| coupon * (-rate * f64::from(t)).exp())
            .sum();
        coupons + 100.0 * (-rate * f64::from(years)).exp()
    }

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_expand_bracket_upwards() {
        // Root near 9.3% lies well outside the starting interval
        let f = |r: f64| bond_price(r, 5.0, 10) - 75.0;

        let (lo, hi) = expand_bracket(f, 0.0, 0.01, 1.6, 50).unwrap();
        assert!(f(lo) * f(hi) <= 0.0);

        let result = brent(f, lo, hi, &SolverConfig::default()).unwrap();
        assert!(f(result.root).abs() < 1e-9);
    }

    #[test]
    fn test_expand_bracket_downwards() {
        // Premium bond: negative rate required
        let f = |r: f64| bond_price(r, 1.0, 5) - 110.0;

        let (lo, hi) = expand_bracket(f, 0.05, 0.10, 1.6, 50).unwrap();
        assert!(lo < 0.0);

        let result = bisection(f, lo, hi, &SolverConfig::default()).unwrap();
        assert!(result.root < 0.0);
    }

    #[test]
    fn test_expand_bracket_already_bracketed() {
        let f = |x: f64| x - 0.5;
        let (lo, hi) = expand_bracket(f, 0.0, 1.0, 2.0, 10).unwrap();
        assert_relative_eq!(lo, 0.0);
        assert_relative_eq!(hi, 1.0);
    }

    #[test]
    fn test_expand_bracket_no_root() {
        let f = |x: f64| x * x + 1.0;
        let result = expand_bracket(f, -1.0, 1.0, 1.6, 20);
        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_expand_bracket_rejects_empty_interval() {
        let f = |x: f64| x;
        assert!(expand_bracket(f, 1.0, 1.0, 1.6, 20).is_err());
        assert!(expand_bracket(f, 0.0, 1.0, 0.0, 20).is_err());
    }

    #[test]
    fn test_brent_and_bisection_agree() {
        let f = |r: f64| bond_price(r, 6.0, 7) - 98.0;
        let config = SolverConfig::default();

        let brent_result = brent(f, 0.0, 0.20, &config).unwrap();
        let bisection_result = bisection(f, 0.0, 0.20, &config).unwrap();

        assert_relative_eq!(brent_result.root, bisection_result.root, epsilon = 1e-8);
        assert!(brent_result.iterations <= bisection_result.iterations);
    }
}
