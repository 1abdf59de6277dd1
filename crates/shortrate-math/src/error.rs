//! Errors raised by the root finders and interpolators.

use thiserror::Error;

/// Result alias used throughout `shortrate-math`.
pub type MathResult<T> = Result<T, MathError>;

/// Failures of the numerical building blocks.
#[derive(Error, Debug, Clone)]
pub enum MathError {
    /// The iteration budget ran out before the tolerance was met.
    #[error("No convergence within {iterations} iterations, |f| = {residual:.2e}")]
    ConvergenceFailed {
        /// Iterations spent.
        iterations: u32,
        /// `|f(x)|` at the last iterate.
        residual: f64,
    },

    /// The end points do not straddle a root.
    #[error("f({a}) = {fa:.2e} and f({b}) = {fb:.2e} do not bracket a root")]
    InvalidBracket {
        /// Left end point.
        a: f64,
        /// Right end point.
        b: f64,
        /// `f(a)`.
        fa: f64,
        /// `f(b)`.
        fb: f64,
    },

    /// A query fell outside the knots of an interpolator without
    /// extrapolation.
    #[error("{x} lies outside the knots [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// Query abscissa.
        x: f64,
        /// First knot.
        min: f64,
        /// Last knot.
        max: f64,
    },

    /// Too few knots.
    #[error("Need at least {required} knots, got {actual}")]
    InsufficientData {
        /// Minimum number of knots.
        required: usize,
        /// Knots supplied.
        actual: usize,
    },

    /// Knots, values or solver settings are unusable.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },
}

impl MathError {
    /// Iteration budget exhausted with `residual = |f(x)|`.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Unusable input.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Fewer than `required` knots.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
