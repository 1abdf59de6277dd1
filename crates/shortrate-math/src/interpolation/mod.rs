//! Interpolation of curve data.
//!
//! Only log-linear interpolation is provided: discount curves are
//! interpolated on `ln P(t)`, which gives piecewise constant forward rates
//! and keeps every interpolated discount factor strictly positive.
//!
//! - [`LogLinearInterpolator`]: Linear in the logarithm of the values

mod log_linear;

pub use log_linear::LogLinearInterpolator;

use crate::error::MathResult;

/// Trait for one-dimensional interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
