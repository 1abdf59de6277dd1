//! Log-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Piecewise linear interpolation of `ln y`.
///
/// Between knots `x_i` and `x_{i+1}`:
///
/// ```text
/// ln y(x) = ln y_i + s_i (x - x_i),    s_i = (ln y_{i+1} - ln y_i) / (x_{i+1} - x_i)
/// ```
///
/// When extrapolation is enabled the first and last segments are continued
/// beyond the data, so a discount curve keeps a flat forward rate on both
/// sides.
///
/// # Example
///
/// ```rust
/// use shortrate_math::interpolation::{Interpolator, LogLinearInterpolator};
///
/// let times = vec![0.0, 1.0, 2.0, 3.0];
/// let discount_factors = vec![1.0, 0.97, 0.94, 0.91];
///
/// let interp = LogLinearInterpolator::new(times, discount_factors)
///     .unwrap()
///     .with_extrapolation();
///
/// assert!(interp.interpolate(1.5).unwrap() > 0.0);
/// assert!(interp.interpolate(5.0).unwrap() < 0.91);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    log_ys: Vec<f64>,
    /// Slope of `ln y` on each segment.
    slopes: Vec<f64>,
    allow_extrapolation: bool,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - Knots, strictly increasing
    /// * `ys` - Values at the knots, strictly positive
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, the lengths
    /// differ, the knots are not strictly increasing, or a value is not
    /// positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        let log_ys = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                if y > 0.0 && y.is_finite() {
                    Ok(y.ln())
                } else {
                    Err(MathError::invalid_input(format!(
                        "y[{i}] = {y} must be positive and finite"
                    )))
                }
            })
            .collect::<MathResult<Vec<f64>>>()?;

        let slopes = xs
            .windows(2)
            .zip(log_ys.windows(2))
            .map(|(x, ly)| (ly[1] - ly[0]) / (x[1] - x[0]))
            .collect();

        Ok(Self {
            xs,
            log_ys,
            slopes,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation by continuing the edge segments.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the interpolated `ln y` at x.
    pub fn log_value(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let i = self.segment(x);
        Ok(self.log_ys[i] + self.slopes[i] * (x - self.xs[i]))
    }

    /// Returns the slope of `ln y` at x.
    ///
    /// At an interior knot the slope of the segment to the right is used.
    pub fn log_slope(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self.slopes[self.segment(x)])
    }

    /// Returns the knots.
    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.xs
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if self.allow_extrapolation || self.in_range(x) {
            Ok(())
        } else {
            Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            })
        }
    }

    /// Index of the segment containing x, clamped to the edge segments.
    fn segment(&self, x: f64) -> usize {
        let last = self.slopes.len() - 1;
        self.xs.partition_point(|&k| k <= x).saturating_sub(1).min(last)
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.log_value(x).map(f64::exp)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        let y = self.interpolate(x)?;
        Ok(y * self.slopes[self.segment(x)])
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
