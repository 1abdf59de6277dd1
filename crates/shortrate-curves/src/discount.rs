//! Discount factor curve.

use shortrate_math::interpolation::{Interpolator, LogLinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::validation::{validate_pillars, validate_times};

/// Bump used for the finite-difference instantaneous forward.
pub const FORWARD_BUMP: f64 = 1e-4;

/// A zero-coupon discount curve over year fractions.
///
/// Pillars are validated on construction and interpolated log-linearly in
/// the discount factor, i.e. with a flat instantaneous forward between
/// pillars. Queries outside the pillar range continue the first or last
/// segment.
///
/// # Example
///
/// ```rust
/// use shortrate_curves::DiscountCurve;
///
/// let curve = DiscountCurve::from_zero_rates(
///     vec![0.0, 1.0, 2.0, 5.0],
///     vec![0.03, 0.035, 0.04, 0.045],
/// )
/// .unwrap();
///
/// let df = curve.discount_factor(1.5).unwrap();
/// assert!(df < 1.0 && df > 0.9);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    times: Vec<f64>,
    discount_factors: Vec<f64>,
    interpolator: LogLinearInterpolator,
}

impl DiscountCurve {
    /// Creates a curve from `(time, discount factor)` pillars.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if there are fewer than two pillars, the
    /// arrays differ in length, times are not strictly increasing from at or
    /// before zero, or discount factors are non-positive or increasing.
    pub fn new(times: Vec<f64>, discount_factors: Vec<f64>) -> CurveResult<Self> {
        validate_pillars(&times, &discount_factors)?;

        let interpolator =
            LogLinearInterpolator::new(times.clone(), discount_factors.clone())?
                .with_extrapolation();

        Ok(Self {
            times,
            discount_factors,
            interpolator,
        })
    }

    /// Creates a curve from continuously compounded zero rates.
    ///
    /// Each pillar's discount factor is `exp(-z * t)`.
    ///
    /// # Errors
    ///
    /// As for [`DiscountCurve::new`], plus [`CurveError::NonFinite`] for a
    /// non-finite rate.
    pub fn from_zero_rates(times: Vec<f64>, zero_rates: Vec<f64>) -> CurveResult<Self> {
        validate_times(&times, zero_rates.len())?;
        if let Some(index) = zero_rates.iter().position(|z| !z.is_finite()) {
            return Err(CurveError::NonFinite {
                field: "zero rate",
                index,
            });
        }

        let dfs = times
            .iter()
            .zip(&zero_rates)
            .map(|(t, z)| (-z * t).exp())
            .collect();
        Self::new(times, dfs)
    }

    /// Returns the discount factor `P(0, t)`.
    pub fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        Ok(self.log_discount(t)?.exp())
    }

    /// Returns the discount factors at each of `ts`.
    pub fn discount_factors_at(&self, ts: &[f64]) -> CurveResult<Vec<f64>> {
        ts.iter().map(|&t| self.discount_factor(t)).collect()
    }

    /// Returns `P(0, t2) / P(0, t1)`.
    pub fn forward_discount_factor(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        Ok((self.log_discount(t2)? - self.log_discount(t1)?).exp())
    }

    /// Returns the continuously compounded zero rate to `t`.
    ///
    /// At `t = 0` the limit, the instantaneous forward at the origin, is
    /// returned.
    pub fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        if t.abs() < f64::EPSILON {
            return Ok(-self.interpolator.log_slope(0.0)?);
        }
        Ok(-self.log_discount(t)? / t)
    }

    /// Returns the instantaneous forward rate `f(0, t) = -d ln P(0, t) / dt`.
    ///
    /// Computed by a central difference of `ln P` with bump
    /// [`FORWARD_BUMP`]; a forward difference is used when `t` is closer to
    /// zero than the bump.
    pub fn instantaneous_forward(&self, t: f64) -> CurveResult<f64> {
        let h = FORWARD_BUMP;
        let (lo, hi) = if t < h { (t, t + h) } else { (t - h, t + h) };
        Ok(-(self.log_discount(hi)? - self.log_discount(lo)?) / (hi - lo))
    }

    /// Returns the pillar times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the pillar discount factors.
    #[must_use]
    pub fn discount_factors(&self) -> &[f64] {
        &self.discount_factors
    }

    /// Returns the last pillar time.
    #[must_use]
    pub fn max_time(&self) -> f64 {
        self.interpolator.max_x()
    }

    fn log_discount(&self, t: f64) -> CurveResult<f64> {
        if !t.is_finite() {
            return Err(CurveError::InvalidTime { time: t });
        }
        if !self.interpolator.in_range(t) {
            log::debug!(
                "extrapolating discount curve at t={t:.6} outside [{:.6}, {:.6}]",
                self.interpolator.min_x(),
                self.interpolator.max_x()
            );
        }
        Ok(self.interpolator.log_value(t)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn hull_curve() -> DiscountCurve {
        DiscountCurve::from_zero_rates(
            vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
            vec![0.03, 0.0343, 0.03824, 0.04183, 0.04512, 0.048512, 0.05086],
        )
        .unwrap()
    }

    #[test]
    fn test_pillars_reproduced() {
        let curve = hull_curve();
        for (&t, &df) in curve.times().iter().zip(curve.discount_factors()) {
            assert_relative_eq!(curve.discount_factor(t).unwrap(), df, epsilon = 1e-15);
        }
        assert_relative_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_rate_at_pillar() {
        let curve = hull_curve();
        assert_relative_eq!(curve.zero_rate(2.0).unwrap(), 0.04512, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_forward_between_pillars() {
        let curve = hull_curve();
        // ln P is linear on [1.0, 1.5]
        let f1 = curve.instantaneous_forward(1.2).unwrap();
        let f2 = curve.instantaneous_forward(1.3).unwrap();
        let expected = (1.5 * 0.04183 - 1.0 * 0.03824) / 0.5;
        assert_relative_eq!(f1, expected, epsilon = 1e-10);
        assert_relative_eq!(f2, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_extrapolation_continues_last_forward() {
        let curve = hull_curve();
        let last_forward: f64 = (3.0 * 0.05086 - 2.5 * 0.048512) / 0.5;

        let df3 = curve.discount_factor(3.0).unwrap();
        let df4 = curve.discount_factor(4.0).unwrap();

        assert_relative_eq!(df4, df3 * (-last_forward).exp(), epsilon = 1e-14);
        assert_relative_eq!(curve.instantaneous_forward(5.0).unwrap(), last_forward, epsilon = 1e-9);
    }

    #[test]
    fn test_forward_discount_factor() {
        let curve = hull_curve();
        let fwd = curve.forward_discount_factor(1.0, 2.0).unwrap();
        let expected = curve.discount_factor(2.0).unwrap() / curve.discount_factor(1.0).unwrap();
        assert_relative_eq!(fwd, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_invalid_query_time() {
        let curve = hull_curve();
        assert!(matches!(
            curve.discount_factor(f64::NAN),
            Err(CurveError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_from_zero_rates_rejects_nan_rate() {
        let result = DiscountCurve::from_zero_rates(vec![0.0, 1.0], vec![0.03, f64::NAN]);
        assert!(matches!(
            result,
            Err(CurveError::NonFinite { field: "zero rate", index: 1 })
        ));
    }

    #[test]
    fn test_rejects_increasing_dfs() {
        let result = DiscountCurve::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.95, 0.97]);
        assert!(matches!(result, Err(CurveError::IncreasingDiscountFactor { .. })));
    }

    proptest! {
        #[test]
        fn prop_flat_curve_exact(rate in 0.0f64..0.15, t in 0.0f64..30.0) {
            let curve = DiscountCurve::from_zero_rates(
                vec![0.0, 10.0],
                vec![rate, rate],
            ).unwrap();
            let df = curve.discount_factor(t).unwrap();
            prop_assert!((df - (-rate * t).exp()).abs() < 1e-12);
        }
    }
}
