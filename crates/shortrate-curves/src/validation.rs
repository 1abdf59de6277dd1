//! Pillar validation for discount curves.
//!
//! Checks run in a fixed order so the first violation found is the one
//! reported:
//!
//! 1. At least two pillars, equal array lengths
//! 2. Every entry finite
//! 3. First time at or before zero, times strictly increasing
//! 4. Discount factors positive and non-increasing

use crate::error::{CurveError, CurveResult};

/// Minimum number of pillars a discount curve needs.
pub const MIN_PILLARS: usize = 2;

/// Relative slack allowed when checking that discount factors do not
/// increase, so that pillars equal up to rounding are accepted.
pub const DF_INCREASE_TOLERANCE: f64 = 1e-12;

/// Validates `(time, discount factor)` pillars.
///
/// # Errors
///
/// Returns the first [`CurveError`] found.
pub fn validate_pillars(times: &[f64], discount_factors: &[f64]) -> CurveResult<()> {
    validate_times(times, discount_factors.len())?;

    for (index, &value) in discount_factors.iter().enumerate() {
        if !value.is_finite() {
            return Err(CurveError::NonFinite {
                field: "discount factor",
                index,
            });
        }
        if value <= 0.0 {
            return Err(CurveError::NonPositiveDiscountFactor { index, value });
        }
    }

    for (index, pair) in discount_factors.windows(2).enumerate() {
        let (prev, current) = (pair[0], pair[1]);
        if current > prev * (1.0 + DF_INCREASE_TOLERANCE) {
            return Err(CurveError::IncreasingDiscountFactor {
                index: index + 1,
                prev,
                current,
            });
        }
    }

    Ok(())
}

/// Validates pillar times against the number of values supplied with them.
///
/// # Errors
///
/// Returns [`CurveError::InsufficientPoints`], [`CurveError::LengthMismatch`],
/// [`CurveError::NonFinite`], [`CurveError::StartsAfterOrigin`] or
/// [`CurveError::NonMonotonicTimes`].
pub fn validate_times(times: &[f64], values: usize) -> CurveResult<()> {
    if times.len() < MIN_PILLARS {
        return Err(CurveError::insufficient_points(MIN_PILLARS, times.len()));
    }
    if times.len() != values {
        return Err(CurveError::LengthMismatch {
            times: times.len(),
            values,
        });
    }
    if let Some(index) = times.iter().position(|t| !t.is_finite()) {
        return Err(CurveError::NonFinite {
            field: "time",
            index,
        });
    }
    if times[0] > 0.0 {
        return Err(CurveError::StartsAfterOrigin { first: times[0] });
    }
    for (index, pair) in times.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CurveError::non_monotonic_times(index + 1, pair[0], pair[1]));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_curve() {
        let times = [0.0, 1.0, 2.0];
        let dfs = [1.0, 0.95, 0.90];
        assert!(validate_pillars(&times, &dfs).is_ok());
    }

    #[test]
    fn test_negative_first_time_accepted() {
        let times = [-0.5, 1.0];
        let dfs = [1.01, 0.95];
        assert!(validate_pillars(&times, &dfs).is_ok());
    }

    #[test]
    fn test_flat_segment_accepted() {
        let times = [0.0, 1.0, 2.0];
        let dfs = [1.0, 1.0, 0.97];
        assert!(validate_pillars(&times, &dfs).is_ok());
    }

    #[test]
    fn test_too_few_points() {
        let result = validate_pillars(&[0.0], &[1.0]);
        assert!(matches!(
            result,
            Err(CurveError::InsufficientPoints { required: 2, got: 1 })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let result = validate_pillars(&[0.0, 1.0], &[1.0, 0.9, 0.8]);
        assert!(matches!(result, Err(CurveError::LengthMismatch { .. })));
    }

    #[test]
    fn test_starts_after_origin() {
        let result = validate_pillars(&[0.5, 1.0], &[0.99, 0.98]);
        assert!(matches!(result, Err(CurveError::StartsAfterOrigin { .. })));
    }

    #[test]
    fn test_non_increasing_times() {
        let result = validate_pillars(&[0.0, 1.0, 1.0], &[1.0, 0.9, 0.8]);
        assert!(matches!(
            result,
            Err(CurveError::NonMonotonicTimes { index: 2, .. })
        ));
    }

    #[test]
    fn test_non_positive_discount_factor() {
        let result = validate_pillars(&[0.0, 1.0], &[1.0, 0.0]);
        assert!(matches!(
            result,
            Err(CurveError::NonPositiveDiscountFactor { index: 1, .. })
        ));
    }

    #[test]
    fn test_increasing_discount_factor() {
        let result = validate_pillars(&[0.0, 1.0, 2.0], &[1.0, 0.95, 0.96]);
        assert!(matches!(
            result,
            Err(CurveError::IncreasingDiscountFactor { index: 2, .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let result = validate_pillars(&[0.0, f64::NAN], &[1.0, 0.9]);
        assert!(matches!(
            result,
            Err(CurveError::NonFinite { field: "time", index: 1 })
        ));
    }
}
