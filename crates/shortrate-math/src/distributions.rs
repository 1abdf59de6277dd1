//! Standard normal distribution functions.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use statrs::function::erf::erfc;

/// Standard normal cumulative distribution function.
///
/// Evaluated as `0.5 * erfc(-x / sqrt(2))`, which keeps full relative
/// accuracy in the lower tail.
///
/// # Example
///
/// ```rust
/// use shortrate_math::distributions::normal_cdf;
///
/// assert!((normal_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((normal_cdf(1.96) - 0.9750021048517795).abs() < 1e-10);
/// ```
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        // erfc is accurate to about 1e-11 near the centre
        assert_relative_eq!(normal_cdf(1.0), 0.8413447460685429, epsilon = 1e-10);
        assert_relative_eq!(normal_cdf(-2.0), 0.022750131948179195, epsilon = 1e-10);
        assert_relative_eq!(normal_pdf(0.0), 0.3989422804014327, epsilon = 1e-15);
    }

    #[test]
    fn test_lower_tail_positive() {
        let p = normal_cdf(-10.0);
        assert!(p > 0.0);
        assert_relative_eq!(p, 7.619853024160527e-24, max_relative = 1e-8);
    }

    proptest! {
        #[test]
        fn prop_symmetry(x in -8.0f64..8.0) {
            prop_assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-14);
        }

        #[test]
        fn prop_monotone(x in -8.0f64..8.0, dx in 1e-3f64..1.0) {
            prop_assert!(normal_cdf(x + dx) >= normal_cdf(x));
        }
    }
}
