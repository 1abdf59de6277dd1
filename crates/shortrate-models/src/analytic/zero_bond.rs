//! Closed-form zero-coupon bond prices and options under Hull-White.

use shortrate_curves::DiscountCurve;
use shortrate_math::distributions::normal_cdf;

use crate::error::{require_non_negative, require_positive, ModelError, ModelResult};
use crate::instruments::OptionValue;

/// Below this mean reversion the `a -> 0` limits of the formulas are used.
pub const SMALL_MEAN_REVERSION: f64 = 1e-10;

/// Below this bond price volatility an option is worth its discounted
/// intrinsic value.
pub const SMALL_PRICE_VOLATILITY: f64 = 1e-12;

/// `B(t, T) = (1 - exp(-a tau)) / a` with `tau = T - t`.
#[must_use]
pub fn b_factor(a: f64, tau: f64) -> f64 {
    if a < SMALL_MEAN_REVERSION {
        tau
    } else {
        -(-a * tau).exp_m1() / a
    }
}

/// `(1 - exp(-2 a t)) / (4 a)`, tending to `t / 2`.
fn variance_factor(a: f64, t: f64) -> f64 {
    if a < SMALL_MEAN_REVERSION {
        0.5 * t
    } else {
        -(-2.0 * a * t).exp_m1() / (4.0 * a)
    }
}

/// Affine zero-bond price `P(t, T) = exp(ln_a - b r)` seen from time `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineBondPrice {
    /// Maturity of the bond.
    pub maturity: f64,
    /// `ln A(t, T)`.
    pub ln_a: f64,
    /// Sensitivity to the state rate.
    pub b: f64,
}

impl AffineBondPrice {
    /// Price in terms of the instantaneous short rate at `t`:
    ///
    /// ```text
    /// ln A = ln(P(0,T) / P(0,t)) + B f(0,t) - σ² (1 - e^{-2at}) / (4a) B²
    /// ```
    pub fn instantaneous(
        sigma: f64,
        a: f64,
        t: f64,
        maturity: f64,
        curve: &DiscountCurve,
    ) -> ModelResult<Self> {
        let b = b_factor(a, maturity - t);
        let ln_ratio = curve.forward_discount_factor(t, maturity)?.ln();
        let forward = curve.instantaneous_forward(t)?;
        let ln_a = ln_ratio + b * forward - sigma * sigma * variance_factor(a, t) * b * b;
        Ok(Self { maturity, ln_a, b })
    }

    /// Price in terms of the `dt`-period rate of a lattice node at `t`:
    ///
    /// ```text
    /// ln Â = ln(P(0,T)/P(0,t)) - B(t,T)/B(t,t+dt) ln(P(0,t+dt)/P(0,t))
    ///        - σ² (1 - e^{-2at}) / (4a) B(t,T) (B(t,T) - B(t,t+dt))
    /// B̂    = B(t,T)/B(t,t+dt) dt
    /// ```
    ///
    /// At `T = t + dt` this reduces to `exp(-R dt)`, matching the lattice's
    /// own one-step discounting.
    pub fn lattice_consistent(
        sigma: f64,
        a: f64,
        t: f64,
        maturity: f64,
        dt: f64,
        curve: &DiscountCurve,
    ) -> ModelResult<Self> {
        let b_mat = b_factor(a, maturity - t);
        let b_step = b_factor(a, dt);
        let ratio = b_mat / b_step;

        let ln_ratio = curve.forward_discount_factor(t, maturity)?.ln();
        let ln_step = curve.forward_discount_factor(t, t + dt)?.ln();
        let ln_a = ln_ratio
            - ratio * ln_step
            - sigma * sigma * variance_factor(a, t) * b_mat * (b_mat - b_step);

        Ok(Self {
            maturity,
            ln_a,
            b: ratio * dt,
        })
    }

    /// Bond price per unit face given the state rate.
    #[must_use]
    pub fn price(&self, rate: f64) -> f64 {
        (self.ln_a - self.b * rate).exp()
    }
}

/// European option on a zero-coupon bond.
///
/// The option expires at `expiry` (`T`) on a bond paying `face` at
/// `maturity` (`s`):
///
/// ```text
/// σ_p  = σ B(T, s) sqrt((1 - e^{-2aT}) / (2a))
/// h    = ln(F P(0,s) / (K P(0,T))) / σ_p + σ_p / 2
/// call = F P(0,s) N(h) - K P(0,T) N(h - σ_p)
/// put  = K P(0,T) N(σ_p - h) - F P(0,s) N(-h)
/// ```
///
/// # Example
///
/// ```rust
/// use shortrate_curves::DiscountCurve;
/// use shortrate_models::analytic::zero_coupon_bond_option;
///
/// let curve = DiscountCurve::from_zero_rates(vec![0.0, 10.0], vec![0.05, 0.05]).unwrap();
/// let value = zero_coupon_bond_option(0.01, 0.1, 1.0, 5.0, 80.0, 100.0, &curve).unwrap();
///
/// // Put-call parity
/// let parity = 100.0 * (-0.25_f64).exp() - 80.0 * (-0.05_f64).exp();
/// assert!((value.call - value.put - parity).abs() < 1e-10);
/// ```
///
/// # Errors
///
/// [`ModelError::InvalidParameter`] for non-positive `sigma`, `strike` or
/// `face`, negative `a` or `expiry`, or `expiry > maturity`.
pub fn zero_coupon_bond_option(
    sigma: f64,
    a: f64,
    expiry: f64,
    maturity: f64,
    strike: f64,
    face: f64,
    curve: &DiscountCurve,
) -> ModelResult<OptionValue> {
    require_positive("sigma", sigma)?;
    require_non_negative("mean_reversion", a)?;
    require_non_negative("expiry", expiry)?;
    require_positive("strike", strike)?;
    require_positive("face", face)?;
    if !maturity.is_finite() || maturity < expiry {
        return Err(ModelError::invalid_parameter(
            "maturity",
            maturity,
            format!("must not precede the option expiry {expiry}"),
        ));
    }

    let df_expiry = curve.discount_factor(expiry)?;
    let df_maturity = curve.discount_factor(maturity)?;
    let bond = face * df_maturity;
    let cash = strike * df_expiry;

    let expiry_variance = if a < SMALL_MEAN_REVERSION {
        expiry
    } else {
        -(-2.0 * a * expiry).exp_m1() / (2.0 * a)
    };
    let sigma_p = sigma * b_factor(a, maturity - expiry) * expiry_variance.sqrt();

    if sigma_p < SMALL_PRICE_VOLATILITY {
        return Ok(OptionValue {
            call: (bond - cash).max(0.0),
            put: (cash - bond).max(0.0),
        });
    }

    let h = (bond / cash).ln() / sigma_p + 0.5 * sigma_p;
    Ok(OptionValue {
        call: bond * normal_cdf(h) - cash * normal_cdf(h - sigma_p),
        put: cash * normal_cdf(sigma_p - h) - bond * normal_cdf(-h),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat(rate: f64) -> DiscountCurve {
        DiscountCurve::from_zero_rates(vec![0.0, 30.0], vec![rate, rate]).unwrap()
    }

    #[test]
    fn test_b_factor_limits() {
        assert_relative_eq!(b_factor(0.0, 2.0), 2.0);
        assert_relative_eq!(b_factor(0.1, 1.0), (1.0 - (-0.1_f64).exp()) / 0.1, epsilon = 1e-15);
        assert_relative_eq!(b_factor(1e-9, 2.0), 2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_put_call_parity() {
        let curve = flat(0.04);
        let v = zero_coupon_bond_option(0.015, 0.05, 2.0, 7.0, 85.0, 100.0, &curve).unwrap();

        let parity = 100.0 * curve.discount_factor(7.0).unwrap()
            - 85.0 * curve.discount_factor(2.0).unwrap();
        assert_relative_eq!(v.call - v.put, parity, epsilon = 1e-10);
        assert!(v.call > 0.0 && v.put > 0.0);
    }

    #[test]
    fn test_zero_mean_reversion_is_continuous() {
        let curve = flat(0.05);
        let at_zero = zero_coupon_bond_option(0.01, 0.0, 3.0, 9.0, 63.0, 100.0, &curve).unwrap();
        let near_zero = zero_coupon_bond_option(0.01, 1e-8, 3.0, 9.0, 63.0, 100.0, &curve).unwrap();

        assert_relative_eq!(at_zero.put, near_zero.put, epsilon = 1e-5);
        assert_relative_eq!(at_zero.call, near_zero.call, epsilon = 1e-5);
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let curve = flat(0.05);
        let v = zero_coupon_bond_option(0.01, 0.1, 0.0, 5.0, 70.0, 100.0, &curve).unwrap();

        assert_relative_eq!(v.call, 100.0 * (-0.25_f64).exp() - 70.0, epsilon = 1e-12);
        assert_relative_eq!(v.put, 0.0);
    }

    #[test]
    fn test_expiry_after_maturity_rejected() {
        let curve = flat(0.05);
        assert!(matches!(
            zero_coupon_bond_option(0.01, 0.1, 5.0, 3.0, 70.0, 100.0, &curve),
            Err(ModelError::InvalidParameter { name: "maturity", .. })
        ));
    }

    #[test]
    fn test_lattice_consistent_one_step_is_discount() {
        let curve = flat(0.05);
        let dt = 0.25;
        let formula = AffineBondPrice::lattice_consistent(0.01, 0.1, 2.0, 2.0 + dt, dt, &curve).unwrap();

        assert_relative_eq!(formula.price(0.07), (-0.07 * dt).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_affine_price_at_forward_rate() {
        // Without volatility the bond price at the forward rate is the
        // forward discount factor
        let curve = flat(0.05);
        let formula = AffineBondPrice::instantaneous(1e-12, 0.1, 2.0, 6.0, &curve).unwrap();

        assert_relative_eq!(formula.price(0.05), (-0.05_f64 * 4.0).exp(), epsilon = 1e-8);
    }
}
