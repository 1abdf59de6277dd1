//! Jamshidian decomposition of coupon bond options.
//!
//! Under a one-factor model every zero-bond price at the option expiry is a
//! decreasing function of the same short rate. An option on the coupon
//! bond struck at `K` is therefore a portfolio of zero-bond options, each
//! struck at that zero's price at the critical rate `r*` where the bond is
//! worth exactly `K`.

use shortrate_curves::DiscountCurve;
use shortrate_math::solvers::{bisection, brent, expand_bracket, SolverConfig};
use shortrate_math::MathError;

use crate::analytic::zero_bond::{zero_coupon_bond_option, AffineBondPrice};
use crate::error::{require_non_negative, require_positive, ModelError, ModelResult};
use crate::instruments::{CashflowSchedule, OptionValue};

/// Starting bracket for the critical rate search.
pub const INITIAL_BRACKET: (f64, f64) = (-0.1, 0.2);

/// Growth factor applied when the bracket is widened.
pub const BRACKET_EXPANSION: f64 = 1.6;

/// Maximum number of bracket widenings.
pub const MAX_BRACKET_EXPANSIONS: u32 = 50;

/// Iteration budget and tolerance of the critical rate search.
pub const CRITICAL_RATE_SOLVER: SolverConfig = SolverConfig {
    tolerance: 1e-12,
    max_iterations: 200,
};

/// European option on a coupon bond by Jamshidian's decomposition.
///
/// Flows paid at or after `expiry` are included, with the face redeemed at
/// the final flow. `strike` is on the same basis as `face`.
///
/// # Errors
///
/// - [`ModelError::InvalidParameter`] for invalid scalars or an expiry at or
///   after the final flow
/// - [`ModelError::RootFindFailure`] if the critical rate cannot be found
pub fn coupon_bond_option(
    sigma: f64,
    a: f64,
    expiry: f64,
    strike: f64,
    face: f64,
    schedule: &CashflowSchedule,
    curve: &DiscountCurve,
) -> ModelResult<OptionValue> {
    require_positive("sigma", sigma)?;
    require_non_negative("mean_reversion", a)?;
    require_non_negative("expiry", expiry)?;
    require_positive("strike", strike)?;
    require_positive("face", face)?;
    if expiry >= schedule.final_time() {
        return Err(ModelError::invalid_parameter(
            "expiry",
            expiry,
            format!(
                "must precede the final cashflow at {}",
                schedule.final_time()
            ),
        ));
    }

    let legs = schedule
        .flows_from(expiry)
        .map(|(maturity, amount)| {
            AffineBondPrice::instantaneous(sigma, a, expiry, maturity, curve)
                .map(|price| (price, amount))
        })
        .collect::<ModelResult<Vec<_>>>()?;

    let unit_strike = strike / face;
    let excess = |r: f64| -> f64 {
        legs.iter()
            .map(|(price, amount)| amount * price.price(r))
            .sum::<f64>()
            - unit_strike
    };
    let r_star = critical_rate(excess)?;

    let mut value = OptionValue { call: 0.0, put: 0.0 };
    for (price, amount) in &legs {
        let leg = zero_coupon_bond_option(
            sigma,
            a,
            expiry,
            price.maturity,
            price.price(r_star),
            1.0,
            curve,
        )?;
        value.call += amount * leg.call;
        value.put += amount * leg.put;
    }

    Ok(value.scaled(face))
}

/// Finds the rate at which `excess` changes sign.
fn critical_rate<F>(excess: F) -> ModelResult<f64>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = INITIAL_BRACKET;
    let (lo, hi) = expand_bracket(&excess, lo, hi, BRACKET_EXPANSION, MAX_BRACKET_EXPANSIONS)
        .map_err(|err| match err {
            MathError::InvalidBracket { a, b, .. } => ModelError::root_find_failure(
                a,
                b,
                "bond price does not cross the strike",
            ),
            other => ModelError::root_find_failure(lo, hi, other.to_string()),
        })?;

    let result = match brent(&excess, lo, hi, &CRITICAL_RATE_SOLVER) {
        Ok(result) => result,
        Err(MathError::ConvergenceFailed { .. }) => {
            tracing::debug!(lower = lo, upper = hi, "brent stalled, falling back to bisection");
            bisection(&excess, lo, hi, &CRITICAL_RATE_SOLVER)
                .map_err(|err| ModelError::root_find_failure(lo, hi, err.to_string()))?
        }
        Err(err) => return Err(ModelError::root_find_failure(lo, hi, err.to_string())),
    };

    tracing::debug!(
        r_star = result.root,
        iterations = result.iterations,
        lower = lo,
        upper = hi,
        "critical rate found"
    );
    Ok(result.root)
}
