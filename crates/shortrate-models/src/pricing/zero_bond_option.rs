//! European options on zero-coupon bonds priced on the lattice.

use crate::analytic::AffineBondPrice;
use crate::error::{require_non_negative, require_positive, ModelError, ModelResult};
use crate::instruments::OptionValue;
use crate::lattice::{BackwardInductor, TrinomialLattice};

/// European option expiring at `expiry` on a bond paying `face` at
/// `maturity`.
///
/// When the lattice reaches `maturity` the bond is rolled back from its
/// maturity column to the expiry column. Otherwise the bond price at each
/// expiry node comes from the lattice-consistent affine formula in the
/// node's `dt`-period rate (see [`AffineBondPrice::lattice_consistent`]).
/// Either way the payoffs at expiry are valued with the column's
/// Arrow-Debreu prices.
///
/// # Errors
///
/// - [`ModelError::InvalidParameter`] for a non-positive strike or face,
///   or `maturity < expiry`
/// - [`ModelError::BeyondHorizon`] if the lattice does not reach `expiry`
pub fn european_zero_coupon_bond_option(
    lattice: &TrinomialLattice,
    expiry: f64,
    maturity: f64,
    strike: f64,
    face: f64,
) -> ModelResult<OptionValue> {
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

    let expiry_step = lattice.step_for_time(expiry)?;
    let bond = match lattice.step_for_time(maturity) {
        Ok(maturity_step) => bond_by_rollback(lattice, expiry_step, maturity_step, maturity, face)?,
        Err(ModelError::BeyondHorizon { .. }) => {
            bond_by_formula(lattice, expiry_step, maturity, face)?
        }
        Err(err) => return Err(err),
    };

    let inductor = BackwardInductor::new(lattice);
    let g = lattice.geometry();
    let call = inductor.column_at(expiry_step, |j| (bond[g.index(j)] - strike).max(0.0));
    let put = inductor.column_at(expiry_step, |j| (strike - bond[g.index(j)]).max(0.0));

    Ok(OptionValue {
        call: lattice.present_value_at(expiry_step, &call),
        put: lattice.present_value_at(expiry_step, &put),
    })
}

fn bond_by_rollback(
    lattice: &TrinomialLattice,
    expiry_step: usize,
    maturity_step: usize,
    maturity: f64,
    face: f64,
) -> ModelResult<Vec<f64>> {
    let curve = lattice.curve();
    let redemption =
        face * curve.discount_factor(maturity)? / curve.discount_factor(lattice.time_at(maturity_step))?;

    let inductor = BackwardInductor::new(lattice);
    let terminal = inductor.column_at(maturity_step, |_| redemption);
    Ok(inductor.roll_back(maturity_step, expiry_step, terminal, |_, _, v| v))
}

fn bond_by_formula(
    lattice: &TrinomialLattice,
    expiry_step: usize,
    maturity: f64,
    face: f64,
) -> ModelResult<Vec<f64>> {
    let params = lattice.params();
    let formula = AffineBondPrice::lattice_consistent(
        params.sigma(),
        params.mean_reversion(),
        lattice.time_at(expiry_step),
        maturity,
        lattice.dt(),
        lattice.curve(),
    )?;

    let rates = lattice.rates().row(expiry_step);
    let inductor = BackwardInductor::new(lattice);
    let g = lattice.geometry();
    Ok(inductor.column_at(expiry_step, |j| face * formula.price(rates[g.index(j)])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::zero_coupon_bond_option;
    use crate::params::HullWhiteParams;
    use approx::assert_relative_eq;
    use shortrate_curves::DiscountCurve;

    fn curve() -> DiscountCurve {
        DiscountCurve::from_zero_rates(vec![0.0, 1.0, 5.0, 10.0], vec![0.04, 0.042, 0.047, 0.05]).unwrap()
    }

    #[test]
    fn test_rollback_and_formula_agree() {
        let curve = curve();
        let params = HullWhiteParams::new(0.01, 0.1, 300).unwrap();
        // One lattice reaching maturity, one stopping at expiry with the same dt
        let long = TrinomialLattice::build(&params, 6.0, &curve).unwrap();
        let short = TrinomialLattice::build(&params.with_time_steps(100).unwrap(), 2.0, &curve).unwrap();

        let rolled = european_zero_coupon_bond_option(&long, 2.0, 6.0, 80.0, 100.0).unwrap();
        let formula = european_zero_coupon_bond_option(&short, 2.0, 6.0, 80.0, 100.0).unwrap();

        assert_relative_eq!(rolled.call, formula.call, epsilon = 0.02);
        assert_relative_eq!(rolled.put, formula.put, epsilon = 0.02);
    }

    #[test]
    fn test_matches_analytic() {
        let curve = curve();
        let params = HullWhiteParams::new(0.01, 0.1, 200).unwrap();
        let lattice = TrinomialLattice::build(&params, 2.0, &curve).unwrap();

        let tree = european_zero_coupon_bond_option(&lattice, 2.0, 7.0, 78.0, 100.0).unwrap();
        let analytic = zero_coupon_bond_option(0.01, 0.1, 2.0, 7.0, 78.0, 100.0, &curve).unwrap();

        assert_relative_eq!(tree.call, analytic.call, epsilon = 0.02);
        assert_relative_eq!(tree.put, analytic.put, epsilon = 0.02);
    }

    #[test]
    fn test_put_call_parity_on_lattice() {
        let curve = curve();
        let params = HullWhiteParams::new(0.01, 0.1, 100).unwrap();
        let lattice = TrinomialLattice::build(&params, 5.0, &curve).unwrap();

        let v = european_zero_coupon_bond_option(&lattice, 1.0, 5.0, 85.0, 100.0).unwrap();

        let parity = 100.0 * curve.discount_factor(5.0).unwrap()
            - 85.0 * lattice.discount_factor_at(20).unwrap();
        assert_relative_eq!(v.call - v.put, parity, epsilon = 1e-9);
    }

    #[test]
    fn test_expiry_beyond_lattice() {
        let curve = curve();
        let params = HullWhiteParams::new(0.01, 0.1, 10).unwrap();
        let lattice = TrinomialLattice::build(&params, 1.0, &curve).unwrap();

        assert!(matches!(
            european_zero_coupon_bond_option(&lattice, 2.0, 5.0, 80.0, 100.0),
            Err(ModelError::BeyondHorizon { .. })
        ));
        assert!(matches!(
            european_zero_coupon_bond_option(&lattice, 0.5, 0.4, 80.0, 100.0),
            Err(ModelError::InvalidParameter { name: "maturity", .. })
        ));
    }
}
