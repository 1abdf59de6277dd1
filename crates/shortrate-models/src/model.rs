//! Stateful Hull-White model holding at most one calibrated lattice.

use shortrate_curves::DiscountCurve;

use crate::analytic;
use crate::error::{ModelError, ModelResult};
use crate::instruments::{
    CallablePuttableValue, CashflowSchedule, EmbeddedOptionSchedule, ExerciseStyle, OptionValue,
};
use crate::lattice::TrinomialLattice;
use crate::params::HullWhiteParams;
use crate::pricing;

/// One-factor Hull-White model.
///
/// The tree pricers run on the lattice from the latest
/// [`build_tree`](Self::build_tree) call; building again replaces it. The
/// analytic pricers take their curve explicitly and need no lattice.
///
/// # Example
///
/// ```rust
/// use shortrate_models::HullWhiteModel;
///
/// let mut model = HullWhiteModel::new(0.01, 0.1, 150).unwrap();
/// model.build_tree(3.0, &[0.0, 10.0], &[1.0, 0.6065306597]).unwrap();
///
/// let tree = model.european_zero_coupon_bond_option_tree(1.0, 3.0, 90.0, 100.0).unwrap();
/// let analytic = model
///     .zero_coupon_bond_option_analytic(1.0, 3.0, 90.0, 100.0, &[0.0, 10.0], &[1.0, 0.6065306597])
///     .unwrap();
/// assert!((tree.call - analytic.call).abs() < 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct HullWhiteModel {
    params: HullWhiteParams,
    lattice: Option<TrinomialLattice>,
}

impl HullWhiteModel {
    /// Creates a model with no lattice.
    pub fn new(sigma: f64, mean_reversion: f64, num_time_steps: usize) -> ModelResult<Self> {
        Ok(Self::from_params(HullWhiteParams::new(
            sigma,
            mean_reversion,
            num_time_steps,
        )?))
    }

    /// Creates a model from already validated parameters.
    #[must_use]
    pub fn from_params(params: HullWhiteParams) -> Self {
        Self {
            params,
            lattice: None,
        }
    }

    /// Model parameters.
    #[must_use]
    pub fn params(&self) -> &HullWhiteParams {
        &self.params
    }

    /// The current lattice, if one has been built.
    #[must_use]
    pub fn lattice(&self) -> Option<&TrinomialLattice> {
        self.lattice.as_ref()
    }

    /// Builds a lattice over `[0, horizon]` calibrated to the curve given by
    /// `curve_times` and `curve_discount_factors`, replacing any previous
    /// lattice.
    ///
    /// On failure the model is left without a lattice.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidParameter`] for a non-positive horizon
    /// - [`ModelError::MalformedCurve`] for invalid curve arrays
    /// - [`ModelError::CalibrationFailure`] if the lattice cannot be fitted
    pub fn build_tree(
        &mut self,
        horizon: f64,
        curve_times: &[f64],
        curve_discount_factors: &[f64],
    ) -> ModelResult<&TrinomialLattice> {
        self.lattice = None;
        let curve = DiscountCurve::new(curve_times.to_vec(), curve_discount_factors.to_vec())?;
        self.build_tree_with_curve(horizon, &curve)
    }

    /// Builds a lattice from an existing curve, replacing any previous
    /// lattice.
    pub fn build_tree_with_curve(
        &mut self,
        horizon: f64,
        curve: &DiscountCurve,
    ) -> ModelResult<&TrinomialLattice> {
        self.lattice = None;
        let lattice = TrinomialLattice::build(&self.params, horizon, curve)?;
        Ok(self.lattice.insert(lattice))
    }

    fn require_lattice(&self) -> ModelResult<&TrinomialLattice> {
        self.lattice.as_ref().ok_or(ModelError::TreeNotBuilt)
    }

    /// Closed-form European option on a zero-coupon bond.
    pub fn zero_coupon_bond_option_analytic(
        &self,
        expiry: f64,
        maturity: f64,
        strike: f64,
        face: f64,
        curve_times: &[f64],
        curve_discount_factors: &[f64],
    ) -> ModelResult<OptionValue> {
        let curve = DiscountCurve::new(curve_times.to_vec(), curve_discount_factors.to_vec())?;
        analytic::zero_coupon_bond_option(
            self.params.sigma(),
            self.params.mean_reversion(),
            expiry,
            maturity,
            strike,
            face,
            &curve,
        )
    }

    /// European option on a zero-coupon bond priced on the lattice.
    ///
    /// # Errors
    ///
    /// [`ModelError::TreeNotBuilt`] without a lattice, otherwise as
    /// [`pricing::european_zero_coupon_bond_option`].
    pub fn european_zero_coupon_bond_option_tree(
        &self,
        expiry: f64,
        maturity: f64,
        strike: f64,
        face: f64,
    ) -> ModelResult<OptionValue> {
        pricing::european_zero_coupon_bond_option(
            self.require_lattice()?,
            expiry,
            maturity,
            strike,
            face,
        )
    }

    /// European coupon bond option valued at the expiry column.
    pub fn european_coupon_bond_option_tree(
        &self,
        expiry: f64,
        strike: f64,
        face: f64,
        coupon_times: &[f64],
        coupon_flows: &[f64],
    ) -> ModelResult<OptionValue> {
        let lattice = self.require_lattice()?;
        let schedule = CashflowSchedule::new(coupon_times.to_vec(), coupon_flows.to_vec())?;
        pricing::european_coupon_bond_option(lattice, expiry, strike, face, &schedule)
    }

    /// Coupon bond option by full rollback, European or American.
    pub fn american_coupon_bond_option_tree(
        &self,
        expiry: f64,
        strike: f64,
        face: f64,
        coupon_times: &[f64],
        coupon_flows: &[f64],
        style: ExerciseStyle,
    ) -> ModelResult<OptionValue> {
        let lattice = self.require_lattice()?;
        let schedule = CashflowSchedule::new(coupon_times.to_vec(), coupon_flows.to_vec())?;
        pricing::coupon_bond_option(lattice, expiry, strike, face, &schedule, style)
    }

    /// European coupon bond option by Jamshidian's decomposition.
    #[allow(clippy::too_many_arguments)]
    pub fn european_coupon_bond_option_analytic(
        &self,
        expiry: f64,
        strike: f64,
        face: f64,
        coupon_times: &[f64],
        coupon_flows: &[f64],
        curve_times: &[f64],
        curve_discount_factors: &[f64],
    ) -> ModelResult<OptionValue> {
        let schedule = CashflowSchedule::new(coupon_times.to_vec(), coupon_flows.to_vec())?;
        let curve = DiscountCurve::new(curve_times.to_vec(), curve_discount_factors.to_vec())?;
        analytic::coupon_bond_option(
            self.params.sigma(),
            self.params.mean_reversion(),
            expiry,
            strike,
            face,
            &schedule,
            &curve,
        )
    }

    /// Bond with embedded call and put schedules, alongside the straight
    /// bond.
    #[allow(clippy::too_many_arguments)]
    pub fn callable_puttable_bond_tree(
        &self,
        coupon_times: &[f64],
        coupon_flows: &[f64],
        call_times: &[f64],
        call_prices: &[f64],
        put_times: &[f64],
        put_prices: &[f64],
        face: f64,
    ) -> ModelResult<CallablePuttableValue> {
        let lattice = self.require_lattice()?;
        let schedule = CashflowSchedule::new(coupon_times.to_vec(), coupon_flows.to_vec())?;
        let calls = EmbeddedOptionSchedule::new(call_times.to_vec(), call_prices.to_vec())?;
        let puts = EmbeddedOptionSchedule::new(put_times.to_vec(), put_prices.to_vec())?;
        pricing::callable_puttable_bond(lattice, &schedule, &calls, &puts, face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f64; 3] = [0.0, 5.0, 10.0];

    fn dfs() -> [f64; 3] {
        [1.0, (-0.2_f64).exp(), (-0.45_f64).exp()]
    }

    #[test]
    fn test_tree_pricers_require_lattice() {
        let model = HullWhiteModel::new(0.01, 0.1, 20).unwrap();

        assert!(model.lattice().is_none());
        assert!(matches!(
            model.european_zero_coupon_bond_option_tree(1.0, 2.0, 90.0, 100.0),
            Err(ModelError::TreeNotBuilt)
        ));
        assert!(matches!(
            model.callable_puttable_bond_tree(&[1.0], &[0.05], &[], &[], &[], &[], 100.0),
            Err(ModelError::TreeNotBuilt)
        ));
    }

    #[test]
    fn test_analytic_pricers_need_no_lattice() {
        let model = HullWhiteModel::new(0.01, 0.1, 20).unwrap();

        let zcb = model
            .zero_coupon_bond_option_analytic(1.0, 4.0, 85.0, 100.0, &TIMES, &dfs())
            .unwrap();
        let coupon = model
            .european_coupon_bond_option_analytic(1.0, 100.0, 100.0, &[2.0, 3.0], &[0.04, 0.04], &TIMES, &dfs())
            .unwrap();

        assert!(zcb.call > 0.0 && zcb.put > 0.0);
        assert!(coupon.call > 0.0 && coupon.put > 0.0);
    }

    #[test]
    fn test_rebuild_replaces_lattice() {
        let mut model = HullWhiteModel::new(0.01, 0.1, 20).unwrap();

        model.build_tree(2.0, &TIMES, &dfs()).unwrap();
        assert!((model.lattice().unwrap().horizon() - 2.0).abs() < 1e-15);

        model.build_tree(4.0, &TIMES, &dfs()).unwrap();
        assert!((model.lattice().unwrap().horizon() - 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_failed_build_clears_lattice() {
        let mut model = HullWhiteModel::new(0.01, 0.1, 20).unwrap();
        model.build_tree(2.0, &TIMES, &dfs()).unwrap();

        let err = model.build_tree(2.0, &[0.0, 1.0], &[1.0, 1.2]).unwrap_err();

        assert!(matches!(err, ModelError::MalformedCurve(_)));
        assert!(model.lattice().is_none());
    }

    #[test]
    fn test_invalid_horizon() {
        let mut model = HullWhiteModel::new(0.01, 0.1, 20).unwrap();
        assert!(matches!(
            model.build_tree(0.0, &TIMES, &dfs()),
            Err(ModelError::InvalidParameter { name: "horizon", .. })
        ));
    }
}
