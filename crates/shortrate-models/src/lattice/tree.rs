//! The calibrated trinomial lattice.

use std::ops::RangeInclusive;

use ndarray::Array2;
use shortrate_curves::DiscountCurve;

use crate::error::{ModelError, ModelResult};
use crate::lattice::calibration::DriftCalibrator;
use crate::lattice::geometry::{BranchProbabilities, BranchType, LatticeGeometry};
use crate::params::HullWhiteParams;

/// A Hull-White trinomial lattice calibrated to a discount curve.
///
/// Rates and Arrow-Debreu prices are stored in dense arenas indexed by
/// `[step, j + jmax]`; slots outside the reachable diamond hold zero. Columns
/// `0..=N` carry rates; state prices exist for `0..=N + 1`.
///
/// Once built the lattice is never mutated, so it can be shared freely
/// between pricers and threads.
///
/// # Example
///
/// ```rust
/// use shortrate_curves::DiscountCurve;
/// use shortrate_models::{HullWhiteParams, TrinomialLattice};
///
/// let curve = DiscountCurve::from_zero_rates(vec![0.0, 10.0], vec![0.05, 0.05]).unwrap();
/// let params = HullWhiteParams::new(0.01, 0.1, 50).unwrap();
///
/// let lattice = TrinomialLattice::build(&params, 5.0, &curve).unwrap();
/// assert!(lattice.curve_reproduction_error() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct TrinomialLattice {
    params: HullWhiteParams,
    geometry: LatticeGeometry,
    curve: DiscountCurve,
    probabilities: Vec<Option<BranchProbabilities>>,
    discount_factors: Vec<f64>,
    alpha: Vec<f64>,
    rates: Array2<f64>,
    state_prices: Array2<f64>,
}

impl TrinomialLattice {
    /// Builds and calibrates a lattice covering `[0, horizon]`.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidParameter`] for a non-positive horizon
    /// - [`ModelError::CalibrationFailure`] if a branch probability leaves
    ///   `[0, 1]` or a drift is not finite
    /// - [`ModelError::MalformedCurve`] if the curve cannot be sampled
    pub fn build(
        params: &HullWhiteParams,
        horizon: f64,
        curve: &DiscountCurve,
    ) -> ModelResult<Self> {
        let geometry = LatticeGeometry::new(params, horizon)?;
        let n = geometry.num_steps();
        let dt = geometry.dt();

        let _span = tracing::debug_span!("build_lattice", horizon, steps = n).entered();

        let probabilities = geometry.probability_table()?;

        let sample_times: Vec<f64> = (0..=n + 1).map(|m| m as f64 * dt).collect();
        let discount_factors = curve.discount_factors_at(&sample_times)?;

        let columns = DriftCalibrator::new(&geometry, &probabilities).calibrate(&discount_factors)?;

        tracing::debug!(
            dt,
            dx = geometry.dx(),
            jmax = geometry.jmax(),
            columns = n + 1,
            "built trinomial lattice"
        );

        Ok(Self {
            params: *params,
            geometry,
            curve: curve.clone(),
            probabilities,
            discount_factors,
            alpha: columns.alpha,
            rates: columns.rates,
            state_prices: columns.state_prices,
        })
    }

    /// Model parameters the lattice was built with.
    #[must_use]
    pub fn params(&self) -> &HullWhiteParams {
        &self.params
    }

    /// Shape of the lattice.
    #[must_use]
    pub fn geometry(&self) -> &LatticeGeometry {
        &self.geometry
    }

    /// The curve the lattice is calibrated to.
    #[must_use]
    pub fn curve(&self) -> &DiscountCurve {
        &self.curve
    }

    /// Time step in years.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.geometry.dt()
    }

    /// Horizon in years.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        self.geometry.horizon()
    }

    /// Number of time steps `N`; rate columns are `0..=N`.
    #[must_use]
    pub fn num_steps(&self) -> usize {
        self.geometry.num_steps()
    }

    /// Largest state index.
    #[must_use]
    pub fn jmax(&self) -> usize {
        self.geometry.jmax()
    }

    /// Spacing between adjacent rate states.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.geometry.dx()
    }

    /// Calibrated drift of column `m`.
    #[must_use]
    pub fn alpha(&self, m: usize) -> Option<f64> {
        self.alpha.get(m).copied()
    }

    /// Calibrated drifts of all columns.
    #[must_use]
    pub fn alphas(&self) -> &[f64] {
        &self.alpha
    }

    /// Short rate at node `(m, j)`, if the node exists.
    #[must_use]
    pub fn rate(&self, m: usize, j: i64) -> Option<f64> {
        if m > self.num_steps() || !self.states_at(m).contains(&j) {
            return None;
        }
        Some(self.rates[[m, self.geometry.index(j)]])
    }

    /// Arrow-Debreu price of node `(m, j)` for `m = 0..=N + 1`.
    #[must_use]
    pub fn state_price(&self, m: usize, j: i64) -> Option<f64> {
        if m > self.num_steps() + 1 || !self.states_at(m).contains(&j) {
            return None;
        }
        Some(self.state_prices[[m, self.geometry.index(j)]])
    }

    /// Branch probabilities of state `j`, if some column branches from it.
    #[must_use]
    pub fn probabilities(&self, j: i64) -> Option<BranchProbabilities> {
        if j.unsigned_abs() as usize > self.jmax() {
            return None;
        }
        self.probabilities[self.geometry.index(j)]
    }

    /// Branching pattern of state `j`.
    #[must_use]
    pub fn branch_type(&self, j: i64) -> BranchType {
        self.geometry.branch_type(j)
    }

    /// Time of column `m` in years.
    #[must_use]
    pub fn time_at(&self, m: usize) -> f64 {
        m as f64 * self.dt()
    }

    /// Curve discount factor `P(0, m dt)` for `m = 0..=N + 1`.
    #[must_use]
    pub fn discount_factor_at(&self, m: usize) -> Option<f64> {
        self.discount_factors.get(m).copied()
    }

    /// States reachable at column `m`.
    #[must_use]
    pub fn states_at(&self, m: usize) -> RangeInclusive<i64> {
        self.geometry.states(m)
    }

    /// Short-rate arena, shape `(N + 1, 2 jmax + 1)`.
    #[must_use]
    pub fn rates(&self) -> &Array2<f64> {
        &self.rates
    }

    /// Arrow-Debreu arena, shape `(N + 2, 2 jmax + 1)`.
    #[must_use]
    pub fn state_prices(&self) -> &Array2<f64> {
        &self.state_prices
    }

    /// Nearest column to time `t`.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameter`] for a negative or non-finite time and
    /// [`ModelError::BeyondHorizon`] when the nearest column is past `N`.
    pub fn step_for_time(&self, t: f64) -> ModelResult<usize> {
        if !t.is_finite() || t < 0.0 {
            return Err(ModelError::invalid_parameter(
                "time",
                t,
                "must be finite and non-negative",
            ));
        }
        let step = (t / self.dt()).round();
        if step > self.num_steps() as f64 {
            return Err(ModelError::BeyondHorizon {
                time: t,
                horizon: self.horizon(),
            });
        }
        Ok(step as usize)
    }

    /// Present value of a payoff held in a dense column at step `m`, using
    /// the Arrow-Debreu prices of that column.
    #[must_use]
    pub fn present_value_at(&self, m: usize, values: &[f64]) -> f64 {
        self.state_prices
            .row(m)
            .iter()
            .zip(values)
            .map(|(q, v)| q * v)
            .sum()
    }

    /// Largest relative deviation, over columns `0..=N`, between
    /// `Σ_j Q(m, j) exp(-r(m, j) dt)` and `P(0, (m + 1) dt)`.
    #[must_use]
    pub fn curve_reproduction_error(&self) -> f64 {
        let dt = self.dt();
        (0..=self.num_steps())
            .map(|m| {
                let discounts = self.rates.row(m).mapv(|r| (-r * dt).exp());
                let implied = (&self.state_prices.row(m) * &discounts).sum();
                (implied / self.discount_factors[m + 1] - 1.0).abs()
            })
            .fold(0.0, f64::max)
    }
}
