//! Forward induction fitting the lattice drift to the discount curve.

use ndarray::Array2;

use crate::error::{ModelError, ModelResult};
use crate::lattice::geometry::{BranchProbabilities, LatticeGeometry};

/// Arrays produced by calibration, indexed `[step, geometry.index(j)]`.
#[derive(Debug, Clone)]
pub(crate) struct CalibratedColumns {
    /// Drift `alpha(m)` per column `0..=N`.
    pub alpha: Vec<f64>,
    /// Short rates `alpha(m) + j dx`, shape `(N + 1, width)`.
    pub rates: Array2<f64>,
    /// Arrow-Debreu prices, shape `(N + 2, width)`.
    pub state_prices: Array2<f64>,
}

/// Fits `alpha(m)` column by column so that
/// `Σ_j Q(m, j) exp(-r(m, j) dt) = P(0, (m + 1) dt)`.
///
/// Given the state prices of column `m`, the condition is linear in
/// `exp(-alpha(m) dt)` and is solved in closed form:
///
/// ```text
/// alpha(m) = ln( Σ_j Q(m, j) exp(-j dx dt) / P(0, (m + 1) dt) ) / dt
/// ```
///
/// after which `Q` is pushed forward to column `m + 1`.
pub(crate) struct DriftCalibrator<'a> {
    geometry: &'a LatticeGeometry,
    probabilities: &'a [Option<BranchProbabilities>],
}

impl<'a> DriftCalibrator<'a> {
    pub(crate) fn new(
        geometry: &'a LatticeGeometry,
        probabilities: &'a [Option<BranchProbabilities>],
    ) -> Self {
        Self {
            geometry,
            probabilities,
        }
    }

    /// Runs the forward induction.
    ///
    /// `discount_factors[m]` is `P(0, m dt)` for `m = 0..=N + 1`.
    pub(crate) fn calibrate(&self, discount_factors: &[f64]) -> ModelResult<CalibratedColumns> {
        let g = self.geometry;
        let n = g.num_steps();
        let width = g.width();
        let dt = g.dt();
        let dx = g.dx();

        debug_assert_eq!(discount_factors.len(), n + 2);

        let mut alpha = Vec::with_capacity(n + 1);
        let mut rates = Array2::<f64>::zeros((n + 1, width));
        let mut state_prices = Array2::<f64>::zeros((n + 2, width));
        state_prices[[0, g.index(0)]] = 1.0;

        for m in 0..=n {
            let weighted: f64 = g
                .states(m)
                .map(|j| state_prices[[m, g.index(j)]] * (-(j as f64) * dx * dt).exp())
                .sum();
            let target = discount_factors[m + 1];
            let alpha_m = (weighted / target).ln() / dt;

            if !alpha_m.is_finite() {
                return Err(ModelError::calibration_failure(
                    m,
                    0,
                    format!(
                        "non-finite drift from state price sum {weighted:e} and discount factor {target:e}"
                    ),
                ));
            }
            alpha.push(alpha_m);
            tracing::trace!(step = m, alpha = alpha_m, "calibrated lattice column");

            for j in g.states(m) {
                let slot = g.index(j);
                let r = alpha_m + j as f64 * dx;
                rates[[m, slot]] = r;

                let p = self.probabilities[slot].ok_or_else(|| {
                    ModelError::calibration_failure(m, j, "state has no branch probabilities")
                })?;
                let discounted = state_prices[[m, slot]] * (-r * dt).exp();
                for (child, prob) in g.children(j).into_iter().zip(p.as_array()) {
                    state_prices[[m + 1, g.index(child)]] += discounted * prob;
                }
            }
        }

        Ok(CalibratedColumns {
            alpha,
            rates,
            state_prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HullWhiteParams;
    use approx::assert_relative_eq;

    fn flat_dfs(rate: f64, dt: f64, count: usize) -> Vec<f64> {
        (0..count).map(|m| (-rate * m as f64 * dt).exp()).collect()
    }

    #[test]
    fn test_first_column_matches_first_discount_factor() {
        let params = HullWhiteParams::new(0.01, 0.1, 4).unwrap();
        let g = LatticeGeometry::new(&params, 2.0).unwrap();
        let probabilities = g.probability_table().unwrap();
        let dfs = flat_dfs(0.05, g.dt(), 6);

        let columns = DriftCalibrator::new(&g, &probabilities).calibrate(&dfs).unwrap();

        assert_relative_eq!(columns.alpha[0], 0.05, epsilon = 1e-14);
        assert_relative_eq!(columns.rates[[0, g.index(0)]], 0.05, epsilon = 1e-14);
        assert_relative_eq!(columns.state_prices[[0, g.index(0)]], 1.0);
    }

    #[test]
    fn test_state_prices_sum_to_discount_factors() {
        let params = HullWhiteParams::new(0.015, 0.2, 25).unwrap();
        let g = LatticeGeometry::new(&params, 5.0).unwrap();
        let probabilities = g.probability_table().unwrap();
        let dfs = flat_dfs(0.04, g.dt(), 27);

        let columns = DriftCalibrator::new(&g, &probabilities).calibrate(&dfs).unwrap();

        for m in 1..=26 {
            let total = columns.state_prices.row(m).sum();
            assert_relative_eq!(total, dfs[m], max_relative = 1e-12);
        }
    }

    #[test]
    fn test_non_finite_drift_reported() {
        let params = HullWhiteParams::new(0.01, 0.1, 2).unwrap();
        let g = LatticeGeometry::new(&params, 1.0).unwrap();
        let probabilities = g.probability_table().unwrap();
        let dfs = vec![1.0, 0.98, 0.0, 0.9];

        let err = DriftCalibrator::new(&g, &probabilities)
            .calibrate(&dfs)
            .unwrap_err();

        assert!(matches!(err, ModelError::CalibrationFailure { step: 1, .. }));
    }
}
