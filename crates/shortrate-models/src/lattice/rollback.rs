//! Backward induction over a calibrated lattice.

use crate::error::ModelResult;
use crate::lattice::tree::TrinomialLattice;

/// Discounts dense value columns from later to earlier lattice steps.
///
/// A column has one slot per state, indexed by `j + jmax`; slots outside
/// the reachable diamond are ignored on input and zero on output.
#[derive(Debug, Clone, Copy)]
pub struct BackwardInductor<'a> {
    lattice: &'a TrinomialLattice,
}

impl<'a> BackwardInductor<'a> {
    /// Creates an inductor over `lattice`.
    #[must_use]
    pub fn new(lattice: &'a TrinomialLattice) -> Self {
        Self { lattice }
    }

    /// The lattice being rolled back over.
    #[must_use]
    pub fn lattice(&self) -> &'a TrinomialLattice {
        self.lattice
    }

    /// A zeroed column.
    #[must_use]
    pub fn empty_column(&self) -> Vec<f64> {
        vec![0.0; self.lattice.geometry().width()]
    }

    /// A column holding `value(j)` at each state of step `m`.
    pub fn column_at<F>(&self, m: usize, mut value: F) -> Vec<f64>
    where
        F: FnMut(i64) -> f64,
    {
        let g = self.lattice.geometry();
        let mut column = self.empty_column();
        for j in g.states(m) {
            column[g.index(j)] = value(j);
        }
        column
    }

    /// Computes column `m` from column `m + 1`:
    ///
    /// ```text
    /// V(m, j) = exp(-r(m, j) dt) (pu V(m+1, up) + pm V(m+1, mid) + pd V(m+1, down))
    /// ```
    ///
    /// with the children chosen by the state's branch type.
    pub fn step_back(&self, m: usize, next: &[f64], out: &mut [f64]) {
        let g = self.lattice.geometry();
        let dt = g.dt();
        let rates = self.lattice.rates().row(m);

        out.fill(0.0);
        for j in g.states(m) {
            let Some(p) = self.lattice.probabilities(j) else {
                continue;
            };
            let slot = g.index(j);
            let [up, mid, down] = g.children(j).map(|child| next[g.index(child)]);
            out[slot] = (-rates[slot] * dt).exp() * (p.up * up + p.mid * mid + p.down * down);
        }
    }

    /// Rolls `values`, a column at step `from`, back to step `to`.
    ///
    /// After each step `m` is discounted, `rule(m, j, continuation)` gives
    /// the node's final value; use it to add cashflows or apply exercise.
    pub fn roll_back<F>(&self, from: usize, to: usize, mut values: Vec<f64>, mut rule: F) -> Vec<f64>
    where
        F: FnMut(usize, i64, f64) -> f64,
    {
        debug_assert!(to <= from && from <= self.lattice.num_steps());

        let g = self.lattice.geometry();
        let mut scratch = self.empty_column();
        for m in (to..from).rev() {
            self.step_back(m, &values, &mut scratch);
            for j in g.states(m) {
                let slot = g.index(j);
                scratch[slot] = rule(m, j, scratch[slot]);
            }
            std::mem::swap(&mut values, &mut scratch);
        }
        values
    }

    /// Value at the root of a column at step 0.
    #[must_use]
    pub fn root_value(&self, column: &[f64]) -> f64 {
        column[self.lattice.geometry().index(0)]
    }
}

/// Maps `(time, amount)` flows onto lattice steps.
///
/// Each flow goes to the nearest step `n` and is scaled by
/// `P(0, t) / P(0, n dt)` so its present value is unchanged. Flows at
/// `t <= 0` are dropped. The result has one entry per rate column.
pub fn step_cashflows<I>(lattice: &TrinomialLattice, flows: I) -> ModelResult<Vec<f64>>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut by_step = vec![0.0; lattice.num_steps() + 1];
    for (t, amount) in flows {
        if t <= 0.0 {
            continue;
        }
        let n = lattice.step_for_time(t)?;
        let df_flow = lattice.curve().discount_factor(t)?;
        let df_step = lattice.curve().discount_factor(lattice.time_at(n))?;
        by_step[n] += amount * df_flow / df_step;
    }
    Ok(by_step)
}
