//! Shape and branching of the trinomial lattice.
//!
//! The lattice is built on the mean-reverting factor `x` with `x(0) = 0`
//! and `dx = -a x dt + σ dW`; the short rate is `r = alpha(t) + x`. States
//! are integer multiples of `dx = σ √(3 dt)`. The number of reachable states
//! grows by one on each side per step until `|j| = jmax`, after which the
//! edge states branch inwards and the width stays constant.

use std::ops::RangeInclusive;

use crate::error::{require_positive, ModelError, ModelResult};
use crate::params::HullWhiteParams;

/// `jmax = ceil(JMAX_COEFFICIENT / (a dt))`, the smallest edge at which the
/// normal branch probabilities start to deteriorate.
pub const JMAX_COEFFICIENT: f64 = 0.184;

/// Branch probabilities this far outside `[0, 1]` are clamped rather than
/// reported.
pub const PROBABILITY_TOLERANCE: f64 = 1e-12;

/// Branching pattern of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchType {
    /// Interior state: children `j+1, j, j-1`.
    Normal,
    /// Bottom edge (`j = -jmax`): children `j+2, j+1, j`.
    UpShift,
    /// Top edge (`j = +jmax`): children `j, j-1, j-2`.
    DownShift,
}

impl BranchType {
    /// Offsets of the up, middle and down children from the parent state.
    #[must_use]
    pub fn child_offsets(self) -> [i64; 3] {
        match self {
            Self::Normal => [1, 0, -1],
            Self::UpShift => [2, 1, 0],
            Self::DownShift => [0, -1, -2],
        }
    }
}

/// Transition probabilities to the up, middle and down children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchProbabilities {
    /// Probability of moving to the up child.
    pub up: f64,
    /// Probability of moving to the middle child.
    pub mid: f64,
    /// Probability of moving to the down child.
    pub down: f64,
}

impl BranchProbabilities {
    /// Moment-matching probabilities for a branch type, with
    /// `x = a j dt` the expected mean reversion over one step in units of
    /// the state spacing.
    #[must_use]
    pub fn moment_matched(branch: BranchType, x: f64) -> Self {
        let x2 = x * x;
        match branch {
            BranchType::Normal => Self {
                up: 1.0 / 6.0 + 0.5 * (x2 - x),
                mid: 2.0 / 3.0 - x2,
                down: 1.0 / 6.0 + 0.5 * (x2 + x),
            },
            BranchType::DownShift => Self {
                up: 7.0 / 6.0 + 0.5 * (x2 - 3.0 * x),
                mid: -1.0 / 3.0 - x2 + 2.0 * x,
                down: 1.0 / 6.0 + 0.5 * (x2 - x),
            },
            BranchType::UpShift => Self {
                up: 1.0 / 6.0 + 0.5 * (x2 + x),
                mid: -1.0 / 3.0 - x2 - 2.0 * x,
                down: 7.0 / 6.0 + 0.5 * (x2 + 3.0 * x),
            },
        }
    }

    /// Sum of the three probabilities.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.up + self.mid + self.down
    }

    /// Probabilities in `[up, mid, down]` order, matching
    /// [`BranchType::child_offsets`].
    #[must_use]
    pub fn as_array(&self) -> [f64; 3] {
        [self.up, self.mid, self.down]
    }
}

/// Discretisation of a lattice over `[0, horizon]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeGeometry {
    num_steps: usize,
    horizon: f64,
    dt: f64,
    dx: f64,
    jmax: usize,
    mean_reversion: f64,
}

impl LatticeGeometry {
    /// Lays out a lattice with the parameters' step count over `horizon`.
    ///
    /// `jmax` is capped at `num_steps + 1` so that without mean reversion the
    /// diamond never closes.
    pub fn new(params: &HullWhiteParams, horizon: f64) -> ModelResult<Self> {
        require_positive("horizon", horizon)?;
        params.validate()?;

        let num_steps = params.num_time_steps();
        let dt = horizon / num_steps as f64;
        let dx = params.sigma() * (3.0 * dt).sqrt();
        let a_dt = params.mean_reversion() * dt;

        let uncapped = if a_dt > 0.0 {
            (JMAX_COEFFICIENT / a_dt).ceil()
        } else {
            f64::INFINITY
        };
        let cap = num_steps + 1;
        let jmax = if uncapped < cap as f64 {
            (uncapped as usize).max(1)
        } else {
            cap
        };

        Ok(Self {
            num_steps,
            horizon,
            dt,
            dx,
            jmax,
            mean_reversion: params.mean_reversion(),
        })
    }

    /// Number of time steps.
    #[must_use]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Horizon in years.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Time step in years.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Spacing between adjacent states.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Largest state index.
    #[must_use]
    pub fn jmax(&self) -> usize {
        self.jmax
    }

    /// Number of storage slots per column, `2 jmax + 1`.
    #[must_use]
    pub fn width(&self) -> usize {
        2 * self.jmax + 1
    }

    /// Largest reachable `|j|` at column `m`.
    #[must_use]
    pub fn max_state(&self, m: usize) -> i64 {
        m.min(self.jmax) as i64
    }

    /// States reachable at column `m`.
    #[must_use]
    pub fn states(&self, m: usize) -> RangeInclusive<i64> {
        let n = self.max_state(m);
        -n..=n
    }

    /// Storage slot of state `j`.
    #[must_use]
    pub fn index(&self, j: i64) -> usize {
        (j + self.jmax as i64) as usize
    }

    /// Branching pattern of state `j`.
    #[must_use]
    pub fn branch_type(&self, j: i64) -> BranchType {
        let jmax = self.jmax as i64;
        if j >= jmax {
            BranchType::DownShift
        } else if j <= -jmax {
            BranchType::UpShift
        } else {
            BranchType::Normal
        }
    }

    /// Up, middle and down children of state `j`.
    #[must_use]
    pub fn children(&self, j: i64) -> [i64; 3] {
        self.branch_type(j).child_offsets().map(|k| j + k)
    }

    /// Validated branch probabilities of state `j`.
    ///
    /// Values within [`PROBABILITY_TOLERANCE`] of `[0, 1]` are clamped.
    pub fn probabilities(&self, j: i64) -> ModelResult<BranchProbabilities> {
        let x = self.mean_reversion * j as f64 * self.dt;
        let raw = BranchProbabilities::moment_matched(self.branch_type(j), x);

        let clamp = |name: &str, p: f64| -> ModelResult<f64> {
            if (0.0..=1.0).contains(&p) {
                Ok(p)
            } else if p >= -PROBABILITY_TOLERANCE && p <= 1.0 + PROBABILITY_TOLERANCE {
                Ok(p.clamp(0.0, 1.0))
            } else {
                Err(ModelError::calibration_failure(
                    j.unsigned_abs() as usize,
                    j,
                    format!("{name} = {p:.6} outside [0, 1] with a*j*dt = {x:.6}"),
                ))
            }
        };

        Ok(BranchProbabilities {
            up: clamp("pu", raw.up)?,
            mid: clamp("pm", raw.mid)?,
            down: clamp("pd", raw.down)?,
        })
    }

    /// Validated probabilities for every slot that some column `0..=N`
    /// branches from; slots that are never branched from hold `None`.
    pub fn probability_table(&self) -> ModelResult<Vec<Option<BranchProbabilities>>> {
        let reach = self.max_state(self.num_steps);
        let mut table = vec![None; self.width()];
        for j in -reach..=reach {
            table[self.index(j)] = Some(self.probabilities(j)?);
        }
        Ok(table)
    }
}
