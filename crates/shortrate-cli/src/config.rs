//! Scenario files.
//!
//! A scenario is a TOML document with the model parameters, the discount
//! curve and any instruments to price:
//!
//! ```toml
//! [model]
//! sigma = 0.01
//! mean_reversion = 0.1
//! num_time_steps = 200
//!
//! [curve]
//! times = [0.0, 1.0, 5.0, 10.0]
//! zero_rates = [0.05, 0.05, 0.05, 0.05]
//!
//! [zero_bond_option]
//! expiry = 3.0
//! maturity = 9.0
//! strike = 63.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use shortrate_curves::DiscountCurve;
use shortrate_models::{CashflowSchedule, EmbeddedOptionSchedule, HullWhiteParams};

use crate::error::{CliError, CliResult};

/// A pricing scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Model parameters.
    pub model: ModelSection,

    /// Discount curve pillars.
    pub curve: CurveSection,

    /// Lattice settings for the `tree` command.
    #[serde(default)]
    pub tree: TreeSection,

    /// Option on a zero-coupon bond.
    pub zero_bond_option: Option<ZeroBondOptionSection>,

    /// Option on a coupon bond.
    pub bond_option: Option<BondOptionSection>,

    /// Bond with embedded call and put schedules.
    pub callable_bond: Option<CallableBondSection>,
}

/// `[model]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Short-rate volatility.
    pub sigma: f64,

    /// Mean reversion speed.
    pub mean_reversion: f64,

    /// Number of lattice time steps
    #[serde(default = "default_time_steps")]
    pub num_time_steps: usize,
}

/// `[curve]` table: times with exactly one of discount factors or
/// continuously compounded zero rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveSection {
    /// Pillar times in years.
    pub times: Vec<f64>,

    /// Discount factors at the pillars.
    pub discount_factors: Option<Vec<f64>>,

    /// Zero rates at the pillars.
    pub zero_rates: Option<Vec<f64>>,
}

/// `[tree]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeSection {
    /// Lattice horizon; defaults to the last curve pillar.
    pub horizon: Option<f64>,
}

/// `[zero_bond_option]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZeroBondOptionSection {
    /// Option expiry in years.
    pub expiry: f64,
    /// Bond maturity in years.
    pub maturity: f64,
    /// Strike on the face basis.
    pub strike: f64,
    /// Bond face.
    #[serde(default = "default_face")]
    pub face: f64,
}

/// `[bond_option]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondOptionSection {
    /// Option expiry in years.
    pub expiry: f64,
    /// Strike on the face basis.
    pub strike: f64,
    /// Bond face.
    #[serde(default = "default_face")]
    pub face: f64,
    /// Coupon payment times in years.
    pub coupon_times: Vec<f64>,
    /// Coupon amounts per unit face.
    pub coupon_flows: Vec<f64>,
}

impl BondOptionSection {
    /// Validated coupon schedule.
    pub fn schedule(&self) -> CliResult<CashflowSchedule> {
        Ok(CashflowSchedule::new(
            self.coupon_times.clone(),
            self.coupon_flows.clone(),
        )?)
    }
}

/// `[callable_bond]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallableBondSection {
    /// Bond face.
    #[serde(default = "default_face")]
    pub face: f64,
    /// Coupon payment times in years.
    pub coupon_times: Vec<f64>,
    /// Coupon amounts per unit face.
    pub coupon_flows: Vec<f64>,
    /// Call dates in years.
    #[serde(default)]
    pub call_times: Vec<f64>,
    /// Call prices on the face basis.
    #[serde(default)]
    pub call_prices: Vec<f64>,
    /// Put dates in years.
    #[serde(default)]
    pub put_times: Vec<f64>,
    /// Put prices on the face basis.
    #[serde(default)]
    pub put_prices: Vec<f64>,
}

impl CallableBondSection {
    /// Validated coupon, call and put schedules.
    pub fn schedules(
        &self,
    ) -> CliResult<(CashflowSchedule, EmbeddedOptionSchedule, EmbeddedOptionSchedule)> {
        Ok((
            CashflowSchedule::new(self.coupon_times.clone(), self.coupon_flows.clone())?,
            EmbeddedOptionSchedule::new(self.call_times.clone(), self.call_prices.clone())?,
            EmbeddedOptionSchedule::new(self.put_times.clone(), self.put_prices.clone())?,
        ))
    }
}

fn default_time_steps() -> usize {
    100
}

fn default_face() -> f64 {
    100.0
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a scenario from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Model parameters, with the step count optionally overridden.
    pub fn params(&self, steps: Option<usize>) -> CliResult<HullWhiteParams> {
        Ok(HullWhiteParams::new(
            self.model.sigma,
            self.model.mean_reversion,
            steps.unwrap_or(self.model.num_time_steps),
        )?)
    }

    /// The discount curve described by `[curve]`.
    pub fn curve(&self) -> CliResult<DiscountCurve> {
        let times = self.curve.times.clone();
        let curve = match (&self.curve.discount_factors, &self.curve.zero_rates) {
            (Some(dfs), None) => DiscountCurve::new(times, dfs.clone())?,
            (None, Some(zeros)) => DiscountCurve::from_zero_rates(times, zeros.clone())?,
            _ => {
                return Err(CliError::Config(
                    "[curve] needs exactly one of discount_factors or zero_rates".to_string(),
                ))
            }
        };
        Ok(curve)
    }

    /// The `[zero_bond_option]` table.
    pub fn zero_bond_option(&self) -> CliResult<&ZeroBondOptionSection> {
        self.zero_bond_option
            .as_ref()
            .ok_or(CliError::MissingSection("zero_bond_option"))
    }

    /// The `[bond_option]` table.
    pub fn bond_option(&self) -> CliResult<&BondOptionSection> {
        self.bond_option
            .as_ref()
            .ok_or(CliError::MissingSection("bond_option"))
    }

    /// The `[callable_bond]` table.
    pub fn callable_bond(&self) -> CliResult<&CallableBondSection> {
        self.callable_bond
            .as_ref()
            .ok_or(CliError::MissingSection("callable_bond"))
    }
}
