//! CLI command implementations.

pub mod bond_option;
pub mod callable;
pub mod converge;
pub mod tree;
pub mod zcb_option;

// Re-export submodules for convenience
pub use bond_option::BondOptionArgs;
pub use callable::CallableArgs;
pub use converge::ConvergeArgs;
pub use tree::TreeArgs;
pub use zcb_option::ZcbOptionArgs;

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use shortrate_models::OptionValue;
use tabled::Tabled;

use crate::config::Scenario;
use crate::error::CliResult;
use crate::output::format_price;

/// Arguments shared by every scenario command.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Scenario file (TOML)
    #[arg(short, long, env = "SHORTRATE_SCENARIO")]
    pub config: PathBuf,

    /// Override the number of lattice time steps
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,
}

impl ScenarioArgs {
    /// Loads the scenario file.
    pub fn load(&self) -> CliResult<Scenario> {
        let scenario = Scenario::from_file(&self.config)?;
        tracing::debug!(path = %self.config.display(), "loaded scenario");
        Ok(scenario)
    }
}

/// Call and put values from one pricing method.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PriceRow {
    #[tabled(rename = "Method")]
    pub method: String,
    #[tabled(rename = "Call", display_with = "format_price")]
    pub call: f64,
    #[tabled(rename = "Put", display_with = "format_price")]
    pub put: f64,
}

impl PriceRow {
    /// Creates a row from an option value.
    pub fn new(method: impl Into<String>, value: OptionValue) -> Self {
        Self {
            method: method.into(),
            call: value.call,
            put: value.put,
        }
    }
}
