//! Callable/puttable bond command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use shortrate_models::pricing::callable_puttable_bond;
use shortrate_models::TrinomialLattice;

use crate::cli::OutputFormat;
use crate::commands::ScenarioArgs;
use crate::output::{format_price, print_output};

/// Arguments for the callable command.
#[derive(Args, Debug)]
pub struct CallableArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

/// A named bond value.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ValueRow {
    #[tabled(rename = "Instrument")]
    pub instrument: &'static str,
    #[tabled(rename = "Value", display_with = "format_price")]
    pub value: f64,
}

/// Execute the callable command.
pub fn execute(args: CallableArgs, format: OutputFormat) -> Result<()> {
    let scenario = args.scenario.load()?;
    let bond = scenario.callable_bond()?;
    let (schedule, calls, puts) = bond.schedules()?;
    let params = scenario.params(args.scenario.steps)?;
    let curve = scenario.curve()?;

    let lattice = TrinomialLattice::build(&params, schedule.final_time(), &curve)?;
    let value = callable_puttable_bond(&lattice, &schedule, &calls, &puts, bond.face)?;

    let rows = [
        ValueRow {
            instrument: "with options",
            value: value.with_options,
        },
        ValueRow {
            instrument: "straight",
            value: value.straight,
        },
        ValueRow {
            instrument: "embedded options",
            value: value.option_value(),
        },
    ];
    print_output("Callable/puttable bond", &rows, format)
}
