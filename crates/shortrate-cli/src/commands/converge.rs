//! Convergence command.
//!
//! Prices the scenario's zero-coupon bond option on lattices of increasing
//! size and compares each with the closed form. Step counts are priced in
//! parallel, each on its own lattice.

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use tabled::Tabled;

use shortrate_models::analytic::zero_coupon_bond_option;
use shortrate_models::pricing::european_zero_coupon_bond_option;
use shortrate_models::TrinomialLattice;

use crate::cli::OutputFormat;
use crate::commands::ScenarioArgs;
use crate::error::CliResult;
use crate::output::{format_error, format_price, print_output};

/// Arguments for the converge command.
#[derive(Args, Debug)]
pub struct ConvergeArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Step counts to price (comma-separated)
    #[arg(long = "sweep", value_delimiter = ',', default_value = "50,100,200,300,400,500")]
    pub sweep: Vec<usize>,
}

/// Tree price at one step count.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ConvergenceRow {
    #[tabled(rename = "Steps")]
    pub steps: usize,
    #[tabled(rename = "Tree Call", display_with = "format_price")]
    pub tree_call: f64,
    #[tabled(rename = "Tree Put", display_with = "format_price")]
    pub tree_put: f64,
    #[tabled(rename = "Call Error", display_with = "format_error")]
    pub call_error: f64,
    #[tabled(rename = "Put Error", display_with = "format_error")]
    pub put_error: f64,
}

/// Execute the converge command.
pub fn execute(args: ConvergeArgs, format: OutputFormat) -> Result<()> {
    let scenario = args.scenario.load()?;
    let option = scenario.zero_bond_option()?;
    let params = scenario.params(args.scenario.steps)?;
    let curve = scenario.curve()?;

    let analytic = zero_coupon_bond_option(
        params.sigma(),
        params.mean_reversion(),
        option.expiry,
        option.maturity,
        option.strike,
        option.face,
        &curve,
    )?;

    let rows = args
        .sweep
        .par_iter()
        .map(|&steps| -> CliResult<ConvergenceRow> {
            let lattice = TrinomialLattice::build(&params.with_time_steps(steps)?, option.expiry, &curve)?;
            let tree = european_zero_coupon_bond_option(
                &lattice,
                option.expiry,
                option.maturity,
                option.strike,
                option.face,
            )?;
            Ok(ConvergenceRow {
                steps,
                tree_call: tree.call,
                tree_put: tree.put,
                call_error: tree.call - analytic.call,
                put_error: tree.put - analytic.put,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    tracing::debug!(
        analytic_call = analytic.call,
        analytic_put = analytic.put,
        points = rows.len(),
        "convergence sweep finished"
    );

    print_output(
        &format!(
            "Convergence (analytic call {:.6}, put {:.6})",
            analytic.call, analytic.put
        ),
        &rows,
        format,
    )
}
