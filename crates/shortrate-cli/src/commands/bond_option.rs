//! Coupon bond option command.
//!
//! Prices the `[bond_option]` of a scenario with the expiry-column tree,
//! the full rollback (European and American) and Jamshidian's
//! decomposition.

use anyhow::Result;
use clap::Args;

use shortrate_models::analytic::coupon_bond_option as jamshidian;
use shortrate_models::pricing::{coupon_bond_option, european_coupon_bond_option};
use shortrate_models::{ExerciseStyle, TrinomialLattice};

use crate::cli::OutputFormat;
use crate::commands::{PriceRow, ScenarioArgs};
use crate::output::print_output;

/// Arguments for the bond-option command.
#[derive(Args, Debug)]
pub struct BondOptionArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Steps for the lattice out to the final flow (defaults to the same
    /// step size as the expiry lattice)
    #[arg(long)]
    pub full_steps: Option<usize>,
}

/// Execute the bond-option command.
pub fn execute(args: BondOptionArgs, format: OutputFormat) -> Result<()> {
    let scenario = args.scenario.load()?;
    let option = scenario.bond_option()?;
    let schedule = option.schedule()?;
    let params = scenario.params(args.scenario.steps)?;
    let curve = scenario.curve()?;

    let short = TrinomialLattice::build(&params, option.expiry, &curve)?;
    let fast = european_coupon_bond_option(&short, option.expiry, option.strike, option.face, &schedule)?;

    let final_time = schedule.final_time();
    let full_steps = args.full_steps.unwrap_or_else(|| {
        let scaled = params.num_time_steps() as f64 * final_time / option.expiry;
        scaled.ceil() as usize
    });
    let long = TrinomialLattice::build(&params.with_time_steps(full_steps)?, final_time, &curve)?;
    let european = coupon_bond_option(
        &long,
        option.expiry,
        option.strike,
        option.face,
        &schedule,
        ExerciseStyle::European,
    )?;
    let american = coupon_bond_option(
        &long,
        option.expiry,
        option.strike,
        option.face,
        &schedule,
        ExerciseStyle::American,
    )?;

    let analytic = jamshidian(
        params.sigma(),
        params.mean_reversion(),
        option.expiry,
        option.strike,
        option.face,
        &schedule,
        &curve,
    )?;

    let rows = [
        PriceRow::new("tree, expiry column", fast),
        PriceRow::new("tree, full rollback", european),
        PriceRow::new("tree, american", american),
        PriceRow::new("jamshidian", analytic),
    ];
    print_output("Coupon bond option", &rows, format)
}
