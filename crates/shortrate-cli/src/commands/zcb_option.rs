//! Zero-coupon bond option command.
//!
//! Prices the `[zero_bond_option]` of a scenario in closed form and on the
//! lattice.

use anyhow::Result;
use clap::Args;

use shortrate_models::analytic::zero_coupon_bond_option;
use shortrate_models::pricing::european_zero_coupon_bond_option;
use shortrate_models::TrinomialLattice;

use crate::cli::OutputFormat;
use crate::commands::{PriceRow, ScenarioArgs};
use crate::output::{print_output, print_warning};

/// Arguments for the zcb-option command.
#[derive(Args, Debug)]
pub struct ZcbOptionArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Build the lattice out to the bond maturity and roll the bond back,
    /// instead of stopping at the option expiry
    #[arg(long)]
    pub to_maturity: bool,
}

/// Execute the zcb-option command.
pub fn execute(args: ZcbOptionArgs, format: OutputFormat) -> Result<()> {
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

    let horizon = if args.to_maturity {
        option.maturity
    } else {
        option.expiry
    };
    let lattice = TrinomialLattice::build(&params, horizon, &curve)?;
    let expiry_step = lattice.step_for_time(option.expiry)?;
    if (lattice.time_at(expiry_step) - option.expiry).abs() > 1e-9 {
        print_warning(&format!(
            "expiry {} falls between lattice steps; using t = {:.6}",
            option.expiry,
            lattice.time_at(expiry_step)
        ));
    }
    let tree = european_zero_coupon_bond_option(
        &lattice,
        option.expiry,
        option.maturity,
        option.strike,
        option.face,
    )?;

    let rows = [
        PriceRow::new("analytic", analytic),
        PriceRow::new(format!("tree ({} steps)", params.num_time_steps()), tree),
    ];
    print_output("Zero-coupon bond option", &rows, format)
}
