//! Shortrate CLI - runs Hull-White lattice pricing scenarios.
//!
//! # Usage
//!
//! ```bash
//! # Lattice geometry and calibrated drift
//! shortrate tree --config scenarios/hull_zero_bond.toml
//!
//! # Zero-coupon bond option, analytic and tree
//! shortrate zcb-option --config scenarios/hull_zero_bond.toml --steps 490
//!
//! # Coupon bond option by every method, as JSON
//! shortrate --format json bond-option --config scenarios/bond_option.toml
//!
//! # Callable/puttable bond
//! shortrate callable --config scenarios/callable_bond.toml
//!
//! # Tree error against the closed form across step counts
//! shortrate converge --config scenarios/hull_zero_bond.toml --sweep 100,200,400
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "shortrate=debug,shortrate_models=debug,shortrate_curves=debug,shortrate_math=debug"
    } else {
        "warn"
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table/JSON/CSV output on stdout stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Tree(args) => commands::tree::execute(args, format)?,
        Commands::ZcbOption(args) => commands::zcb_option::execute(args, format)?,
        Commands::BondOption(args) => commands::bond_option::execute(args, format)?,
        Commands::Callable(args) => commands::callable::execute(args, format)?,
        Commands::Converge(args) => commands::converge::execute(args, format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_covers_every_library() {
        let filter = default_filter(true);
        for target in ["shortrate_models", "shortrate_curves", "shortrate_math"] {
            assert!(filter.contains(&format!("{target}=debug")), "{target} missing");
        }
        assert_eq!(default_filter(false), "warn");
    }
}
