//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BondOptionArgs, CallableArgs, ConvergeArgs, TreeArgs, ZcbOptionArgs};

/// Shortrate - Hull-White trinomial lattice pricing
#[derive(Parser)]
#[command(name = "shortrate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log lattice construction and root searches to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the lattice and show its calibrated drift
    Tree(TreeArgs),

    /// Price the scenario's zero-coupon bond option, analytic and on the tree
    ZcbOption(ZcbOptionArgs),

    /// Price the scenario's coupon bond option with every method
    BondOption(BondOptionArgs),

    /// Value the scenario's callable/puttable bond against the straight bond
    Callable(CallableArgs),

    /// Compare tree and analytic zero-bond option prices across step counts
    Converge(ConvergeArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the first row)
    Minimal,
}
