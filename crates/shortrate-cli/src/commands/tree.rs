//! Tree command implementation.
//!
//! Builds the calibrated lattice and reports its geometry and drift.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use shortrate_models::TrinomialLattice;

use crate::cli::OutputFormat;
use crate::commands::ScenarioArgs;
use crate::output::{
    format_error, format_percent, print_header, print_output, print_single, print_table, KeyValue,
};

/// Arguments for the tree command.
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Lattice horizon in years (defaults to [tree] horizon, then the last
    /// curve pillar)
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Number of columns to show in table output
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

/// One lattice column.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ColumnRow {
    #[tabled(rename = "Step")]
    pub step: usize,
    #[tabled(rename = "Time")]
    pub time: f64,
    #[tabled(rename = "Alpha", display_with = "format_percent")]
    pub alpha: f64,
    #[tabled(rename = "States")]
    pub states: usize,
    #[tabled(rename = "Discount Factor")]
    pub discount_factor: f64,
}

/// Lattice summary for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub steps: usize,
    pub horizon: f64,
    pub dt: f64,
    pub dx: f64,
    pub jmax: usize,
    pub curve_reproduction_error: f64,
    pub columns: Vec<ColumnRow>,
}

/// Execute the tree command.
pub fn execute(args: TreeArgs, format: OutputFormat) -> Result<()> {
    let scenario = args.scenario.load()?;
    let params = scenario.params(args.scenario.steps)?;
    let curve = scenario.curve()?;
    let horizon = args
        .horizon
        .or(scenario.tree.horizon)
        .unwrap_or_else(|| curve.max_time());

    let lattice = TrinomialLattice::build(&params, horizon, &curve)?;
    let summary = summarize(&lattice);

    match format {
        OutputFormat::Table => {
            print_header("Lattice");
            print_table(&[
                KeyValue::new("Steps", summary.steps.to_string()),
                KeyValue::from_f64("Horizon", summary.horizon, 4),
                KeyValue::from_f64("dt", summary.dt, 6),
                KeyValue::from_f64("dx", summary.dx, 6),
                KeyValue::new("jmax", summary.jmax.to_string()),
                KeyValue::new(
                    "Curve reproduction error",
                    format_error(&summary.curve_reproduction_error),
                ),
            ]);
            let shown = summary.columns.len().min(args.limit);
            print_output("Drift by column", &summary.columns[..shown], format)?;
            if shown < summary.columns.len() {
                println!("... {} more columns", summary.columns.len() - shown);
            }
        }
        OutputFormat::Json => print_single(&summary, format)?,
        OutputFormat::Csv | OutputFormat::Minimal => {
            print_output("Drift by column", &summary.columns, format)?;
        }
    }

    Ok(())
}

fn summarize(lattice: &TrinomialLattice) -> TreeSummary {
    let columns = lattice
        .alphas()
        .iter()
        .enumerate()
        .map(|(m, &alpha)| ColumnRow {
            step: m,
            time: lattice.time_at(m),
            alpha,
            states: lattice.states_at(m).count(),
            discount_factor: lattice.discount_factor_at(m).unwrap_or(f64::NAN),
        })
        .collect();

    TreeSummary {
        steps: lattice.num_steps(),
        horizon: lattice.horizon(),
        dt: lattice.dt(),
        dx: lattice.dx(),
        jmax: lattice.jmax(),
        curve_reproduction_error: lattice.curve_reproduction_error(),
        columns,
    }
}
