//! Rendering of command results to stdout.
//!
//! Tables are for people; JSON, CSV and the one-line minimal form are for
//! scripts, so they carry no headers or colour.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints `rows` under `title` in the requested format.
pub fn print_output<T: Serialize + Tabled>(
    title: &str,
    rows: &[T],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            print_table(rows);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
            Ok(())
        }
        OutputFormat::Csv => write_csv(rows),
        OutputFormat::Minimal => {
            if let Some(first) = rows.first() {
                println!("{}", serde_json::to_string(first)?);
            }
            Ok(())
        }
    }
}

/// Prints one structured record; every format but CSV renders it as JSON.
pub fn print_single<T: Serialize>(record: &T, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Csv {
        write_csv(std::slice::from_ref(record))
    } else {
        println!("{}", serde_json::to_string_pretty(record)?);
        Ok(())
    }
}

/// Prints rows as a rounded table with the first column left-aligned.
pub fn print_table<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        println!("Nothing to show.");
        return;
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();
    println!("{table}");
}

fn write_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Price to six decimals.
pub fn format_price(value: &f64) -> String {
    format!("{value:.6}")
}

/// Rate as a percentage.
pub fn format_percent(value: &f64) -> String {
    format!("{:.4}%", value * 100.0)
}

/// Small differences in scientific notation.
pub fn format_error(value: &f64) -> String {
    format!("{value:.3e}")
}

/// A labelled scalar in a two-column table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Label with preformatted text.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Label with a number printed to `precision` decimals.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(key, format!("{value:.precision$}"))
    }
}

/// Bold underlined section title.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Warning on stderr, kept off the data stream.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}
