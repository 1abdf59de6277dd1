//! CLI error types.

use shortrate_curves::CurveError;
use shortrate_models::ModelError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The scenario file lacks a table the command needs.
    #[error("Scenario has no [{0}] table")]
    MissingSection(&'static str),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The scenario file is not valid TOML for a scenario.
    #[error("Invalid scenario file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Curve construction failed.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Model construction or pricing failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
