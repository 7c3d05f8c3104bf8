//! CLI error types

use mcpi_core::McpiError;
use mcpi_exec::ExecError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors reported by the `mcpi` binary
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded or were invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A strategy failed to plan, run or reduce
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// The estimator kernel rejected its arguments
    #[error(transparent)]
    Core(#[from] McpiError),

    /// Writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
