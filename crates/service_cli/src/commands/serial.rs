//! Serial command implementation
//!
//! Draws every sample in one pass on the calling thread.

use mcpi_exec::Strategy;
use tracing::info;

use crate::config::CliSettings;
use crate::Result;

/// Run the serial command
pub fn run(settings: &CliSettings) -> Result<()> {
    info!(n_samples = settings.n_samples, seed = settings.seed, "Starting serial estimation");
    let config = settings.strategy_config(Strategy::Serial)?;
    super::run_strategy(&config)
}
