//! Gather command implementation
//!
//! Splits the sample budget into independently seeded batches, runs them on
//! a local backend and reduces the counts afterwards.

use mcpi_exec::Strategy;
use tracing::info;

use crate::config::CliSettings;
use crate::Result;

/// Run the gather command
pub fn run(settings: &CliSettings) -> Result<()> {
    info!(
        n_samples = settings.n_samples,
        seed = settings.seed,
        n_batches = settings.n_batches,
        backend = %settings.backend,
        remainder = %settings.remainder,
        "Starting gathered estimation"
    );
    let config = settings.strategy_config(Strategy::Gathered {
        n_batches: settings.n_batches,
        backend: settings.backend,
    })?;
    super::run_strategy(&config)
}
