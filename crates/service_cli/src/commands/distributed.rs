//! Distributed command implementation
//!
//! Submits one task per job to a fixed-size worker pool and waits for all of
//! them before reducing.

use mcpi_exec::Strategy;
use tracing::info;

use crate::config::CliSettings;
use crate::Result;

/// Run the distributed command
pub fn run(settings: &CliSettings) -> Result<()> {
    info!(
        n_samples = settings.n_samples,
        seed = settings.seed,
        n_jobs = settings.n_jobs,
        n_workers = settings.n_workers,
        "Starting distributed estimation"
    );
    let config = settings.strategy_config(Strategy::Distributed {
        n_jobs: settings.n_jobs,
        n_workers: settings.n_workers,
    })?;
    super::run_strategy(&config)
}
