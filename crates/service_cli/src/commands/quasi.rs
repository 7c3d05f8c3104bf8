//! Quasi command implementation
//!
//! Evaluates the deterministic midpoint grid; no seed is involved.

use std::time::{Duration, Instant};

use mcpi_core::quasi_mcpi;
use tracing::info;

use super::Report;
use crate::Result;

/// Run the quasi command
pub fn run(n_intervals: u64) -> Result<()> {
    info!(n_intervals, "Starting quasi Monte Carlo estimation");
    let started = Instant::now();
    let estimate = quasi_mcpi(n_intervals)?;
    let elapsed: Duration = started.elapsed();

    Report {
        method: format!("quasi(n_intervals={})", n_intervals),
        n_samples: n_intervals.saturating_mul(n_intervals),
        estimate,
        std_error: None,
        elapsed,
    }
    .emit()
}
