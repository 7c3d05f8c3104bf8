//! Execution strategies over one shared reduction.
//!
//! ```text
//! Strategy
//! ├── Serial       one batch, caller thread
//! ├── Gathered     n_batches seeded batches on a LocalBackend
//! └── Distributed  n_jobs seeded batches on a WorkerPoolBackend(n_workers)
//!          │
//!          └── plan_batches() ── TaskBackend::run_batches() ── summarise()
//! ```
//!
//! The strategies differ only in how batches are scheduled. Seeding,
//! partitioning and the weighted reduction are shared. Child seeds are
//! spawned only when the work is split into more than one batch, so a serial
//! run and a one-batch gathered or distributed run with the same seed
//! produce the same estimate.

use std::fmt;

use mcpi_core::{plan_batches, summarise, PiEstimate, RemainderPolicy, SampleBatch, Seed};
use tracing::{debug, info};

use crate::backend::{LocalBackend, TaskBackend, WorkerPoolBackend};
use crate::error::Result;

/// How sampling work is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// A single batch holding every sample, drawn from `seed` directly.
    #[default]
    Serial,
    /// `n_batches` spawned-seed batches run on an in-process backend.
    Gathered {
        /// Number of batches.
        n_batches: usize,
        /// Backend running the batches.
        backend: LocalBackend,
    },
    /// `n_jobs` spawned-seed batches submitted to a pool of `n_workers` slots.
    Distributed {
        /// Number of tasks submitted.
        n_jobs: usize,
        /// Number of concurrent execution slots.
        n_workers: usize,
    },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::Gathered { n_batches, backend } => {
                write!(f, "gathered(n_batches={}, backend={})", n_batches, backend)
            }
            Self::Distributed { n_jobs, n_workers } => {
                write!(f, "distributed(n_jobs={}, n_workers={})", n_jobs, n_workers)
            }
        }
    }
}

impl Strategy {
    /// Number of batches this strategy splits the work into.
    pub fn n_batches(&self) -> usize {
        match *self {
            Self::Serial => 1,
            Self::Gathered { n_batches, .. } => n_batches,
            Self::Distributed { n_jobs, .. } => n_jobs,
        }
    }

    /// Estimates π from `n_samples` samples rooted at `seed`.
    ///
    /// # Errors
    ///
    /// Kernel contract violations surface as `ExecError::Core`; worker pool
    /// failures as `ExecError::Backend`.
    pub fn estimate(
        &self,
        n_samples: u64,
        seed: Seed,
        remainder: RemainderPolicy,
    ) -> Result<PiEstimate> {
        let batches = self.plan(n_samples, seed, remainder)?;
        debug!(strategy = %self, n_samples, seed, n_batches = batches.len(), "batches planned");

        let results = match *self {
            Self::Serial => batches.into_iter().map(SampleBatch::run).collect(),
            Self::Gathered { backend, .. } => backend.run_batches(batches)?,
            Self::Distributed { n_workers, .. } => {
                WorkerPoolBackend::new(n_workers)?.run_batches(batches)?
            }
        };

        let estimate = summarise(&results)?;
        info!(
            strategy = %self,
            estimate = estimate.value,
            std_error = estimate.std_error,
            "estimate complete"
        );
        Ok(estimate)
    }

    /// Runs the strategy's batches on a caller-supplied backend.
    ///
    /// The strategy's own backend choice is ignored; partitioning and
    /// seeding are unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`Strategy::estimate`].
    pub fn estimate_with<B: TaskBackend>(
        &self,
        backend: &B,
        n_samples: u64,
        seed: Seed,
        remainder: RemainderPolicy,
    ) -> Result<PiEstimate> {
        let batches = self.plan(n_samples, seed, remainder)?;
        debug!(backend = backend.name(), n_batches = batches.len(), "submitting batches");
        let results = backend.run_batches(batches)?;
        Ok(summarise(&results)?)
    }

    fn plan(
        &self,
        n_samples: u64,
        seed: Seed,
        remainder: RemainderPolicy,
    ) -> Result<Vec<SampleBatch>> {
        Ok(match self.n_batches() {
            // a single stream is seeded directly, with no spawning
            1 => vec![SampleBatch::new(n_samples, seed)?],
            n_batches => plan_batches(n_samples, n_batches, seed, remainder)?,
        })
    }
}

/// Estimates π with `n_batches` equal batches, run sequentially.
///
/// Fails with `InvalidArgument` when `n_samples` is not divisible by
/// `n_batches`.
///
/// # Errors
///
/// See [`Strategy::estimate`].
pub fn mcpi_gathered(n_samples: u64, seed: Seed, n_batches: usize) -> Result<f64> {
    let strategy = Strategy::Gathered {
        n_batches,
        backend: LocalBackend::Sequential,
    };
    Ok(strategy
        .estimate(n_samples, seed, RemainderPolicy::Reject)?
        .value)
}

/// Estimates π by submitting `n_jobs` tasks to a pool of `n_workers` slots.
///
/// Uneven splits are distributed over the leading jobs.
///
/// # Errors
///
/// See [`Strategy::estimate`].
pub fn mcpi_distributed(
    n_samples: u64,
    seed: Seed,
    n_jobs: usize,
    n_workers: usize,
) -> Result<f64> {
    let strategy = Strategy::Distributed { n_jobs, n_workers };
    Ok(strategy
        .estimate(n_samples, seed, RemainderPolicy::Distribute)?
        .value)
}
