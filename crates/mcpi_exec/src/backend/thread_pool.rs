//! Rayon-based local parallel backend.

use mcpi_core::{BatchResult, SampleBatch};
use rayon::prelude::*;

use super::{run_caught, TaskBackend};
use crate::error::{ExecError, Result};

/// Runs tasks on a rayon work-stealing pool.
///
/// With `n_threads = None` the global rayon pool is used; otherwise a
/// dedicated pool of that size is built per submission. Indexed parallel
/// collection keeps results in batch order regardless of completion order.
/// A panicking task fails the run with [`ExecError::Backend`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RayonBackend {
    n_threads: Option<usize>,
}

impl RayonBackend {
    /// Creates a backend, optionally with a dedicated pool size.
    pub fn new(n_threads: Option<usize>) -> Self {
        Self { n_threads }
    }

    /// Returns the dedicated pool size, if any.
    #[inline]
    pub fn n_threads(&self) -> Option<usize> {
        self.n_threads
    }
}

impl TaskBackend for RayonBackend {
    fn name(&self) -> &'static str {
        "rayon"
    }

    fn submit<F>(&self, batches: Vec<SampleBatch>, task: F) -> Result<Vec<BatchResult>>
    where
        F: Fn(SampleBatch) -> BatchResult + Send + Sync + Copy + 'static,
    {
        let run = move || {
            batches
                .into_par_iter()
                .map(|batch| run_caught(task, batch))
                .collect::<std::result::Result<Vec<_>, String>>()
        };
        let results = match self.n_threads {
            None => run(),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("mcpi-rayon-{}", i))
                    .build()
                    .map_err(|e| ExecError::backend(self.name(), e))?;
                pool.install(run)
            }
        };
        results.map_err(|e| ExecError::backend(self.name(), e))
    }
}
