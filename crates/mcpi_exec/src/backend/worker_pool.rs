//! Worker pool backend for the distributed strategy.
//!
//! Each task is submitted to a tokio runtime's blocking pool, capped at
//! `n_workers` concurrent slots, and the caller blocks until every task
//! handle has resolved. Handles are awaited in submission order.
//!
//! A panicking task surfaces as [`ExecError::Backend`]; it is reported, not
//! retried.

use mcpi_core::{BatchResult, McpiError, SampleBatch};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, trace};

use super::TaskBackend;
use crate::error::{ExecError, Result};

/// Fixed-size pool of worker slots executing independent sampling tasks.
///
/// # Panics
///
/// [`TaskBackend::submit`] blocks on its own runtime and therefore must not
/// be called from inside another tokio runtime.
#[derive(Debug)]
pub struct WorkerPoolBackend {
    n_workers: usize,
    runtime: Runtime,
}

impl WorkerPoolBackend {
    /// Starts a pool with `n_workers` execution slots.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Core`] with an invalid `n_workers` argument if it
    /// is zero, or [`ExecError::Backend`] if the runtime cannot be built.
    pub fn new(n_workers: usize) -> Result<Self> {
        if n_workers == 0 {
            return Err(McpiError::invalid("n_workers", "must be positive").into());
        }
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(n_workers)
            .thread_name("mcpi-worker")
            .build()
            .map_err(|e| ExecError::backend("worker_pool", e))?;
        debug!(n_workers, "worker pool started");
        Ok(Self { n_workers, runtime })
    }

    /// Returns the number of execution slots.
    #[inline]
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }
}

impl TaskBackend for WorkerPoolBackend {
    fn name(&self) -> &'static str {
        "worker_pool"
    }

    fn submit<F>(&self, batches: Vec<SampleBatch>, task: F) -> Result<Vec<BatchResult>>
    where
        F: Fn(SampleBatch) -> BatchResult + Send + Sync + Copy + 'static,
    {
        let name = self.name();
        self.runtime.block_on(async move {
            let handles: Vec<_> = batches
                .into_iter()
                .map(|batch| tokio::task::spawn_blocking(move || task(batch)))
                .collect();

            let mut results = Vec::with_capacity(handles.len());
            // full barrier: every handle is awaited before reduction
            for (index, handle) in handles.into_iter().enumerate() {
                let result = handle.await.map_err(|e| ExecError::backend(name, e))?;
                trace!(index, inside = result.inside_count(), "task complete");
                results.push(result);
            }
            Ok(results)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpi_core::{plan_batches, RemainderPolicy};

    #[test]
    fn test_zero_workers_rejected() {
        match WorkerPoolBackend::new(0) {
            Err(ExecError::Core(err)) => assert_eq!(err.parameter(), "n_workers"),
            other => panic!("expected invalid n_workers, got {:?}", other),
        }
    }

    #[test]
    fn test_panicking_task_is_backend_error() {
        let pool = WorkerPoolBackend::new(2).unwrap();
        let batches = plan_batches(100, 2, 1, RemainderPolicy::Reject).unwrap();
        let err = pool
            .submit(batches, |_| panic!("worker lost"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExecError::Backend {
                backend: "worker_pool",
                ..
            }
        ));
    }

    #[test]
    fn test_more_jobs_than_workers() {
        let pool = WorkerPoolBackend::new(2).unwrap();
        assert_eq!(pool.n_workers(), 2);
        let batches = plan_batches(16_000, 16, 3, RemainderPolicy::Reject).unwrap();
        let results = pool.run_batches(batches).unwrap();
        assert_eq!(results.len(), 16);
        assert!(results.iter().all(|r| r.sample_count() == 1_000));
    }
}
