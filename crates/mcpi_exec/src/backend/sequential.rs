//! Single-threaded backend.

use mcpi_core::{BatchResult, SampleBatch};
use tracing::trace;

use super::{run_caught, TaskBackend};
use crate::error::{ExecError, Result};

/// Runs every task on the calling thread, in order.
///
/// The first panicking task stops the run with [`ExecError::Backend`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialBackend;

impl TaskBackend for SequentialBackend {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn submit<F>(&self, batches: Vec<SampleBatch>, task: F) -> Result<Vec<BatchResult>>
    where
        F: Fn(SampleBatch) -> BatchResult + Send + Sync + Copy + 'static,
    {
        batches
            .into_iter()
            .enumerate()
            .map(|(index, batch)| {
                let result =
                    run_caught(task, batch).map_err(|e| ExecError::backend(self.name(), e))?;
                trace!(index, inside = result.inside_count(), "batch complete");
                Ok(result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpi_core::{plan_batches, RemainderPolicy};

    #[test]
    fn test_results_in_batch_order() {
        let batches = plan_batches(3_000, 3, 5, RemainderPolicy::Reject).unwrap();
        let expected: Vec<_> = batches.iter().map(|b| b.run()).collect();
        assert_eq!(SequentialBackend.run_batches(batches).unwrap(), expected);
    }

    #[test]
    fn test_panicking_task_is_backend_error() {
        let batches = plan_batches(100, 2, 1, RemainderPolicy::Reject).unwrap();
        let err = SequentialBackend
            .submit(batches, |_| panic!("worker lost"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExecError::Backend {
                backend: "sequential",
                ..
            }
        ));
        assert!(err.to_string().contains("worker lost"));
    }
}
