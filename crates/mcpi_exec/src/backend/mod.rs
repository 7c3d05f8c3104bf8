//! Task execution backends.
//!
//! A backend has exactly one job: run `K` independent, side-effect-free
//! sampling tasks and hand back `K` results in submission order. It blocks
//! until every task has finished; no partial results are returned.
//!
//! # Implementations
//!
//! | Backend | Concurrency | Used by |
//! |---------|-------------|---------|
//! | [`SequentialBackend`] | none, caller thread | gathered strategy |
//! | [`RayonBackend`] | rayon work-stealing pool | gathered strategy |
//! | [`WorkerPoolBackend`] | tokio blocking pool of `n_workers` slots | distributed strategy |
//!
//! All dispatch is static. The trait is generic over the task so a backend
//! can run any `Fn(SampleBatch) -> BatchResult`.

mod sequential;
mod thread_pool;
mod worker_pool;

pub use sequential::SequentialBackend;
pub use thread_pool::RayonBackend;
pub use worker_pool::WorkerPoolBackend;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use mcpi_core::{BatchResult, SampleBatch};

use crate::error::{ExecError, Result};

/// Capability to run independent sampling tasks and collect their results.
pub trait TaskBackend {
    /// Short backend name for logging and error reports.
    fn name(&self) -> &'static str;

    /// Runs `task` once per batch and returns the results in batch order.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Backend`] if the backend cannot be started or a
    /// task does not complete, including a task that panics.
    fn submit<F>(&self, batches: Vec<SampleBatch>, task: F) -> Result<Vec<BatchResult>>
    where
        F: Fn(SampleBatch) -> BatchResult + Send + Sync + Copy + 'static;

    /// Runs every batch through the unit circle sampler.
    fn run_batches(&self, batches: Vec<SampleBatch>) -> Result<Vec<BatchResult>> {
        self.submit(batches, SampleBatch::run)
    }
}

/// Runs one task, turning a panic into its message.
pub(crate) fn run_caught<F>(
    task: F,
    batch: SampleBatch,
) -> std::result::Result<BatchResult, String>
where
    F: Fn(SampleBatch) -> BatchResult,
{
    panic::catch_unwind(AssertUnwindSafe(|| task(batch))).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => format!("task panicked: {}", message),
        Err(payload) => match payload.downcast_ref::<&'static str>() {
            Some(message) => format!("task panicked: {}", message),
            None => "task panicked".to_string(),
        },
    }
}

/// In-process backend choice for the gathered strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalBackend {
    /// Run batches one after another on the calling thread.
    #[default]
    Sequential,
    /// Run batches on a rayon pool; `None` uses the global pool.
    Rayon {
        /// Dedicated pool size.
        n_threads: Option<usize>,
    },
}

impl TaskBackend for LocalBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::Sequential => SequentialBackend.name(),
            Self::Rayon { .. } => "rayon",
        }
    }

    fn submit<F>(&self, batches: Vec<SampleBatch>, task: F) -> Result<Vec<BatchResult>>
    where
        F: Fn(SampleBatch) -> BatchResult + Send + Sync + Copy + 'static,
    {
        match *self {
            Self::Sequential => SequentialBackend.submit(batches, task),
            Self::Rayon { n_threads } => RayonBackend::new(n_threads).submit(batches, task),
        }
    }
}

impl FromStr for LocalBackend {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sequential" | "serial" => Ok(Self::Sequential),
            "rayon" | "parallel" => Ok(Self::Rayon { n_threads: None }),
            other => Err(ExecError::InvalidConfig {
                name: "backend",
                reason: format!("unknown backend '{}', expected sequential or rayon", other),
            }),
        }
    }
}

impl fmt::Display for LocalBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Rayon { n_threads: None } => write!(f, "rayon"),
            Self::Rayon {
                n_threads: Some(n),
            } => write!(f, "rayon({})", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpi_core::plan_batches;
    use mcpi_core::RemainderPolicy;

    fn batches() -> Vec<SampleBatch> {
        plan_batches(40_000, 8, 7, RemainderPolicy::Distribute).unwrap()
    }

    #[test]
    fn test_backends_agree_in_order() {
        let expected = SequentialBackend.run_batches(batches()).unwrap();

        let rayon = RayonBackend::new(Some(3)).run_batches(batches()).unwrap();
        let global = LocalBackend::Rayon { n_threads: None }
            .run_batches(batches())
            .unwrap();
        let pool = WorkerPoolBackend::new(2).unwrap().run_batches(batches()).unwrap();

        assert_eq!(rayon, expected);
        assert_eq!(global, expected);
        assert_eq!(pool, expected);
    }

    #[test]
    fn test_custom_task() {
        let results = SequentialBackend
            .submit(batches(), |b| {
                BatchResult::new(b.sample_count(), b.sample_count()).unwrap_or_else(|_| b.run())
            })
            .unwrap();
        assert!(results.iter().all(|r| r.inside_count() == r.sample_count()));
    }

    #[test]
    fn test_local_backends_report_panics() {
        for backend in [
            LocalBackend::Sequential,
            LocalBackend::Rayon { n_threads: Some(2) },
        ] {
            let err = backend
                .submit(batches(), |_| panic!("sampler lost"))
                .unwrap_err();
            assert_eq!(
                err,
                ExecError::Backend {
                    backend: backend.name(),
                    message: "task panicked: sampler lost".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_local_backend_parsing() {
        assert_eq!(
            "sequential".parse::<LocalBackend>().unwrap(),
            LocalBackend::Sequential
        );
        assert_eq!(
            "Rayon".parse::<LocalBackend>().unwrap(),
            LocalBackend::Rayon { n_threads: None }
        );
        assert!("dask".parse::<LocalBackend>().is_err());
        assert_eq!(LocalBackend::Rayon { n_threads: Some(4) }.to_string(), "rayon(4)");
    }
}
