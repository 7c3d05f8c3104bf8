//! Error types for execution strategies.

use mcpi_core::McpiError;
use thiserror::Error;

/// Errors raised while planning, dispatching or reducing batches.
///
/// Contract violations from the kernel pass through unchanged as
/// [`ExecError::Core`]. Backend failures are reported as
/// [`ExecError::Backend`] and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Kernel contract violation (invalid counts, seeds or reductions).
    #[error(transparent)]
    Core(#[from] McpiError),

    /// Strategy configuration rejected by the builder.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Field name.
        name: &'static str,
        /// Description of the violated requirement.
        reason: String,
    },

    /// The execution backend failed to build or to complete a task.
    #[error("Backend '{backend}' failed: {message}")]
    Backend {
        /// Backend name.
        backend: &'static str,
        /// Failure description reported by the backend.
        message: String,
    },
}

impl ExecError {
    pub(crate) fn backend(backend: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            backend,
            message: message.to_string(),
        }
    }
}

/// Result alias for execution operations.
pub type Result<T> = std::result::Result<T, ExecError>;
