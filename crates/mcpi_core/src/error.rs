//! Error types for the Monte Carlo pi kernel.
//!
//! Every contract violation in this crate is reported as
//! [`McpiError::InvalidArgument`]. Violations are detected eagerly at the
//! offending call and are never clamped or retried.

use thiserror::Error;

/// Errors produced by the sampling and reduction kernel.
///
/// # Examples
///
/// ```
/// use mcpi_core::McpiError;
///
/// let err = McpiError::invalid("n_samples", "must be positive");
/// assert_eq!(
///     err.to_string(),
///     "Invalid argument 'n_samples': must be positive"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McpiError {
    /// A caller-supplied argument violates the operation's contract.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Description of the violated requirement.
        reason: String,
    },
}

impl McpiError {
    /// Shorthand for constructing [`McpiError::InvalidArgument`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidArgument { name, .. } => name,
        }
    }
}

/// Result alias for kernel operations.
pub type Result<T> = std::result::Result<T, McpiError>;

/// Fails with [`McpiError::InvalidArgument`] unless `value` is non-zero.
#[inline]
pub(crate) fn ensure_positive(name: &'static str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(McpiError::invalid(name, "must be positive"));
    }
    Ok(())
}
