//! Deterministic partitioning of a sample budget into seeded batches.

use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_positive, McpiError, Result};
use crate::rng::{generate_seeds, Seed};
use crate::sampler::SampleBatch;

/// How a sample budget that does not divide evenly is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RemainderPolicy {
    /// Spread the remainder `r` one sample each over the first `r` batches.
    #[default]
    Distribute,
    /// Fail with `InvalidArgument` unless `n_samples % n_batches == 0`.
    Reject,
}

impl FromStr for RemainderPolicy {
    type Err = McpiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "distribute" => Ok(Self::Distribute),
            "reject" | "exact" => Ok(Self::Reject),
            other => Err(McpiError::invalid(
                "remainder",
                format!("unknown policy '{}', expected distribute or reject", other),
            )),
        }
    }
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distribute => write!(f, "distribute"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Splits `n_samples` into `n_batches` per-batch sample counts.
///
/// The counts always sum to `n_samples` and differ by at most one.
///
/// # Errors
///
/// Returns `McpiError::InvalidArgument` if either argument is zero, if
/// `n_batches > n_samples` (some batch would be empty), or if `policy` is
/// [`RemainderPolicy::Reject`] and the division leaves a remainder.
///
/// # Examples
///
/// ```rust
/// use mcpi_core::{generate_sample_counts, RemainderPolicy};
///
/// let counts = generate_sample_counts(10, 4, RemainderPolicy::Distribute).unwrap();
/// assert_eq!(counts, vec![3, 3, 2, 2]);
///
/// assert!(generate_sample_counts(10, 4, RemainderPolicy::Reject).is_err());
/// ```
pub fn generate_sample_counts(
    n_samples: u64,
    n_batches: usize,
    policy: RemainderPolicy,
) -> Result<Vec<u64>> {
    ensure_positive("n_samples", n_samples)?;
    ensure_positive("n_batches", n_batches as u64)?;
    let jobs = n_batches as u64;
    if jobs > n_samples {
        return Err(McpiError::invalid(
            "n_batches",
            format!("{} batches exceed {} samples", n_batches, n_samples),
        ));
    }
    let base = n_samples / jobs;
    let remainder = n_samples % jobs;
    if remainder != 0 && policy == RemainderPolicy::Reject {
        return Err(McpiError::invalid(
            "n_samples",
            format!(
                "{} is not divisible by {} batches (remainder {})",
                n_samples, n_batches, remainder
            ),
        ));
    }
    Ok((0..jobs)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}

/// Plans `n_batches` seeded batches covering `n_samples` samples.
///
/// `seeds[i]` from [`generate_seeds`] is paired with `counts[i]`, so the
/// assignment of seeds to batches is fixed by `initial_seed` alone.
///
/// # Errors
///
/// Same as [`generate_sample_counts`].
pub fn plan_batches(
    n_samples: u64,
    n_batches: usize,
    initial_seed: Seed,
    policy: RemainderPolicy,
) -> Result<Vec<SampleBatch>> {
    let counts = generate_sample_counts(n_samples, n_batches, policy)?;
    let seeds = generate_seeds(n_batches, initial_seed)?;
    counts
        .into_iter()
        .zip(seeds)
        .map(|(count, seed)| SampleBatch::new(count, seed))
        .collect()
}
