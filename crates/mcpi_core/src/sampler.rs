//! Unit circle sampling: the unit of work replicated across batches.
//!
//! A point `(x, y)` counts as inside when `x² + y² <= 1`, i.e. points on the
//! boundary are included. The inclusive boundary matches the reduction's
//! area argument and only affects counts in measure-zero cases.

use crate::error::{ensure_positive, McpiError, Result};
use crate::rng::{SampleRng, Seed};

/// One independent unit of sampling work.
///
/// Constructed by the caller before dispatch and consumed by
/// [`SampleBatch::run`]. `sample_count` is always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleBatch {
    sample_count: u64,
    seed: Seed,
}

impl SampleBatch {
    /// Creates a batch of `sample_count` draws from the stream seeded by `seed`.
    ///
    /// # Errors
    ///
    /// Returns `McpiError::InvalidArgument` if `sample_count` is zero.
    pub fn new(sample_count: u64, seed: Seed) -> Result<Self> {
        ensure_positive("sample_count", sample_count)?;
        Ok(Self { sample_count, seed })
    }

    /// Returns the number of points to draw.
    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Returns the stream seed.
    #[inline]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Draws the batch and returns its inside count.
    ///
    /// Takes `self` by value: a batch is consumed by exactly one run.
    pub fn run(self) -> BatchResult {
        let inside = count_inside(self.sample_count, self.seed);
        BatchResult {
            inside_count: inside,
            sample_count: self.sample_count,
        }
    }
}

/// Outcome of one batch: how many of `sample_count` points fell inside.
///
/// Invariant: `1 <= sample_count` and `inside_count <= sample_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchResult {
    inside_count: u64,
    sample_count: u64,
}

impl BatchResult {
    /// Builds a result from externally produced counts, e.g. returned by a
    /// remote worker.
    ///
    /// # Errors
    ///
    /// Returns `McpiError::InvalidArgument` if `sample_count` is zero or
    /// `inside_count > sample_count`.
    pub fn new(inside_count: u64, sample_count: u64) -> Result<Self> {
        ensure_positive("sample_count", sample_count)?;
        if inside_count > sample_count {
            return Err(McpiError::invalid(
                "inside_count",
                format!(
                    "{} exceeds sample count {}",
                    inside_count, sample_count
                ),
            ));
        }
        Ok(Self {
            inside_count,
            sample_count,
        })
    }

    /// Number of points inside or on the unit circle.
    #[inline]
    pub fn inside_count(&self) -> u64 {
        self.inside_count
    }

    /// Number of points drawn.
    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Fraction of points inside, always in [0, 1].
    #[inline]
    pub fn inside_fraction(&self) -> f64 {
        self.inside_count as f64 / self.sample_count as f64
    }
}

/// Counts how many of `sample_count` points in `[-1, 1]²` land in the unit circle.
///
/// Pure function of `(sample_count, seed)`.
///
/// # Errors
///
/// Returns `McpiError::InvalidArgument` if `sample_count` is zero.
///
/// # Examples
///
/// ```rust
/// use mcpi_core::unit_circle_samples;
///
/// let inside = unit_circle_samples(1000, 7).unwrap();
/// assert!(inside <= 1000);
/// assert_eq!(inside, unit_circle_samples(1000, 7).unwrap());
/// ```
pub fn unit_circle_samples(sample_count: u64, seed: Seed) -> Result<u64> {
    ensure_positive("sample_count", sample_count)?;
    Ok(count_inside(sample_count, seed))
}

fn count_inside(sample_count: u64, seed: Seed) -> u64 {
    let mut rng = SampleRng::from_seed(seed);
    let mut inside = 0;
    // raw loop, no buffers
    for _ in 0..sample_count {
        let (x, y) = rng.gen_point();
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_circle_samples_reproducible() {
        let a = unit_circle_samples(10_000, 42).unwrap();
        let b = unit_circle_samples(10_000, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unit_circle_samples_zero_count() {
        let err = unit_circle_samples(0, 42).unwrap_err();
        assert_eq!(err.parameter(), "sample_count");
    }

    #[test]
    fn test_unit_circle_fraction_near_quarter_pi() {
        let inside = unit_circle_samples(200_000, 5).unwrap();
        let fraction = inside as f64 / 200_000.0;
        assert!((fraction - std::f64::consts::FRAC_PI_4).abs() < 0.01);
    }

    #[test]
    fn test_batch_run_matches_free_function() {
        let batch = SampleBatch::new(5_000, 9).unwrap();
        let result = batch.run();
        assert_eq!(result.sample_count(), 5_000);
        assert_eq!(
            result.inside_count(),
            unit_circle_samples(5_000, 9).unwrap()
        );
    }

    #[test]
    fn test_sample_batch_rejects_zero() {
        assert!(SampleBatch::new(0, 1).is_err());
    }

    #[test]
    fn test_batch_result_validation() {
        assert!(BatchResult::new(3, 4).is_ok());
        assert!(BatchResult::new(4, 4).is_ok());
        assert!(BatchResult::new(0, 4).is_ok());

        let err = BatchResult::new(5, 4).unwrap_err();
        assert_eq!(err.parameter(), "inside_count");
        assert_eq!(BatchResult::new(0, 0).unwrap_err().parameter(), "sample_count");
    }

    #[test]
    fn test_inside_fraction() {
        let result = BatchResult::new(3, 4).unwrap();
        assert_eq!(result.inside_fraction(), 0.75);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_inside_count_bounded(n in 1u64..2_000, seed in any::<u64>()) {
            let inside = unit_circle_samples(n, seed).unwrap();
            prop_assert!(inside <= n);
        }
    }
}
