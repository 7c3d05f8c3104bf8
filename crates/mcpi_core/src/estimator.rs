//! Estimator core: turning inside counts into a pi estimate.
//!
//! The fraction of square-uniform points that land inside the unit circle
//! approximates `π / 4` (circle area `π`, square area `4`), so
//! `π ≈ 4 · inside / total`.
//!
//! Several batches are combined by summing counts before dividing:
//! `4 · Σ inside_i / Σ total_i`. Averaging per-batch estimates instead would
//! over-weight small batches whenever batch sizes differ.

use num_traits::{Float, NumCast};

use crate::error::{ensure_positive, McpiError, Result};
use crate::rng::Seed;
use crate::sampler::{unit_circle_samples, BatchResult};

/// Floating-point approximation of π.
pub type Estimate = f64;

/// Estimates π from a single batch of `n_samples` points.
///
/// # Errors
///
/// Returns `McpiError::InvalidArgument` if `n_samples` is zero.
///
/// # Examples
///
/// ```rust
/// use mcpi_core::mcpi_serial;
///
/// let pi = mcpi_serial(100_000, 7).unwrap();
/// assert!((pi - std::f64::consts::PI).abs() < 0.05);
/// ```
pub fn mcpi_serial(n_samples: u64, seed: Seed) -> Result<Estimate> {
    ensure_positive("n_samples", n_samples)?;
    let inside = unit_circle_samples(n_samples, seed)?;
    Ok(4.0 * (inside as f64 / n_samples as f64))
}

/// Combines per-batch inside counts into one weighted estimate.
///
/// `circle_counts[i]` is the inside count of a batch that drew
/// `sample_counts[i]` points.
///
/// # Errors
///
/// Returns `McpiError::InvalidArgument` if the slices are empty, differ in
/// length, contain a zero sample count, or `circle_counts[i] >
/// sample_counts[i]` for any `i`.
///
/// # Examples
///
/// ```rust
/// use mcpi_core::mcpi_gather;
///
/// // unequal batches: 4 * (3 + 70) / (4 + 100)
/// let pi = mcpi_gather(&[3, 70], &[4, 100]).unwrap();
/// assert_eq!(pi, 4.0 * 73.0 / 104.0);
///
/// assert!(mcpi_gather(&[3], &[4, 100]).is_err());
/// ```
pub fn mcpi_gather(circle_counts: &[u64], sample_counts: &[u64]) -> Result<Estimate> {
    mcpi_gather_as::<f64>(circle_counts, sample_counts)
}

/// [`mcpi_gather`] with a caller-chosen floating-point result type.
///
/// # Errors
///
/// Same as [`mcpi_gather`]; additionally fails if the totals cannot be
/// represented in `T`.
pub fn mcpi_gather_as<T: Float>(circle_counts: &[u64], sample_counts: &[u64]) -> Result<T> {
    let (inside, total) = tally(circle_counts, sample_counts)?;
    ratio_estimate(inside, total)
}

/// Reduces a set of batch results into one weighted estimate.
///
/// Completion order is irrelevant: the reduction only sums.
///
/// # Errors
///
/// Returns `McpiError::InvalidArgument` if `results` is empty.
pub fn reduce(results: &[BatchResult]) -> Result<Estimate> {
    Ok(summarise(results)?.value)
}

/// Weighted estimate together with its totals and standard error.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiEstimate {
    /// The π estimate, `4 · inside / total`.
    pub value: Estimate,
    /// Total points inside the unit circle across all batches.
    pub inside_count: u64,
    /// Total points drawn across all batches.
    pub sample_count: u64,
    /// Binomial standard error, `4 · sqrt(p (1 - p) / n)`.
    pub std_error: f64,
    /// Number of batches combined.
    pub n_batches: usize,
}

impl PiEstimate {
    /// Absolute distance from the true value of π.
    #[inline]
    pub fn abs_error(&self) -> f64 {
        (self.value - std::f64::consts::PI).abs()
    }
}

/// Reduces batch results into a [`PiEstimate`].
///
/// # Errors
///
/// Returns `McpiError::InvalidArgument` if `results` is empty.
pub fn summarise(results: &[BatchResult]) -> Result<PiEstimate> {
    if results.is_empty() {
        return Err(McpiError::invalid("results", "must not be empty"));
    }
    // BatchResult already upholds inside <= total per batch
    let inside = checked_sum("circle_counts", results.iter().map(|r| r.inside_count()))?;
    let total = checked_sum("sample_counts", results.iter().map(|r| r.sample_count()))?;
    let value: f64 = ratio_estimate(inside, total)?;
    let p = inside as f64 / total as f64;
    Ok(PiEstimate {
        value,
        inside_count: inside,
        sample_count: total,
        std_error: 4.0 * (p * (1.0 - p) / total as f64).sqrt(),
        n_batches: results.len(),
    })
}

/// Validates paired count slices and returns `(Σ inside, Σ total)`.
fn tally(circle_counts: &[u64], sample_counts: &[u64]) -> Result<(u64, u64)> {
    if circle_counts.is_empty() || sample_counts.is_empty() {
        return Err(McpiError::invalid("circle_counts", "must not be empty"));
    }
    if circle_counts.len() != sample_counts.len() {
        return Err(McpiError::invalid(
            "circle_counts",
            format!(
                "length {} does not match sample_counts length {}",
                circle_counts.len(),
                sample_counts.len()
            ),
        ));
    }
    for (i, (&inside, &total)) in circle_counts.iter().zip(sample_counts).enumerate() {
        if total == 0 {
            return Err(McpiError::invalid(
                "sample_counts",
                format!("entry {} must be positive", i),
            ));
        }
        if inside > total {
            return Err(McpiError::invalid(
                "circle_counts",
                format!("entry {} ({}) exceeds sample count {}", i, inside, total),
            ));
        }
    }
    let inside = checked_sum("circle_counts", circle_counts.iter().copied())?;
    let total = checked_sum("sample_counts", sample_counts.iter().copied())?;
    Ok((inside, total))
}

fn checked_sum(name: &'static str, mut values: impl Iterator<Item = u64>) -> Result<u64> {
    values
        .try_fold(0u64, |acc, v| acc.checked_add(v))
        .ok_or_else(|| McpiError::invalid(name, "sum overflows u64"))
}

fn ratio_estimate<T: Float>(inside: u64, total: u64) -> Result<T> {
    let inside = <T as NumCast>::from(inside)
        .ok_or_else(|| McpiError::invalid("circle_counts", "total not representable"))?;
    let total = <T as NumCast>::from(total)
        .ok_or_else(|| McpiError::invalid("sample_counts", "total not representable"))?;
    let four = <T as NumCast>::from(4.0)
        .ok_or_else(|| McpiError::invalid("T", "cannot represent 4"))?;
    // divide first to keep the intermediate small
    Ok(four * (inside / total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_single_batch_matches_serial_formula() {
        let inside = unit_circle_samples(50_000, 3).unwrap();
        let gathered = mcpi_gather(&[inside], &[50_000]).unwrap();
        let serial = mcpi_serial(50_000, 3).unwrap();
        assert_eq!(gathered, serial);
        assert_eq!(gathered, 4.0 * inside as f64 / 50_000.0);
    }

    #[test]
    fn test_gather_weights_by_sample_count() {
        // per-batch estimates 4.0 and 0.0 would average to 2.0
        let pi = mcpi_gather(&[1, 0], &[1, 99]).unwrap();
        assert_abs_diff_eq!(pi, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_gather_mismatched_lengths() {
        let err = mcpi_gather(&[1, 2, 3], &[10, 10]).unwrap_err();
        assert!(matches!(err, McpiError::InvalidArgument { .. }));
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_gather_empty() {
        assert!(mcpi_gather(&[], &[]).is_err());
    }

    #[test]
    fn test_gather_inside_exceeds_total() {
        let err = mcpi_gather(&[5, 11], &[10, 10]).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_gather_zero_sample_count() {
        let err = mcpi_gather(&[0], &[0]).unwrap_err();
        assert_eq!(err.parameter(), "sample_counts");
    }

    #[test]
    fn test_gather_overflow_reported() {
        let err = mcpi_gather(&[0, 0], &[u64::MAX, 1]).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_gather_as_f32() {
        let pi: f32 = mcpi_gather_as(&[3, 70], &[4, 100]).unwrap();
        assert_abs_diff_eq!(pi, 4.0 * 73.0 / 104.0, epsilon = 1e-6);
    }

    #[test]
    fn test_serial_zero_samples() {
        assert_eq!(mcpi_serial(0, 1).unwrap_err().parameter(), "n_samples");
    }

    #[test]
    fn test_summarise_totals_and_error() {
        let results = [
            BatchResult::new(78, 100).unwrap(),
            BatchResult::new(80, 100).unwrap(),
        ];
        let summary = summarise(&results).unwrap();
        assert_eq!(summary.inside_count, 158);
        assert_eq!(summary.sample_count, 200);
        assert_eq!(summary.n_batches, 2);
        assert_abs_diff_eq!(summary.value, 3.16, epsilon = 1e-12);
        let p: f64 = 0.79;
        assert_abs_diff_eq!(
            summary.std_error,
            4.0 * (p * (1.0 - p) / 200.0).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(reduce(&results).unwrap(), summary.value);
    }

    #[test]
    fn test_summarise_empty() {
        assert_eq!(summarise(&[]).unwrap_err().parameter(), "results");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_gather_reorder_invariant(
            pairs in prop::collection::vec((1u64..1_000_000, 0.0f64..=1.0), 1..32),
            rotation in 0usize..32,
        ) {
            let (circle, samples): (Vec<u64>, Vec<u64>) = pairs
                .iter()
                .map(|&(n, frac)| (((n as f64) * frac) as u64, n))
                .unzip();
            let forward = mcpi_gather(&circle, &samples).unwrap();

            let mut paired: Vec<_> = circle.iter().copied().zip(samples.iter().copied()).collect();
            paired.reverse();
            let k = rotation % paired.len();
            paired.rotate_left(k);
            let (c2, s2): (Vec<u64>, Vec<u64>) = paired.into_iter().unzip();

            prop_assert_eq!(forward, mcpi_gather(&c2, &s2).unwrap());
        }

        #[test]
        fn prop_gather_within_bounds(
            pairs in prop::collection::vec((1u64..10_000, 0.0f64..=1.0), 1..16),
        ) {
            let (circle, samples): (Vec<u64>, Vec<u64>) = pairs
                .iter()
                .map(|&(n, frac)| (((n as f64) * frac) as u64, n))
                .unzip();
            let pi = mcpi_gather(&circle, &samples).unwrap();
            prop_assert!((0.0..=4.0).contains(&pi));
        }
    }
}
