//! Quasi Monte Carlo estimate of pi on a regular grid.
//!
//! Instead of random draws, the square `[-1, 1]²` is cut into
//! `n_intervals × n_intervals` equal cells and the midpoint of each cell is
//! tested. The result is deterministic and converges as `O(1 / n_intervals)`.

use crate::error::{ensure_positive, Result};
use crate::estimator::{mcpi_gather, Estimate};

/// Estimates π from the `n_intervals²` cell midpoints of `[-1, 1]²`.
///
/// Uses the same inclusive boundary as the random sampler.
///
/// # Errors
///
/// Returns `McpiError::InvalidArgument` if `n_intervals` is zero.
///
/// # Examples
///
/// ```rust
/// use mcpi_core::quasi_mcpi;
///
/// let pi = quasi_mcpi(1_000).unwrap();
/// assert!((pi - std::f64::consts::PI).abs() < 1e-3);
/// ```
pub fn quasi_mcpi(n_intervals: u64) -> Result<Estimate> {
    ensure_positive("n_intervals", n_intervals)?;
    let width = 2.0 / n_intervals as f64;
    let midpoint = |i: u64| -1.0 + width * (i as f64 + 0.5);

    let mut inside = 0u64;
    for i in 0..n_intervals {
        let x = midpoint(i);
        let x2 = x * x;
        for j in 0..n_intervals {
            let y = midpoint(j);
            if x2 + y * y <= 1.0 {
                inside += 1;
            }
        }
    }
    mcpi_gather(&[inside], &[n_intervals * n_intervals])
}
