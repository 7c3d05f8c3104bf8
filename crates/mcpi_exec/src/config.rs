//! Estimation run configuration.
//!
//! This module provides [`StrategyConfig`] and its builder, which validate a
//! run's parameters once before any sampling starts.

use mcpi_core::{PiEstimate, RemainderPolicy, Seed};

use crate::backend::LocalBackend;
use crate::error::{ExecError, Result};
use crate::strategy::Strategy;

/// Maximum number of samples in a single run.
pub const MAX_SAMPLES: u64 = 100_000_000_000;

/// Maximum number of worker slots for the distributed strategy.
pub const MAX_WORKERS: usize = 1_024;

/// Seed used when none is given.
pub const DEFAULT_SEED: Seed = 7;

/// Validated parameters of one estimation run.
///
/// Use [`StrategyConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use mcpi_exec::{Strategy, StrategyConfig};
///
/// let config = StrategyConfig::builder()
///     .n_samples(100_000)
///     .seed(7)
///     .distributed(4, 2)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.strategy(), Strategy::Distributed { n_jobs: 4, n_workers: 2 });
/// let estimate = config.run().unwrap();
/// assert_eq!(estimate.sample_count, 100_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyConfig {
    n_samples: u64,
    seed: Seed,
    remainder: RemainderPolicy,
    strategy: Strategy,
}

impl StrategyConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> StrategyConfigBuilder {
        StrategyConfigBuilder::default()
    }

    /// Returns the total number of samples.
    #[inline]
    pub fn n_samples(&self) -> u64 {
        self.n_samples
    }

    /// Returns the root seed.
    #[inline]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Returns the remainder policy for uneven splits.
    #[inline]
    pub fn remainder(&self) -> RemainderPolicy {
        self.remainder
    }

    /// Returns the execution strategy.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::InvalidConfig`] if:
    /// - `n_samples` is 0 or greater than [`MAX_SAMPLES`]
    /// - the batch or job count is 0 or exceeds `n_samples`
    /// - `n_workers` is 0 or greater than [`MAX_WORKERS`]
    /// - a dedicated rayon pool has 0 threads
    pub fn validate(&self) -> Result<()> {
        if self.n_samples == 0 || self.n_samples > MAX_SAMPLES {
            return Err(invalid(
                "n_samples",
                format!("{} must be in range [1, {}]", self.n_samples, MAX_SAMPLES),
            ));
        }
        let (name, count) = match self.strategy {
            Strategy::Serial => return Ok(()),
            Strategy::Gathered { n_batches, backend } => {
                if let LocalBackend::Rayon { n_threads: Some(0) } = backend {
                    return Err(invalid("n_threads", "must be positive".to_string()));
                }
                ("n_batches", n_batches)
            }
            Strategy::Distributed { n_jobs, n_workers } => {
                if n_workers == 0 || n_workers > MAX_WORKERS {
                    return Err(invalid(
                        "n_workers",
                        format!("{} must be in range [1, {}]", n_workers, MAX_WORKERS),
                    ));
                }
                ("n_jobs", n_jobs)
            }
        };
        if count == 0 || count as u64 > self.n_samples {
            return Err(invalid(
                name,
                format!("{} must be in range [1, n_samples={}]", count, self.n_samples),
            ));
        }
        Ok(())
    }

    /// Runs the configured strategy.
    ///
    /// # Errors
    ///
    /// See [`Strategy::estimate`].
    pub fn run(&self) -> Result<PiEstimate> {
        self.strategy
            .estimate(self.n_samples, self.seed, self.remainder)
    }
}

fn invalid(name: &'static str, reason: String) -> ExecError {
    ExecError::InvalidConfig { name, reason }
}

/// Builder for [`StrategyConfig`].
///
/// Defaults: serial strategy, seed [`DEFAULT_SEED`],
/// [`RemainderPolicy::Distribute`]. `n_samples` must be set.
#[derive(Clone, Debug, Default)]
pub struct StrategyConfigBuilder {
    n_samples: Option<u64>,
    seed: Option<Seed>,
    remainder: RemainderPolicy,
    strategy: Strategy,
}

impl StrategyConfigBuilder {
    /// Sets the total number of samples.
    #[inline]
    pub fn n_samples(mut self, n_samples: u64) -> Self {
        self.n_samples = Some(n_samples);
        self
    }

    /// Sets the root seed.
    #[inline]
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the remainder policy.
    #[inline]
    pub fn remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    /// Sets the strategy directly.
    #[inline]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Selects the serial strategy.
    #[inline]
    pub fn serial(self) -> Self {
        self.strategy(Strategy::Serial)
    }

    /// Selects the gathered strategy.
    #[inline]
    pub fn gathered(self, n_batches: usize, backend: LocalBackend) -> Self {
        self.strategy(Strategy::Gathered { n_batches, backend })
    }

    /// Selects the distributed strategy.
    #[inline]
    pub fn distributed(self, n_jobs: usize, n_workers: usize) -> Self {
        self.strategy(Strategy::Distributed { n_jobs, n_workers })
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::InvalidConfig`] if `n_samples` is not set or
    /// [`StrategyConfig::validate`] fails.
    pub fn build(self) -> Result<StrategyConfig> {
        let n_samples = self
            .n_samples
            .ok_or_else(|| invalid("n_samples", "must be specified".to_string()))?;

        let config = StrategyConfig {
            n_samples,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            remainder: self.remainder,
            strategy: self.strategy,
        };

        config.validate()?;
        Ok(config)
    }
}
