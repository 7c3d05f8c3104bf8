//! # mcpi_core: Seeded Monte Carlo Estimation of Pi
//!
//! ## Kernel Layer Role
//!
//! mcpi_core is the bottom layer of the workspace. It owns the whole
//! statistical method and nothing about scheduling:
//! - Seed spawning for independent sibling streams (`rng`)
//! - Unit circle sampling, the unit of work (`sampler`)
//! - Weighted reduction of batch counts into an estimate (`estimator`)
//! - Deterministic partitioning of a sample budget into batches (`partition`)
//! - A deterministic grid (quasi Monte Carlo) estimate (`quasi`)
//!
//! Execution strategies live in `mcpi_exec` and only decide *how* batches
//! are run; every strategy reduces through [`estimator::summarise`].
//!
//! ## Usage Example
//!
//! ```rust
//! use mcpi_core::{generate_seeds, mcpi_gather, mcpi_serial, unit_circle_samples};
//!
//! // one pass
//! let serial = mcpi_serial(100_000, 7).unwrap();
//!
//! // ten independently seeded batches, reduced afterwards
//! let seeds = generate_seeds(10, 7).unwrap();
//! let circle_counts: Vec<u64> = seeds
//!     .iter()
//!     .map(|&seed| unit_circle_samples(10_000, seed).unwrap())
//!     .collect();
//! let gathered = mcpi_gather(&circle_counts, &[10_000; 10]).unwrap();
//!
//! assert!((serial - gathered).abs() < 0.1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for batches, results and estimates

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod estimator;
pub mod partition;
pub mod quasi;
pub mod rng;
pub mod sampler;

pub use error::{McpiError, Result};
pub use estimator::{
    mcpi_gather, mcpi_gather_as, mcpi_serial, reduce, summarise, Estimate, PiEstimate,
};
pub use partition::{generate_sample_counts, plan_batches, RemainderPolicy};
pub use quasi::quasi_mcpi;
pub use rng::{generate_seeds, SampleRng, Seed, SeedSequence};
pub use sampler::{unit_circle_samples, BatchResult, SampleBatch};
