//! # mcpi_exec: Execution Strategies for Monte Carlo Pi
//!
//! ## Strategy Layer Role
//!
//! mcpi_exec decides how the batches planned by `mcpi_core` are scheduled:
//! - Serial execution on the calling thread (`strategy`)
//! - Gathered execution on a sequential or rayon backend (`backend`)
//! - Distributed execution on a fixed-size tokio worker pool (`backend`)
//! - Validated run configuration (`config`)
//!
//! Every strategy hands its batch results to [`mcpi_core::summarise`], so the
//! reduction is identical whatever the scheduling.
//!
//! ## Usage Example
//!
//! ```rust
//! use mcpi_exec::{mcpi_distributed, mcpi_gathered};
//!
//! let gathered = mcpi_gathered(100_000, 7, 10).unwrap();
//! let distributed = mcpi_distributed(100_000, 7, 10, 2).unwrap();
//!
//! // same seeds, same partitioning, same reduction
//! assert_eq!(gathered, distributed);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for strategies and backends

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod backend;
pub mod config;
pub mod error;
pub mod strategy;

pub use backend::{LocalBackend, RayonBackend, SequentialBackend, TaskBackend, WorkerPoolBackend};
pub use config::{StrategyConfig, StrategyConfigBuilder, DEFAULT_SEED, MAX_SAMPLES, MAX_WORKERS};
pub use error::{ExecError, Result};
pub use strategy::{mcpi_distributed, mcpi_gathered, Strategy};
