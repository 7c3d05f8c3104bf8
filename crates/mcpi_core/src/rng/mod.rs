//! # Random Number Generation Infrastructure
//!
//! Seeded random streams for unit square sampling, and the seed spawning
//! used to give every batch its own independent stream.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every stream is a pure function of its seed
//! - **Explicit seed threading**: there is no global generator; each sampling
//!   call receives its seed as an argument
//! - **Independence**: sibling seeds are spawned from a root stream, never
//!   computed as `root + i`
//!
//! ## Module Structure
//!
//! - [`prng`]: [`SampleRng`], a `StdRng` wrapper drawing points in `[-1, 1]²`
//! - [`seeds`]: [`SeedSequence`] and [`generate_seeds`]
//!
//! ## Usage Example
//!
//! ```rust
//! use mcpi_core::rng::{generate_seeds, SampleRng};
//!
//! let seeds = generate_seeds(4, 7).unwrap();
//! for seed in seeds {
//!     let mut rng = SampleRng::from_seed(seed);
//!     let (x, y) = rng.gen_point();
//!     assert!(x.abs() <= 1.0 && y.abs() <= 1.0);
//! }
//! ```

mod prng;
mod seeds;

pub use prng::SampleRng;
pub use seeds::{generate_seeds, SeedSequence};

/// Integer initialising one independent random stream.
pub type Seed = u64;
