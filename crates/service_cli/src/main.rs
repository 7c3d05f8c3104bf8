//! mcpi - Command Line Monte Carlo Estimation of Pi
//!
//! This is the operational entry point for the mcpi workspace.
//!
//! # Commands
//!
//! - `mcpi serial` - One pass over every sample on the calling thread
//! - `mcpi gather --n-batches <N>` - Seeded batches on a local backend, reduced afterwards
//! - `mcpi distributed --n-jobs <J> --n-workers <W>` - Tasks on a fixed-size worker pool
//! - `mcpi quasi --n-intervals <N>` - Deterministic midpoint grid
//!
//! # Architecture
//!
//! As the Service layer, this crate resolves settings (flags, `MCPI_*`
//! environment variables, TOML file, defaults), initialises tracing and hands
//! off to `mcpi_exec`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_settings, CliOverrides, LogLevel};

/// Monte Carlo estimation of pi
#[derive(Parser)]
#[command(name = "mcpi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Total number of samples
    #[arg(short, long, global = true)]
    n_samples: Option<u64>,

    /// Root seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Uneven split handling (distribute, reject)
    #[arg(short, long, global = true)]
    remainder: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate in a single sequential pass
    Serial,

    /// Estimate from independently seeded batches reduced afterwards
    Gather {
        /// Number of batches
        #[arg(short = 'b', long)]
        n_batches: Option<usize>,

        /// Local backend (sequential, rayon)
        #[arg(long)]
        backend: Option<String>,
    },

    /// Estimate by submitting jobs to a worker pool
    Distributed {
        /// Number of jobs submitted
        #[arg(short = 'j', long)]
        n_jobs: Option<usize>,

        /// Number of concurrent workers
        #[arg(short = 'w', long)]
        n_workers: Option<usize>,
    },

    /// Estimate from a deterministic midpoint grid
    Quasi {
        /// Grid intervals per axis
        #[arg(short = 'i', long, default_value = "1000")]
        n_intervals: u64,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            config_file: self.config.clone(),
            n_samples: self.n_samples,
            seed: self.seed,
            remainder: self.remainder.clone(),
            log_level: self.log_level.clone(),
            ..CliOverrides::default()
        };
        match &self.command {
            Commands::Gather { n_batches, backend } => {
                overrides.n_batches = *n_batches;
                overrides.backend = backend.clone();
            }
            Commands::Distributed { n_jobs, n_workers } => {
                overrides.n_jobs = *n_jobs;
                overrides.n_workers = *n_workers;
            }
            Commands::Serial | Commands::Quasi { .. } => {}
        }
        overrides
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = build_settings(&cli.overrides())?;

    if cli.verbose && cli.log_level.is_none() {
        settings.log_level = LogLevel::Debug;
    }
    init_tracing(settings.log_level);

    info!("mcpi v{}", env!("CARGO_PKG_VERSION"));
    debug!(?settings, "settings resolved");

    match cli.command {
        Commands::Serial => commands::serial::run(&settings),
        Commands::Gather { .. } => commands::gather::run(&settings),
        Commands::Distributed { .. } => commands::distributed::run(&settings),
        Commands::Quasi { n_intervals } => commands::quasi::run(n_intervals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_gather_overrides() {
        let cli = Cli::parse_from([
            "mcpi", "gather", "-n", "5000", "-b", "5", "--backend", "rayon", "--seed", "3",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.n_samples, Some(5_000));
        assert_eq!(overrides.n_batches, Some(5));
        assert_eq!(overrides.backend.as_deref(), Some("rayon"));
        assert_eq!(overrides.seed, Some(3));
        assert_eq!(overrides.n_jobs, None);
    }

    #[test]
    fn test_distributed_overrides() {
        let cli = Cli::parse_from(["mcpi", "distributed", "-j", "2", "-w", "2"]);
        let overrides = cli.overrides();

        assert_eq!(overrides.n_jobs, Some(2));
        assert_eq!(overrides.n_workers, Some(2));
        assert_eq!(overrides.n_batches, None);
    }

    #[test]
    fn test_quasi_default_intervals() {
        let cli = Cli::parse_from(["mcpi", "quasi"]);
        assert!(matches!(cli.command, Commands::Quasi { n_intervals: 1000 }));
    }
}
