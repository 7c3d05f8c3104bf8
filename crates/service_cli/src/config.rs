//! CLI settings management
//!
//! Settings are resolved from four sources, highest priority first:
//! 1. Command line flags
//! 2. `MCPI_*` environment variables
//! 3. A TOML file given with `--config`
//! 4. Default values

use mcpi_core::{RemainderPolicy, Seed};
use mcpi_exec::{LocalBackend, Strategy, StrategyConfig, DEFAULT_SEED, MAX_WORKERS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by `--log-level` and `MCPI_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Resolved settings for one `mcpi` invocation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// Total number of samples
    pub n_samples: u64,
    /// Root seed
    pub seed: Seed,
    /// Batch count for `gather`
    pub n_batches: usize,
    /// Job count for `distributed`
    pub n_jobs: usize,
    /// Worker slots for `distributed`
    pub n_workers: usize,
    /// Handling of uneven splits
    #[serde(deserialize_with = "deserialize_parsed")]
    pub remainder: RemainderPolicy,
    /// Local backend for `gather`
    #[serde(deserialize_with = "deserialize_parsed")]
    pub backend: LocalBackend,
    /// Log level
    #[serde(deserialize_with = "deserialize_parsed")]
    pub log_level: LogLevel,
}

fn deserialize_parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            n_samples: 1_000_000,
            seed: DEFAULT_SEED,
            n_batches: 10,
            n_jobs: 10,
            n_workers: num_cpus::get().clamp(1, MAX_WORKERS),
            remainder: RemainderPolicy::Distribute,
            backend: LocalBackend::Sequential,
            log_level: LogLevel::Info,
        }
    }
}

impl CliSettings {
    /// Load settings from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let settings: CliSettings = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply `MCPI_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = CliOverrides {
            n_samples: parse_var(&lookup, "MCPI_N_SAMPLES", "n_samples")?,
            seed: parse_var(&lookup, "MCPI_SEED", "seed")?,
            n_batches: parse_var(&lookup, "MCPI_N_BATCHES", "n_batches")?,
            n_jobs: parse_var(&lookup, "MCPI_N_JOBS", "n_jobs")?,
            n_workers: parse_var(&lookup, "MCPI_N_WORKERS", "n_workers")?,
            remainder: lookup("MCPI_REMAINDER"),
            backend: lookup("MCPI_BACKEND"),
            log_level: lookup("MCPI_LOG_LEVEL"),
            ..CliOverrides::default()
        };
        self.merge_with_cli(&overrides)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(n) = cli.n_samples {
            self.n_samples = n;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(n) = cli.n_batches {
            self.n_batches = n;
        }
        if let Some(n) = cli.n_jobs {
            self.n_jobs = n;
        }
        if let Some(n) = cli.n_workers {
            self.n_workers = n;
        }
        if let Some(remainder) = &cli.remainder {
            self.remainder = parse_value("remainder", remainder)?;
        }
        if let Some(backend) = &cli.backend {
            self.backend = parse_value("backend", backend)?;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("n_samples", self.n_samples),
            ("n_batches", self.n_batches as u64),
            ("n_jobs", self.n_jobs as u64),
            ("n_workers", self.n_workers as u64),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build a validated strategy configuration from these settings
    pub fn strategy_config(&self, strategy: Strategy) -> mcpi_exec::Result<StrategyConfig> {
        StrategyConfig::builder()
            .n_samples(self.n_samples)
            .seed(self.seed)
            .remainder(self.remainder)
            .strategy(strategy)
            .build()
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
{
    value.parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn parse_var<F, T>(lookup: &F, key: &str, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).map(|v| parse_value(name, &v)).transpose()
}

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    pub n_samples: Option<u64>,
    pub seed: Option<Seed>,
    pub n_batches: Option<usize>,
    pub n_jobs: Option<usize>,
    pub n_workers: Option<usize>,
    pub remainder: Option<String>,
    pub backend: Option<String>,
    pub log_level: Option<String>,
}

/// Build settings from all sources
pub fn build_settings(cli: &CliOverrides) -> Result<CliSettings, ConfigError> {
    let mut settings = match &cli.config_file {
        Some(path) => CliSettings::from_file(path)?,
        None => CliSettings::default(),
    };

    settings.apply_env()?;
    settings.merge_with_cli(cli)?;

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = CliSettings::default();
        assert_eq!(settings.n_samples, 1_000_000);
        assert_eq!(settings.seed, DEFAULT_SEED);
        assert_eq!(settings.n_batches, 10);
        assert!((1..=MAX_WORKERS).contains(&settings.n_workers));
        assert_eq!(settings.remainder, RemainderPolicy::Distribute);
        assert_eq!(settings.backend, LocalBackend::Sequential);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_toml_settings() {
        let settings: CliSettings = toml::from_str(
            r#"
            n_samples = 5000
            seed = 11
            remainder = "reject"
            backend = "rayon"
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(settings.n_samples, 5_000);
        assert_eq!(settings.seed, 11);
        assert_eq!(settings.remainder, RemainderPolicy::Reject);
        assert_eq!(settings.backend, LocalBackend::Rayon { n_threads: None });
        assert_eq!(settings.log_level, LogLevel::Debug);
        // untouched keys keep defaults
        assert_eq!(settings.n_batches, 10);
    }

    #[test]
    fn test_toml_rejects_unknown_backend() {
        let result: Result<CliSettings, _> = toml::from_str(r#"backend = "dask""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("mcpi-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "n_jobs = 4\nn_workers = 2\n").unwrap();

        let settings = CliSettings::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.n_jobs, 4);
        assert_eq!(settings.n_workers, 2);
    }

    #[test]
    fn test_missing_file() {
        let result = CliSettings::from_file(Path::new("/nonexistent/mcpi.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MCPI_N_SAMPLES", "2000"),
            ("MCPI_N_WORKERS", "3"),
            ("MCPI_REMAINDER", "exact"),
        ]
        .into_iter()
        .collect();

        let mut settings = CliSettings::default();
        settings
            .apply_vars(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.n_samples, 2_000);
        assert_eq!(settings.n_workers, 3);
        assert_eq!(settings.remainder, RemainderPolicy::Reject);
        assert_eq!(settings.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_env_invalid_number() {
        let mut settings = CliSettings::default();
        let result =
            settings.apply_vars(|key| (key == "MCPI_SEED").then(|| "seven".to_string()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "seed", .. })
        ));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut settings = CliSettings {
            n_samples: 10,
            ..CliSettings::default()
        };
        let cli = CliOverrides {
            n_samples: Some(20),
            backend: Some("parallel".to_string()),
            ..CliOverrides::default()
        };
        settings.merge_with_cli(&cli).unwrap();

        assert_eq!(settings.n_samples, 20);
        assert_eq!(settings.backend, LocalBackend::Rayon { n_threads: None });
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let settings = CliSettings {
            n_workers: 0,
            ..CliSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                name: "n_workers",
                ..
            })
        ));
    }

    #[test]
    fn test_default_workers_pass_strategy_validation() {
        let settings = CliSettings::default();
        let config = settings.strategy_config(Strategy::Distributed {
            n_jobs: settings.n_jobs,
            n_workers: settings.n_workers,
        });
        assert!(config.is_ok());
    }

    #[test]
    fn test_strategy_config() {
        let settings = CliSettings::default();
        let config = settings
            .strategy_config(Strategy::Distributed {
                n_jobs: settings.n_jobs,
                n_workers: 2,
            })
            .unwrap();
        assert_eq!(config.n_samples(), settings.n_samples);
        assert_eq!(config.seed(), settings.seed);
    }
}
