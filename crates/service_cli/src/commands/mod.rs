//! CLI command implementations
//!
//! Each submodule implements one subcommand. All of them finish by writing a
//! [`Report`] to stdout.

pub mod distributed;
pub mod gather;
pub mod quasi;
pub mod serial;

use std::f64::consts::PI;
use std::io::{self, Write};
use std::time::Duration;

use mcpi_core::PiEstimate;
use mcpi_exec::StrategyConfig;
use tracing::info;

use crate::Result;

/// Outcome of one estimation run as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub method: String,
    pub n_samples: u64,
    pub estimate: f64,
    pub std_error: Option<f64>,
    pub elapsed: Duration,
}

impl Report {
    /// Build a report from a sampled estimate
    pub fn sampled(method: String, estimate: &PiEstimate, elapsed: Duration) -> Self {
        Self {
            method,
            n_samples: estimate.sample_count,
            estimate: estimate.value,
            std_error: Some(estimate.std_error),
            elapsed,
        }
    }

    /// Absolute distance from π
    pub fn abs_error(&self) -> f64 {
        (self.estimate - PI).abs()
    }

    /// Write the report as an aligned table
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "method     {}", self.method)?;
        writeln!(out, "samples    {}", self.n_samples)?;
        writeln!(out, "estimate   {:.10}", self.estimate)?;
        writeln!(out, "abs error  {:.3e}", self.abs_error())?;
        if let Some(std_error) = self.std_error {
            writeln!(out, "std error  {:.3e}", std_error)?;
        }
        writeln!(out, "elapsed    {:.3} ms", self.elapsed.as_secs_f64() * 1e3)
    }

    /// Log the report and print it to stdout
    pub fn emit(&self) -> Result<()> {
        info!(
            method = %self.method,
            estimate = self.estimate,
            abs_error = self.abs_error(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "estimation finished"
        );
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out)?;
        Ok(())
    }
}

/// Run a validated strategy and print its report
pub(crate) fn run_strategy(config: &StrategyConfig) -> Result<()> {
    let started = std::time::Instant::now();
    let estimate = config.run()?;
    Report::sampled(config.strategy().to_string(), &estimate, started.elapsed()).emit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_output() {
        let report = Report {
            method: "serial".to_string(),
            n_samples: 1_000,
            estimate: 3.14,
            std_error: Some(0.05),
            elapsed: Duration::from_millis(12),
        };

        let mut buffer = Vec::new();
        report.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("method     serial"));
        assert!(text.contains("samples    1000"));
        assert!(text.contains("estimate   3.1400000000"));
        assert!(text.contains("std error"));
        assert!(text.contains("elapsed    12.000 ms"));
        assert!((report.abs_error() - (PI - 3.14)).abs() < 1e-12);
    }

    #[test]
    fn test_report_without_std_error() {
        let report = Report {
            method: "quasi".to_string(),
            n_samples: 4,
            estimate: 4.0,
            std_error: None,
            elapsed: Duration::ZERO,
        };

        let mut buffer = Vec::new();
        report.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(!text.contains("std error"));
        assert_eq!(text.lines().count(), 5);
    }
}
