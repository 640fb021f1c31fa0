//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// TestPulse - terminal dashboard for test-execution statistics
///
/// Fetches test statistics from an analytics endpoint, aggregates them per
/// workspace, and renders a terminal dashboard or exports CSV/JSON.
///
/// Examples:
///   testpulse --url https://stats.example.com/test-statistics
///   testpulse --url https://stats.example.com/test-statistics --days 7 --watch
///   testpulse --url https://stats.example.com/test-statistics --format csv --output report.csv
///   testpulse --url https://stats.example.com/test-statistics --exclude ws-legacy,ws-sandbox
///   testpulse --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Statistics endpoint base URL
    ///
    /// Can also be set via TESTPULSE_URL env var or .testpulse.toml config.
    #[arg(short, long, value_name = "URL", env = "TESTPULSE_URL")]
    pub url: Option<String>,

    /// Lookback window in days (defaults to 30)
    ///
    /// Ignored when an explicit --start-date/--end-date window is given.
    #[arg(short, long, value_name = "DAYS")]
    pub days: Option<u32>,

    /// Explicit window start date (YYYY-MM-DD)
    ///
    /// The window starts at 00:00:00 local time. Requires --end-date.
    #[arg(long, value_name = "DATE", requires = "end_date")]
    pub start_date: Option<NaiveDate>,

    /// Explicit window end date (YYYY-MM-DD)
    ///
    /// The window ends at 23:59:59 local time. Requires --start-date.
    #[arg(long, value_name = "DATE", requires = "start_date")]
    pub end_date: Option<NaiveDate>,

    /// Workspace ids to exclude from analysis (comma-separated)
    ///
    /// Example: --exclude ws-legacy,ws-sandbox
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Output format (dashboard, csv, json)
    #[arg(long, default_value = "dashboard", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write csv/json output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep polling and redrawing the dashboard until Ctrl-C
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds between polls in watch mode (defaults to 300)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Expand per-test details for every workspace
    #[arg(long, conflicts_with = "expand")]
    pub details: bool,

    /// Expand per-test details for a single workspace id
    #[arg(long, value_name = "WORKSPACE_ID")]
    pub expand: Option<String>,

    /// Use the dark color palette
    #[arg(long)]
    pub dark: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Fail when overall health is at or below this tier
    ///
    /// Useful for CI pipelines. Exit code 2 when the gate trips.
    /// Values: critical, attention, good
    #[arg(long, value_name = "STATUS")]
    pub fail_on: Option<FailOnStatus>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .testpulse.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate a default .testpulse.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the dashboard data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Terminal dashboard (default)
    #[default]
    Dashboard,
    /// CSV export of the workspace table
    Csv,
    /// JSON snapshot of the derived summaries
    Json,
}

/// Health tier for the --fail-on gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FailOnStatus {
    Critical,
    Attention,
    Good,
}

impl From<FailOnStatus> for crate::models::HealthStatus {
    fn from(level: FailOnStatus) -> Self {
        match level {
            FailOnStatus::Critical => crate::models::HealthStatus::Critical,
            FailOnStatus::Attention => crate::models::HealthStatus::Attention,
            FailOnStatus::Good => crate::models::HealthStatus::Good,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate endpoint URL scheme when provided via CLI/env
        if let Some(ref url) = self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Endpoint URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.days == Some(0) {
            return Err("Days must be at least 1".to_string());
        }

        if self.interval == Some(0) {
            return Err("Interval must be at least 1 second".to_string());
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err("Start date must not be after end date".to_string());
            }
        }

        if self.watch && self.format != OutputFormat::Dashboard {
            return Err("Watch mode only supports the dashboard format".to_string());
        }

        if self.output.is_some() && self.format == OutputFormat::Dashboard {
            return Err("--output requires --format csv or --format json".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
