//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.testpulse.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Statistics endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Statistics endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Statistics endpoint base URL.
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Default lookback window in days.
    #[serde(default = "default_days")]
    pub days: u32,

    /// Seconds between polls in watch mode.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,

    /// Use the dark palette by default.
    #[serde(default)]
    pub dark: bool,

    /// Workspace ids excluded from analysis.
    #[serde(default)]
    pub excluded_workspaces: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            interval_seconds: default_interval(),
            dark: false,
            excluded_workspaces: Vec::new(),
        }
    }
}

fn default_days() -> u32 {
    30
}

fn default_interval() -> u64 {
    300 // 5 minutes
}

/// Export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default output file for csv/json exports.
    #[serde(default)]
    pub output: Option<String>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".testpulse.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.url {
            self.api.base_url = url.clone();
        }

        if let Some(days) = args.days {
            self.dashboard.days = days;
        }

        if let Some(interval) = args.interval {
            self.dashboard.interval_seconds = interval;
        }

        if let Some(ref exclude) = args.exclude {
            self.dashboard.excluded_workspaces = exclude.clone();
        }

        if let Some(ref output) = args.output {
            self.export.output = Some(output.display().to_string());
        }

        // Flags always override
        if args.dark {
            self.dashboard.dark = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.dashboard.days, 30);
        assert_eq!(config.dashboard.interval_seconds, 300);
        assert!(!config.dashboard.dark);
        assert!(config.dashboard.excluded_workspaces.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[api]
base_url = "https://stats.example.com/test-statistics"
timeout_seconds = 10

[dashboard]
days = 7
interval_seconds = 60
dark = true
excluded_workspaces = ["ws-legacy", "ws-sandbox"]

[export]
output = "report.csv"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.api.base_url,
            "https://stats.example.com/test-statistics"
        );
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.dashboard.days, 7);
        assert_eq!(config.dashboard.interval_seconds, 60);
        assert!(config.dashboard.dark);
        assert_eq!(
            config.dashboard.excluded_workspaces,
            vec!["ws-legacy", "ws-sandbox"]
        );
        assert_eq!(config.export.output.as_deref(), Some("report.csv"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[dashboard]\ndays = 14\n").unwrap();
        assert_eq!(config.dashboard.days, 14);
        assert_eq!(config.dashboard.interval_seconds, 300);
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_merge_with_args_overrides() {
        use crate::cli::{Args, OutputFormat};

        let mut config = Config::default();
        let args = Args {
            url: Some("https://stats.example.com/test-statistics".to_string()),
            days: Some(7),
            start_date: None,
            end_date: None,
            exclude: Some(vec!["ws-a".to_string()]),
            format: OutputFormat::Dashboard,
            output: None,
            watch: false,
            interval: Some(60),
            details: false,
            expand: None,
            dark: true,
            no_color: false,
            fail_on: None,
            config: None,
            init_config: false,
            verbose: false,
            quiet: false,
        };

        config.merge_with_args(&args);
        assert_eq!(
            config.api.base_url,
            "https://stats.example.com/test-statistics"
        );
        assert_eq!(config.dashboard.days, 7);
        assert_eq!(config.dashboard.interval_seconds, 60);
        assert_eq!(config.dashboard.excluded_workspaces, vec!["ws-a"]);
        assert!(config.dashboard.dark);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[dashboard]"));
        assert!(toml_str.contains("[export]"));
    }
}
