//! Data models for the statistics dashboard.
//!
//! This module contains the wire-format payload structures returned by the
//! test-statistics endpoint and the derived summary types computed from them.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health classification of a pass rate.
///
/// Ordered from worst to best so that `Critical < Attention < Good <
/// Excellent`, which lets threshold gates compare statuses directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Below 50% pass rate.
    Critical,
    /// 50% to below 70% pass rate.
    Attention,
    /// 70% to below 90% pass rate.
    Good,
    /// 90% pass rate and above.
    Excellent,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Critical => write!(f, "Critical"),
            HealthStatus::Attention => write!(f, "Attention"),
            HealthStatus::Good => write!(f, "Good"),
            HealthStatus::Excellent => write!(f, "Excellent"),
        }
    }
}

impl HealthStatus {
    /// Returns a one-character badge for the status.
    pub fn badge(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "✗",
            HealthStatus::Attention => "⚠",
            HealthStatus::Good => "◐",
            HealthStatus::Excellent => "✓",
        }
    }

    /// Returns the pass-rate band the status covers.
    pub fn band_caption(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "<50% pass rate",
            HealthStatus::Attention => "50-69% pass rate",
            HealthStatus::Good => "70-89% pass rate",
            HealthStatus::Excellent => "≥90% pass rate",
        }
    }

    /// All statuses, best first (display order for charts and tables).
    pub fn all_best_first() -> [HealthStatus; 4] {
        [
            HealthStatus::Excellent,
            HealthStatus::Good,
            HealthStatus::Attention,
            HealthStatus::Critical,
        ]
    }
}

/// The complete statistics payload returned by the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Workspaces in upstream order.
    pub workspaces: Vec<Workspace>,
}

/// A single workspace with its test results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Stable workspace identifier (used by exclusion filters).
    pub workspace_id: String,
    /// Human-readable workspace name.
    pub workspace_name: String,
    /// Test results in upstream order. A missing field decodes as empty.
    #[serde(default)]
    pub tests: Vec<TestResult>,
}

/// Aggregated result of a single test scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Scenario name.
    pub scenario: String,
    /// Project the scenario belongs to.
    pub project: String,
    /// Total number of runs.
    pub total_runs: u64,
    /// Number of passing runs.
    pub passed: u64,
    /// Number of failing runs.
    pub failed: u64,
    /// Upstream-computed pass rate as a numeric string (may carry a `%`).
    pub pass_rate: String,
}

impl TestResult {
    /// Parses the upstream pass-rate string, coercing malformed values to 0.
    pub fn pass_rate_percent(&self) -> f64 {
        self.pass_rate
            .trim()
            .trim_end_matches('%')
            .parse()
            .unwrap_or(0.0)
    }
}

/// Derived per-workspace summary (computed, never persisted).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceSummary {
    /// Workspace name.
    pub name: String,
    /// Workspace id.
    pub id: String,
    /// Total passing runs across the workspace's tests.
    pub passed: u64,
    /// Total failing runs across the workspace's tests.
    pub failed: u64,
    /// Total runs across the workspace's tests.
    pub total: u64,
    /// Pass rate in percent, rounded to one decimal. 0 when `total` is 0.
    pub pass_rate: f64,
    /// Health classification of `pass_rate`.
    pub status: HealthStatus,
}

/// Derived summary across all non-excluded workspaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallSummary {
    /// Total runs.
    pub total: u64,
    /// Total passing runs.
    pub passed: u64,
    /// Total failing runs.
    pub failed: u64,
    /// Pass rate in percent, rounded to one decimal.
    pub pass_rate: f64,
    /// Failure rate in percent, rounded to one decimal.
    pub fail_rate: f64,
    /// Health classification of `pass_rate`.
    pub status: HealthStatus,
}

/// Count of workspaces per health status (drives the distribution chart).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub excellent: usize,
    pub good: usize,
    pub attention: usize,
    pub critical: usize,
}

impl StatusBreakdown {
    /// Returns the count for a single status.
    pub fn count(&self, status: HealthStatus) -> usize {
        match status {
            HealthStatus::Excellent => self.excellent,
            HealthStatus::Good => self.good,
            HealthStatus::Attention => self.attention,
            HealthStatus::Critical => self.critical,
        }
    }

    /// Total number of classified workspaces.
    pub fn total(&self) -> usize {
        self.excellent + self.good + self.attention + self.critical
    }
}

/// A query window in epoch milliseconds, matching the endpoint's
/// `startDate`/`endDate` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DateRange {
    /// Rolling window ending at `now` and spanning the last `days` days.
    pub fn last_days(days: u32, now: DateTime<Utc>) -> Self {
        let end_ms = now.timestamp_millis();
        let start_ms = end_ms - i64::from(days) * 24 * 60 * 60 * 1000;
        Self { start_ms, end_ms }
    }

    /// Explicit window from local calendar dates: start of `start` to the
    /// last second of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        let start_ms = local_ms(start, NaiveTime::MIN)?;
        let end_time = NaiveTime::from_hms_opt(23, 59, 59)?;
        let end_ms = local_ms(end, end_time)?;
        Some(Self { start_ms, end_ms })
    }
}

fn local_ms(date: NaiveDate, time: NaiveTime) -> Option<i64> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

/// The lookback window the dashboard queries with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rolling window over the last N days, recomputed at every fetch.
    LastDays(u32),
    /// Fixed window from explicit dates.
    Explicit(DateRange),
}

impl Window {
    /// Resolves the window to a concrete epoch-millisecond range.
    pub fn to_range(&self, now: DateTime<Utc>) -> DateRange {
        match self {
            Window::LastDays(days) => DateRange::last_days(*days, now),
            Window::Explicit(range) => *range,
        }
    }

    /// Human-readable label for the dashboard header.
    pub fn label(&self) -> String {
        match self {
            Window::LastDays(days) => format!("Last {} days", days),
            Window::Explicit(range) => {
                let fmt_day = |ms: i64| {
                    DateTime::<Utc>::from_timestamp_millis(ms)
                        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| ms.to_string())
                };
                format!("{} to {}", fmt_day(range.start_ms), fmt_day(range.end_ms))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(HealthStatus::Critical < HealthStatus::Attention);
        assert!(HealthStatus::Attention < HealthStatus::Good);
        assert!(HealthStatus::Good < HealthStatus::Excellent);
    }

    #[test]
    fn test_status_display_is_title_cased() {
        assert_eq!(HealthStatus::Excellent.to_string(), "Excellent");
        assert_eq!(HealthStatus::Attention.to_string(), "Attention");
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(HealthStatus::Excellent.badge(), "✓");
        assert_eq!(HealthStatus::Good.badge(), "◐");
        assert_eq!(HealthStatus::Attention.badge(), "⚠");
        assert_eq!(HealthStatus::Critical.badge(), "✗");
    }

    #[test]
    fn test_pass_rate_percent_parsing() {
        let mut test = TestResult {
            scenario: "login".to_string(),
            project: "web".to_string(),
            total_runs: 10,
            passed: 9,
            failed: 1,
            pass_rate: "90.0".to_string(),
        };
        assert_eq!(test.pass_rate_percent(), 90.0);

        test.pass_rate = " 72.5% ".to_string();
        assert_eq!(test.pass_rate_percent(), 72.5);

        test.pass_rate = "n/a".to_string();
        assert_eq!(test.pass_rate_percent(), 0.0);
    }

    #[test]
    fn test_report_decodes_camel_case_payload() {
        let json = r#"{
            "workspaces": [
                {
                    "workspaceId": "ws-1",
                    "workspaceName": "Checkout",
                    "tests": [
                        {
                            "scenario": "smoke",
                            "project": "shop",
                            "totalRuns": 4,
                            "passed": 3,
                            "failed": 1,
                            "passRate": "75.0"
                        }
                    ]
                },
                { "workspaceId": "ws-2", "workspaceName": "Empty" }
            ]
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.workspaces.len(), 2);
        assert_eq!(report.workspaces[0].workspace_id, "ws-1");
        assert_eq!(report.workspaces[0].tests[0].total_runs, 4);
        // Missing tests array decodes as empty rather than failing.
        assert!(report.workspaces[1].tests.is_empty());
    }

    #[test]
    fn test_last_days_window() {
        let now = Utc::now();
        let range = DateRange::last_days(30, now);
        assert_eq!(range.end_ms, now.timestamp_millis());
        assert_eq!(range.end_ms - range.start_ms, 30 * 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_window_labels() {
        assert_eq!(Window::LastDays(7).label(), "Last 7 days");

        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let range = DateRange::from_dates(start, end).unwrap();
        assert!(range.start_ms < range.end_ms);
        let label = Window::Explicit(range).label();
        assert!(label.contains("2026-01-01"));
        assert!(label.contains("2026-01-31"));
    }
}
