//! Statistics aggregation and health classification.
//!
//! Pure, stateless functions that derive overall totals, per-workspace
//! summaries, and four-tier health classifications from a fetched payload.
//! Every render recomputes from the current payload and exclusion set; there
//! is no caching or incremental update.

use crate::models::{
    HealthStatus, OverallSummary, Report, StatusBreakdown, TestResult, Workspace, WorkspaceSummary,
};
use std::collections::HashSet;

/// Classify a pass-rate percentage into a health tier.
///
/// Boundary values belong to the higher band: 90 is Excellent, 70 is Good,
/// 50 is Attention.
pub fn classify(pass_rate_percent: f64) -> HealthStatus {
    if pass_rate_percent >= 90.0 {
        HealthStatus::Excellent
    } else if pass_rate_percent >= 70.0 {
        HealthStatus::Good
    } else if pass_rate_percent >= 50.0 {
        HealthStatus::Attention
    } else {
        HealthStatus::Critical
    }
}

/// Classify a single test result from its upstream pass-rate string.
pub fn test_status(test: &TestResult) -> HealthStatus {
    classify(test.pass_rate_percent())
}

/// Sum runs across all tests of all non-excluded workspaces.
///
/// Workspaces with no tests contribute nothing, so they do not need to be
/// filtered here.
pub fn summarize_overall(report: &Report, excluded_ids: &HashSet<String>) -> OverallSummary {
    let mut total = 0u64;
    let mut passed = 0u64;
    let mut failed = 0u64;

    for workspace in included(report, excluded_ids) {
        for test in &workspace.tests {
            total += test.total_runs;
            passed += test.passed;
            failed += test.failed;
        }
    }

    let pass_rate = rate(passed, total);
    OverallSummary {
        total,
        passed,
        failed,
        pass_rate,
        fail_rate: rate(failed, total),
        status: classify(pass_rate),
    }
}

/// One summary per non-excluded workspace that has at least one test entry,
/// sorted descending by total runs. Ties keep upstream order (stable sort).
///
/// A workspace whose tests sum to zero runs is kept and classified Critical
/// at a 0.0 pass rate; only workspaces with an empty test list are dropped.
pub fn summarize_workspaces(
    report: &Report,
    excluded_ids: &HashSet<String>,
) -> Vec<WorkspaceSummary> {
    let mut summaries: Vec<WorkspaceSummary> = included(report, excluded_ids)
        .filter(|ws| !ws.tests.is_empty())
        .map(summarize_workspace)
        .collect();

    summaries.sort_by(|a, b| b.total.cmp(&a.total));
    summaries
}

/// Count workspaces per health status.
pub fn status_breakdown(summaries: &[WorkspaceSummary]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();

    for summary in summaries {
        match summary.status {
            HealthStatus::Excellent => breakdown.excellent += 1,
            HealthStatus::Good => breakdown.good += 1,
            HealthStatus::Attention => breakdown.attention += 1,
            HealthStatus::Critical => breakdown.critical += 1,
        }
    }

    breakdown
}

fn summarize_workspace(workspace: &Workspace) -> WorkspaceSummary {
    let mut total = 0u64;
    let mut passed = 0u64;
    let mut failed = 0u64;

    for test in &workspace.tests {
        total += test.total_runs;
        passed += test.passed;
        failed += test.failed;
    }

    let pass_rate = rate(passed, total);
    WorkspaceSummary {
        name: workspace.workspace_name.clone(),
        id: workspace.workspace_id.clone(),
        passed,
        failed,
        total,
        pass_rate,
        status: classify(pass_rate),
    }
}

fn included<'a>(
    report: &'a Report,
    excluded_ids: &'a HashSet<String>,
) -> impl Iterator<Item = &'a Workspace> {
    report
        .workspaces
        .iter()
        .filter(move |ws| !excluded_ids.contains(&ws.workspace_id))
}

/// Percentage of `part` in `total`, rounded to one decimal. 0 when total is 0.
fn rate(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
