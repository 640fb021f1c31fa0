//! Terminal dashboard rendering.
//!
//! Builds the full dashboard as one string: header, KPI cards, per-workspace
//! bar chart, health distribution, and the details table with optional
//! expanded per-test rows. Everything is recomputed from the current view
//! state on every render.

use crate::analysis::{status_breakdown, summarize_overall, summarize_workspaces, test_status};
use crate::dashboard::DashboardState;
use crate::models::{
    HealthStatus, OverallSummary, Report, StatusBreakdown, Workspace, WorkspaceSummary,
};
use crate::report::Theme;
use chrono::{DateTime, Local, Utc};

const BAR_WIDTH: usize = 35;
const DISTRIBUTION_BAR_WIDTH: usize = 20;
const MAX_NAME_WIDTH: usize = 30;

/// Which table rows get expanded per-test details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expand {
    /// Summary rows only.
    None,
    /// Expand every workspace.
    All,
    /// Expand the workspace with this id.
    One(String),
}

impl Expand {
    fn matches(&self, workspace_id: &str) -> bool {
        match self {
            Expand::None => false,
            Expand::All => true,
            Expand::One(id) => id == workspace_id,
        }
    }
}

/// Static render settings for one dashboard.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Header label for the active query window.
    pub window_label: String,
    /// Row expansion selection.
    pub expand: Expand,
}

/// Render the complete dashboard for the current view state.
pub fn render_dashboard(state: &DashboardState, opts: &RenderOptions, theme: &Theme) -> String {
    let mut output = String::new();

    output.push_str(&render_header(&opts.window_label, state.last_updated(), theme));

    if let Some(message) = state.last_error() {
        output.push_str(&render_error_panel(message, state.report().is_some(), theme));
    }

    let Some(report) = state.report() else {
        return output;
    };

    let overall = summarize_overall(report, state.excluded());
    let summaries = summarize_workspaces(report, state.excluded());
    let breakdown = status_breakdown(&summaries);

    output.push_str(&render_kpi_cards(&overall, theme));
    output.push_str(&render_bar_chart(&summaries, theme));
    output.push_str(&render_distribution(&breakdown, theme));
    output.push_str(&render_table(report, &summaries, &opts.expand, theme));

    if !state.excluded().is_empty() {
        output.push_str(&format!(
            "{}\n",
            theme.dim(&format!(
                "{} workspace(s) excluded from analysis",
                state.excluded().len()
            ))
        ));
    }

    output
}

/// Header with title, query window, and last-updated timestamp.
fn render_header(
    window_label: &str,
    last_updated: Option<DateTime<Utc>>,
    theme: &Theme,
) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "{}  {}\n",
        theme.heading("Test Performance Dashboard"),
        theme.dim(window_label)
    ));

    if let Some(updated) = last_updated {
        let local = updated.with_timezone(&Local);
        section.push_str(&format!(
            "{}\n",
            theme.dim(&format!("Updated: {}", local.format("%Y-%m-%d %H:%M:%S")))
        ));
    }

    section.push('\n');
    section
}

/// Error panel for a failed fetch, with a retry hint.
fn render_error_panel(message: &str, has_stale_data: bool, theme: &Theme) -> String {
    let mut section = String::new();

    section.push_str(&format!("{}\n", theme.error("⚠ Error Loading Data")));
    section.push_str(&format!("  {}\n", message));
    if has_stale_data {
        section.push_str(&format!(
            "  {}\n",
            theme.dim("Showing last successful data. The next poll will retry.")
        ));
    } else {
        section.push_str(&format!(
            "  {}\n",
            theme.dim("Run again or wait for the next poll to retry.")
        ));
    }

    section.push('\n');
    section
}

/// KPI cards: total runs, passed, failed, overall status.
fn render_kpi_cards(overall: &OverallSummary, theme: &Theme) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "  Total Runs       {}\n",
        theme.bold(&pad_left(&group_thousands(overall.total), 10))
    ));
    section.push_str(&format!(
        "  Passed           {}   {}\n",
        theme.passed(&pad_left(&group_thousands(overall.passed), 10)),
        theme.dim(&format!("{:.1}% success", overall.pass_rate))
    ));
    section.push_str(&format!(
        "  Failed           {}   {}\n",
        theme.failed(&pad_left(&group_thousands(overall.failed), 10)),
        theme.dim(&format!("{:.1}% failure", overall.fail_rate))
    ));
    section.push_str(&format!(
        "  Overall Status   {}   {}\n",
        theme.status(
            overall.status,
            &pad_left(&format!("{:.1}%", overall.pass_rate), 10)
        ),
        theme.status(
            overall.status,
            &format!("{} {}", overall.status.badge(), overall.status)
        )
    ));

    section.push('\n');
    section
}

/// Stacked passed/failed bar per workspace, scaled to the largest total.
fn render_bar_chart(summaries: &[WorkspaceSummary], theme: &Theme) -> String {
    if summaries.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str(&format!("{}\n\n", theme.heading("Performance by Workspace")));

    let max_total = summaries.iter().map(|w| w.total).max().unwrap_or(0).max(1);
    let name_width = name_column_width(summaries);

    for workspace in summaries {
        let bar_len = scaled(workspace.total, max_total, BAR_WIDTH);
        let passed_len = if workspace.total == 0 {
            0
        } else {
            scaled(workspace.passed, workspace.total, bar_len)
        };
        let failed_len = bar_len - passed_len;

        let bar = format!(
            "{}{}",
            theme.passed(&"█".repeat(passed_len)),
            theme.failed(&"▓".repeat(failed_len))
        );

        section.push_str(&format!(
            "  {}  {}{}  {}\n",
            fit(&workspace.name, name_width),
            bar,
            " ".repeat(BAR_WIDTH - bar_len),
            theme.dim(&group_thousands(workspace.total))
        ));
    }

    section.push('\n');
    section
}

/// Workspace count per health tier (the pie chart's CLI stand-in).
fn render_distribution(breakdown: &StatusBreakdown, theme: &Theme) -> String {
    let mut section = String::new();
    section.push_str(&format!("{}\n\n", theme.heading("Workspace Health")));

    let total = breakdown.total().max(1);
    for status in HealthStatus::all_best_first() {
        let count = breakdown.count(status);
        let bar_len = scaled(count as u64, total as u64, DISTRIBUTION_BAR_WIDTH);
        section.push_str(&format!(
            "  {} {}  {}  {:>3}  {}\n",
            theme.status(status, status.badge()),
            theme.status(status, &pad_right(&status.to_string(), 9)),
            theme.dim(&pad_right(&format!("({})", status.band_caption()), 18)),
            count,
            theme.status(status, &"█".repeat(bar_len))
        ));
    }

    section.push('\n');
    section
}

/// Details table with one row per workspace and optional per-test rows.
fn render_table(
    report: &Report,
    summaries: &[WorkspaceSummary],
    expand: &Expand,
    theme: &Theme,
) -> String {
    if summaries.is_empty() {
        return format!("{}\n", theme.dim("No workspaces with test results in this window."));
    }

    let mut section = String::new();
    section.push_str(&format!(
        "{}\n\n",
        theme.heading("Workspace Performance Details")
    ));

    let name_width = name_column_width(summaries);
    section.push_str(&theme.dim(&format!(
        "  {:<width$}  {:>10}  {:>9}  {:>9}  {:>9}  Status\n",
        "Workspace",
        "Total Runs",
        "Passed",
        "Failed",
        "Pass Rate",
        width = name_width
    )));
    section.push_str(&theme.dim(&format!(
        "  {}\n",
        "-".repeat(name_width + 56)
    )));

    for workspace in summaries {
        section.push_str(&format!(
            "  {}  {}  {}  {}  {}  {}\n",
            fit(&workspace.name, name_width),
            pad_left(&group_thousands(workspace.total), 10),
            theme.passed(&pad_left(&group_thousands(workspace.passed), 9)),
            theme.failed(&pad_left(&group_thousands(workspace.failed), 9)),
            theme.status(
                workspace.status,
                &pad_left(&format!("{:.1}%", workspace.pass_rate), 9)
            ),
            theme.status(
                workspace.status,
                &format!("{} {}", workspace.status.badge(), workspace.status)
            )
        ));

        if expand.matches(&workspace.id) {
            if let Some(ws) = report
                .workspaces
                .iter()
                .find(|w| w.workspace_id == workspace.id)
            {
                section.push_str(&render_test_rows(ws, name_width, theme));
            }
        }
    }

    section.push('\n');
    section
}

/// Expanded per-test rows under a workspace row.
fn render_test_rows(workspace: &Workspace, name_width: usize, theme: &Theme) -> String {
    let mut section = String::new();

    for test in &workspace.tests {
        let status = test_status(test);
        let label = format!("└ {} ({})", test.scenario, test.project);
        section.push_str(&format!(
            "  {}  {}  {}  {}  {}  {}\n",
            theme.dim(&fit(&label, name_width)),
            pad_left(&group_thousands(test.total_runs), 10),
            theme.passed(&pad_left(&group_thousands(test.passed), 9)),
            theme.failed(&pad_left(&group_thousands(test.failed), 9)),
            theme.status(
                status,
                &pad_left(&format!("{:.1}%", test.pass_rate_percent()), 9)
            ),
            theme.status(status, &format!("{} {}", status.badge(), status))
        ));
    }

    section
}

/// Number of bar cells for `part` out of `total`, never exceeding `width`.
fn scaled(part: u64, total: u64, width: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let cells = (part as f64 / total as f64 * width as f64).round() as usize;
    cells.min(width)
}

/// Format an integer with thousands separators (12345 -> "12,345").
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(c);
    }

    output
}

fn name_column_width(summaries: &[WorkspaceSummary]) -> usize {
    summaries
        .iter()
        .map(|w| w.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("Workspace".len(), MAX_NAME_WIDTH)
}

/// Truncate to `width` characters (with ellipsis) and pad to exactly `width`.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{}{}", text, " ".repeat(width - count));
    }
    let truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", truncated)
}

fn pad_left(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - count), text)
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Action, DashboardState};
    use crate::models::TestResult;
    use std::collections::HashSet;

    fn sample_report() -> Report {
        Report {
            workspaces: vec![
                Workspace {
                    workspace_id: "a".to_string(),
                    workspace_name: "Alpha".to_string(),
                    tests: vec![TestResult {
                        scenario: "smoke".to_string(),
                        project: "shop".to_string(),
                        total_runs: 100,
                        passed: 90,
                        failed: 10,
                        pass_rate: "90.0".to_string(),
                    }],
                },
                Workspace {
                    workspace_id: "b".to_string(),
                    workspace_name: "Beta".to_string(),
                    tests: vec![TestResult {
                        scenario: "load".to_string(),
                        project: "api".to_string(),
                        total_runs: 50,
                        passed: 20,
                        failed: 30,
                        pass_rate: "40.0".to_string(),
                    }],
                },
            ],
        }
    }

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::new(HashSet::new());
        let generation = state.begin_fetch();
        state.apply(Action::FetchSucceeded {
            generation,
            report: sample_report(),
            at: Utc::now(),
        });
        state
    }

    fn opts() -> RenderOptions {
        RenderOptions {
            window_label: "Last 30 days".to_string(),
            expand: Expand::None,
        }
    }

    #[test]
    fn test_render_dashboard_contains_all_sections() {
        let output = render_dashboard(&loaded_state(), &opts(), &Theme::Plain);

        assert!(output.contains("Test Performance Dashboard"));
        assert!(output.contains("Last 30 days"));
        assert!(output.contains("Total Runs"));
        assert!(output.contains("Performance by Workspace"));
        assert!(output.contains("Workspace Health"));
        assert!(output.contains("Workspace Performance Details"));
        assert!(output.contains("Alpha"));
        assert!(output.contains("Beta"));
        // Overall: 110/150 = 73.3% -> Good.
        assert!(output.contains("73.3%"));
        assert!(output.contains("Good"));
    }

    #[test]
    fn test_plain_theme_output_has_no_escapes() {
        let output = render_dashboard(&loaded_state(), &opts(), &Theme::Plain);
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_expanded_rows_list_tests() {
        let mut options = opts();
        options.expand = Expand::One("a".to_string());
        let output = render_dashboard(&loaded_state(), &options, &Theme::Plain);

        assert!(output.contains("smoke (shop)"));
        // Beta stays collapsed.
        assert!(!output.contains("load (api)"));

        options.expand = Expand::All;
        let output = render_dashboard(&loaded_state(), &options, &Theme::Plain);
        assert!(output.contains("load (api)"));
    }

    #[test]
    fn test_error_panel_keeps_stale_table() {
        let mut state = loaded_state();
        let generation = state.begin_fetch();
        state.apply(Action::FetchFailed {
            generation,
            message: "HTTP 502: bad gateway".to_string(),
        });

        let output = render_dashboard(&state, &opts(), &Theme::Plain);
        assert!(output.contains("Error Loading Data"));
        assert!(output.contains("HTTP 502: bad gateway"));
        // Stale data remains visible below the panel.
        assert!(output.contains("Alpha"));
    }

    #[test]
    fn test_error_without_data_renders_only_panel() {
        let mut state = DashboardState::new(HashSet::new());
        let generation = state.begin_fetch();
        state.apply(Action::FetchFailed {
            generation,
            message: "cannot connect".to_string(),
        });

        let output = render_dashboard(&state, &opts(), &Theme::Plain);
        assert!(output.contains("cannot connect"));
        assert!(!output.contains("Total Runs"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_fit_truncates_long_names() {
        assert_eq!(fit("abc", 5), "abc  ");
        let fitted = fit("a-very-long-workspace-name", 10);
        assert_eq!(fitted.chars().count(), 10);
        assert!(fitted.ends_with('…'));
    }
}
