//! JSON snapshot export.
//!
//! Serializes the derived summaries (not the raw payload) so downstream
//! tooling gets the same numbers the dashboard displays.

use crate::models::{OverallSummary, StatusBreakdown, WorkspaceSummary};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// One exported dashboard snapshot.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// When the snapshot was generated.
    pub generated_at: DateTime<Utc>,
    /// Human-readable query window.
    pub window: &'a str,
    /// Overall summary across non-excluded workspaces.
    pub overall: &'a OverallSummary,
    /// Per-workspace summaries, sorted as displayed.
    pub workspaces: &'a [WorkspaceSummary],
    /// Workspace count per health tier.
    pub breakdown: &'a StatusBreakdown,
}

/// Generate a pretty-printed JSON snapshot.
pub fn generate_json(snapshot: &Snapshot<'_>) -> Result<String> {
    serde_json::to_string_pretty(snapshot).map_err(Into::into)
}

/// Write a JSON snapshot to a file.
pub fn write_json(snapshot: &Snapshot<'_>, path: &Path) -> Result<()> {
    let content = generate_json(snapshot)?;
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write JSON to {}: {}", path.display(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthStatus;

    #[test]
    fn test_generate_json_snapshot() {
        let overall = OverallSummary {
            total: 150,
            passed: 110,
            failed: 40,
            pass_rate: 73.3,
            fail_rate: 26.7,
            status: HealthStatus::Good,
        };
        let workspaces = vec![WorkspaceSummary {
            name: "Alpha".to_string(),
            id: "a".to_string(),
            passed: 110,
            failed: 40,
            total: 150,
            pass_rate: 73.3,
            status: HealthStatus::Good,
        }];
        let breakdown = StatusBreakdown {
            good: 1,
            ..Default::default()
        };

        let snapshot = Snapshot {
            generated_at: Utc::now(),
            window: "Last 30 days",
            overall: &overall,
            workspaces: &workspaces,
            breakdown: &breakdown,
        };

        let json = generate_json(&snapshot).unwrap();
        assert!(json.contains("\"generated_at\""));
        assert!(json.contains("\"window\": \"Last 30 days\""));
        assert!(json.contains("\"pass_rate\": 73.3"));
        assert!(json.contains("\"status\": \"good\""));
        assert!(json.contains("\"workspaces\""));
    }
}
