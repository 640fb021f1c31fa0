//! CSV export of the visible workspace summaries.
//!
//! Matches the on-screen table: header
//! `Workspace,Total Runs,Passed,Failed,Pass Rate,Status`, one row per
//! visible workspace, pass rate as `NN.N%`, status title-cased. The
//! workspace name is always double-quoted with embedded quotes doubled, so
//! names containing commas round-trip cleanly.

use crate::models::WorkspaceSummary;
use anyhow::{Context, Result};
use std::path::Path;

/// CSV column header.
pub const CSV_HEADER: &str = "Workspace,Total Runs,Passed,Failed,Pass Rate,Status";

/// Generate the CSV document for the given summaries.
pub fn generate_csv(summaries: &[WorkspaceSummary]) -> String {
    let mut output = String::new();
    output.push_str(CSV_HEADER);
    output.push('\n');

    for workspace in summaries {
        output.push_str(&format!(
            "\"{}\",{},{},{},{:.1}%,{}\n",
            workspace.name.replace('"', "\"\""),
            workspace.total,
            workspace.passed,
            workspace.failed,
            workspace.pass_rate,
            workspace.status
        ));
    }

    output
}

/// Write the CSV document to a file.
pub fn write_csv(summaries: &[WorkspaceSummary], path: &Path) -> Result<()> {
    let content = generate_csv(summaries);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    Ok(())
}
