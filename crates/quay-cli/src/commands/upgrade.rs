//! `quay upgrade` command implementation.

use miette::{IntoDiagnostic, Result};
use quay_core::UpgradeAction;
use serde::Serialize;
use std::path::Path;

/// Upgrade result for JSON output.
#[derive(Serialize)]
struct UpgradeResult {
    ok: bool,
    actions: Vec<UpgradeAction>,
    failed: Vec<FailedAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct FailedAction {
    id: String,
    reason: String,
}

pub fn run(root: &Path, index: &Path, json: bool) -> Result<()> {
    let engine = super::fs_engine(root, index);

    match engine.upgrade() {
        Ok(report) => {
            for action in report.failures() {
                tracing::warn!(
                    package = %action.id,
                    reason = action.failure_reason().unwrap_or(""),
                    "upgrade action failed"
                );
            }

            if json {
                let failed = report
                    .failures()
                    .map(|a| FailedAction {
                        id: a.id.display_id(),
                        reason: a.failure_reason().unwrap_or("").to_string(),
                    })
                    .collect();
                let result = UpgradeResult {
                    ok: report.ok(),
                    actions: report.actions,
                    failed,
                    error: None,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).into_diagnostic()?
                );
            } else {
                // Nothing outdated means no output at all.
                print!("{}", report.render());
            }
            // Per-action failures are informational, not a process failure.
            Ok(())
        }
        Err(e) => {
            if json {
                let result = UpgradeResult {
                    ok: false,
                    actions: Vec::new(),
                    failed: Vec::new(),
                    error: Some(e.to_string()),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).into_diagnostic()?
                );
                std::process::exit(1);
            }
            Err(e).into_diagnostic()
        }
    }
}
