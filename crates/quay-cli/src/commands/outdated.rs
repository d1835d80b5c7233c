//! `quay outdated` command implementation.

use miette::{IntoDiagnostic, Result};
use quay_core::{render_outdated, OutdatedEntry};
use serde::Serialize;
use std::path::Path;

/// Outdated result for JSON output.
#[derive(Serialize)]
struct OutdatedResult {
    ok: bool,
    outdated: Vec<OutdatedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(root: &Path, index: &Path, json: bool) -> Result<()> {
    let engine = super::fs_engine(root, index);

    match engine.outdated() {
        Ok(entries) => {
            tracing::debug!(count = entries.len(), "outdated scan complete");
            if json {
                let result = OutdatedResult {
                    ok: true,
                    outdated: entries,
                    error: None,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).into_diagnostic()?
                );
            } else {
                // One line per entry, nothing at all when up to date.
                print!("{}", render_outdated(&entries));
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let result = OutdatedResult {
                    ok: false,
                    outdated: Vec::new(),
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
