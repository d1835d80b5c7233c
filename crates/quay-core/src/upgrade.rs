//! Upgrade planning and execution.
//!
//! The planner turns the outdated set into pending actions; the executor
//! applies each through the installer collaborator. A failing install is
//! recorded on its own action and never blocks the rest of the plan.

use crate::error::Error;
use crate::identity::PackageId;
use crate::installer::Installer;
use crate::outdated::OutdatedEntry;
use crate::version::Version;
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of one upgrade action.
///
/// Pending transitions to Succeeded or Failed, both terminal. Skipped is
/// the cancellation outcome for actions that never started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ActionState {
    Pending,
    Succeeded,
    Failed { reason: String },
    Skipped,
}

/// One planned upgrade: bring `id` from `from` to `to`.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeAction {
    pub id: PackageId,
    pub display_name: String,
    pub from: Version,
    pub to: Version,
    #[serde(flatten)]
    pub state: ActionState,
}

impl UpgradeAction {
    /// The failure reason, when this action failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.state {
            ActionState::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Convert the outdated set into pending actions, preserving its order.
#[must_use]
pub fn plan(entries: &[OutdatedEntry]) -> Vec<UpgradeAction> {
    entries
        .iter()
        .map(|entry| UpgradeAction {
            id: entry.id.clone(),
            display_name: entry.display_name.clone(),
            from: entry.installed.clone(),
            to: entry.latest.clone(),
            state: ActionState::Pending,
        })
        .collect()
}

/// Cooperative cancellation handle for an execute pass.
///
/// Once cancelled, not-yet-started actions are marked Skipped; outcomes
/// already reached stay intact.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Apply each action in plan order through the installer.
///
/// Actions target distinct identities, so one failure carries no
/// consequence for its siblings. The report lists actions in plan order.
#[must_use]
pub fn execute<N: Installer + ?Sized>(
    mut actions: Vec<UpgradeAction>,
    installer: &N,
    cancel: &CancelToken,
) -> UpgradeReport {
    for action in &mut actions {
        if cancel.is_cancelled() {
            action.state = ActionState::Skipped;
            continue;
        }
        action.state = match installer.install(&action.id, &action.to) {
            Ok(()) => ActionState::Succeeded,
            Err(e) => ActionState::Failed {
                reason: e.to_string(),
            },
        };
    }
    UpgradeReport { actions }
}

/// Result of an execute pass.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeReport {
    pub actions: Vec<UpgradeAction>,
}

impl UpgradeReport {
    /// Fully successful: every action succeeded. Vacuously true for an
    /// empty plan (a zero-outdated upgrade is a no-op success).
    #[must_use]
    pub fn ok(&self) -> bool {
        self.actions
            .iter()
            .all(|a| a.state == ActionState::Succeeded)
    }

    /// Actions that failed, with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = &UpgradeAction> {
        self.actions
            .iter()
            .filter(|a| matches!(a.state, ActionState::Failed { .. }))
    }

    /// Render the report for humans, one line per action, display name
    /// first. An empty report renders the empty string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for action in &self.actions {
            match &action.state {
                ActionState::Succeeded | ActionState::Pending => {
                    let _ = writeln!(
                        out,
                        "{} {} -> {}",
                        action.display_name, action.from, action.to
                    );
                }
                ActionState::Failed { reason } => {
                    let _ = writeln!(
                        out,
                        "{} {} -> {}: failed: {reason}",
                        action.display_name, action.from, action.to
                    );
                }
                ActionState::Skipped => {
                    let _ = writeln!(
                        out,
                        "{} {} -> {}: skipped",
                        action.display_name, action.from, action.to
                    );
                }
            }
        }
        out
    }
}
