//! The detect → plan → execute engine.
//!
//! Collaborators are injected; there is no process-wide index or registry
//! state, so engines can be built freely in tests and called repeatedly.
//! Every pass re-fetches the index and re-lists installed packages, which
//! is what makes re-running the cycle after a partial failure safe.

use crate::error::Error;
use crate::index::IndexProvider;
use crate::installer::Installer;
use crate::outdated::{detect, OutdatedEntry};
use crate::registry::InstalledProvider;
use crate::upgrade::{execute, plan, CancelToken, UpgradeReport};

/// Outdated/upgrade engine over injected collaborators.
#[derive(Debug)]
pub struct UpgradeEngine<I, R, N> {
    index: I,
    registry: R,
    installer: N,
}

impl<I, R, N> UpgradeEngine<I, R, N>
where
    I: IndexProvider,
    R: InstalledProvider,
    N: Installer,
{
    pub fn new(index: I, registry: R, installer: N) -> Self {
        Self {
            index,
            registry,
            installer,
        }
    }

    /// Fresh outdated scan: fetch the index, list installed, detect.
    ///
    /// # Errors
    /// Fails when either collaborator snapshot is unavailable; the engine
    /// never works from partial inputs.
    pub fn outdated(&self) -> Result<Vec<OutdatedEntry>, Error> {
        let index = self.index.fetch()?;
        let installed = self.registry.list()?;
        Ok(detect(&installed, &index))
    }

    /// Run a full detect → plan → execute cycle.
    ///
    /// After a fully successful report, a subsequent [`outdated`] call
    /// returns empty for every upgraded identity. Zero outdated packages
    /// yields an empty, successful report.
    ///
    /// # Errors
    /// Fails only on collaborator faults; per-package install failures are
    /// recorded in the report instead.
    ///
    /// [`outdated`]: UpgradeEngine::outdated
    pub fn upgrade(&self) -> Result<UpgradeReport, Error> {
        self.upgrade_with_cancel(&CancelToken::new())
    }

    /// Like [`upgrade`], with a caller-supplied cancellation handle.
    ///
    /// Cancellation leaves already-finished outcomes intact and marks
    /// not-yet-started actions Skipped.
    ///
    /// [`upgrade`]: UpgradeEngine::upgrade
    pub fn upgrade_with_cancel(&self, cancel: &CancelToken) -> Result<UpgradeReport, Error> {
        let entries = self.outdated()?;
        let actions = plan(&entries);
        Ok(execute(actions, &self.installer, cancel))
    }
}
