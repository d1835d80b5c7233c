//! Installer collaborator.
//!
//! The engine only asks the installer to put a specific version of a
//! specific identity in place; how that happens (download, extraction) is
//! the collaborator's concern. The contract the rest of the engine relies
//! on: after a successful install, the registry reports the new version.

use crate::error::Error;
use crate::identity::PackageId;
use crate::properties::Properties;
use crate::registry::{package_dir, record_name};
use crate::version::Version;
use std::fs;
use std::path::{Path, PathBuf};

/// Applies a single install action.
pub trait Installer {
    /// Install `version` of `id`.
    ///
    /// # Errors
    /// Returns an error describing why this one install failed; the
    /// executor records it per-action and moves on.
    fn install(&self, id: &PackageId, version: &Version) -> Result<(), Error>;
}

/// Directory-backed installer sharing the registry's layout.
///
/// Rewrites the package's metadata record with the target version,
/// creating the package directory and record on first install. Other
/// record entries are left untouched.
#[derive(Debug, Clone)]
pub struct DirInstaller {
    root: PathBuf,
}

impl DirInstaller {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Installer for DirInstaller {
    fn install(&self, id: &PackageId, version: &Version) -> Result<(), Error> {
        let dir = package_dir(&self.root, id);
        fs::create_dir_all(&dir)
            .map_err(|e| Error::install(id.display_id(), e.to_string()))?;

        let record = dir.join(record_name(id.kind));
        let mut props = if record.is_file() {
            let content = fs::read_to_string(&record)
                .map_err(|e| Error::install(id.display_id(), e.to_string()))?;
            Properties::parse(&content)
        } else {
            Properties::new()
        };

        if props.get("name").is_none() {
            props.set("name", id.display_id());
        }
        props.set("version", version.raw());

        fs::write(&record, props.to_record())
            .map_err(|e| Error::install(id.display_id(), e.to_string()))?;
        Ok(())
    }
}
