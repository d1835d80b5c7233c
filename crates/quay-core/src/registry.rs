//! View of installed packages.
//!
//! Installed state is re-derived from disk on every call, never cached:
//! the upgrade flow depends on observing out-of-band edits to a package's
//! metadata record between calls.

use crate::error::Error;
use crate::identity::{PackageId, PackageKind};
use crate::properties::Properties;
use crate::version::Version;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Metadata record file name for an installed core.
pub const CORE_RECORD: &str = "core.properties";
/// Metadata record file name for an installed library.
pub const LIBRARY_RECORD: &str = "library.properties";

/// Record file name for a package kind.
#[must_use]
pub fn record_name(kind: PackageKind) -> &'static str {
    match kind {
        PackageKind::Core => CORE_RECORD,
        PackageKind::Library => LIBRARY_RECORD,
    }
}

/// On-disk directory for a package under a data root.
///
/// Cores live at `cores/<vendor>/<arch>/`, libraries at `libraries/<Name>/`.
#[must_use]
pub fn package_dir(root: &Path, id: &PackageId) -> PathBuf {
    match (&id.kind, &id.arch) {
        (PackageKind::Core, Some(arch)) => root.join("cores").join(&id.name).join(arch),
        (PackageKind::Core, None) => root.join("cores").join(&id.name),
        (PackageKind::Library, _) => root.join("libraries").join(&id.name),
    }
}

/// An installed package as reported by the registry.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    pub id: PackageId,
    /// Parsed from the record's `version=` entry; malformed or missing
    /// values come back Unknown, not as an error.
    pub version: Version,
    /// Install directory, for collaborators that need the handle.
    pub location: PathBuf,
}

/// Source of installed-package snapshots.
pub trait InstalledProvider {
    /// List currently installed packages, re-read from disk.
    ///
    /// # Errors
    /// Returns an error when the installed state itself is unreadable.
    fn list(&self) -> Result<Vec<InstalledPackage>, Error>;
}

/// Directory-backed installed registry.
#[derive(Debug, Clone)]
pub struct DirRegistry {
    root: PathBuf,
}

impl DirRegistry {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl InstalledProvider for DirRegistry {
    fn list(&self) -> Result<Vec<InstalledPackage>, Error> {
        let mut out = Vec::new();

        let cores_dir = self.root.join("cores");
        if cores_dir.is_dir() {
            for entry in WalkDir::new(&cores_dir).min_depth(2).max_depth(2) {
                let entry = entry.map_err(|e| Error::RegistryRead {
                    path: cores_dir.clone(),
                    source: e.into(),
                })?;
                if !entry.file_type().is_dir() {
                    continue;
                }
                let record = entry.path().join(CORE_RECORD);
                if !record.is_file() {
                    // Not an installed core, just a stray directory.
                    continue;
                }
                let vendor = parent_dir_name(entry.path());
                let arch = entry.file_name().to_string_lossy().into_owned();
                let id = PackageId::core(vendor, arch);
                out.push(read_installed(id, entry.path(), &record)?);
            }
        }

        let libraries_dir = self.root.join("libraries");
        if libraries_dir.is_dir() {
            for entry in WalkDir::new(&libraries_dir).min_depth(1).max_depth(1) {
                let entry = entry.map_err(|e| Error::RegistryRead {
                    path: libraries_dir.clone(),
                    source: e.into(),
                })?;
                if !entry.file_type().is_dir() {
                    continue;
                }
                let record = entry.path().join(LIBRARY_RECORD);
                if !record.is_file() {
                    continue;
                }
                let id = PackageId::library(entry.file_name().to_string_lossy().into_owned());
                out.push(read_installed(id, entry.path(), &record)?);
            }
        }

        Ok(out)
    }
}

fn parent_dir_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_installed(id: PackageId, dir: &Path, record: &Path) -> Result<InstalledPackage, Error> {
    let content = fs::read_to_string(record).map_err(|source| Error::RegistryRead {
        path: record.to_path_buf(),
        source,
    })?;
    let props = Properties::parse(&content);
    let version = Version::parse(props.get("version").unwrap_or(""));
    Ok(InstalledPackage {
        id,
        version,
        location: dir.to_path_buf(),
    })
}
