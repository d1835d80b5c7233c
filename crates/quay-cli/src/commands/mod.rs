//! Command implementations.

pub mod outdated;
pub mod upgrade;
pub mod version;

use quay_core::{DirInstaller, DirRegistry, FileIndexProvider, UpgradeEngine};
use std::path::Path;

pub(crate) type FsEngine = UpgradeEngine<FileIndexProvider, DirRegistry, DirInstaller>;

/// Build the engine over the filesystem collaborators for a data root.
pub(crate) fn fs_engine(root: &Path, index: &Path) -> FsEngine {
    UpgradeEngine::new(
        FileIndexProvider::new(index),
        DirRegistry::new(root),
        DirInstaller::new(root),
    )
}
