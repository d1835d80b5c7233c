#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod engine;
pub mod error;
pub mod identity;
pub mod index;
pub mod installer;
pub mod outdated;
pub mod properties;
pub mod registry;
pub mod upgrade;
pub mod version;

pub use engine::UpgradeEngine;
pub use error::Error;
pub use identity::{PackageId, PackageKind};
pub use index::{FileIndexProvider, IndexEntry, IndexProvider, PackageIndex};
pub use installer::{DirInstaller, Installer};
pub use outdated::{detect, render_outdated, OutdatedEntry};
pub use properties::Properties;
pub use registry::{
    package_dir, record_name, DirRegistry, InstalledPackage, InstalledProvider, CORE_RECORD,
    LIBRARY_RECORD,
};
pub use upgrade::{execute, plan, ActionState, CancelToken, UpgradeAction, UpgradeReport};
pub use version::Version;
