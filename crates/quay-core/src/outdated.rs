//! Outdated detection.
//!
//! A pure scan over two explicit snapshots: the installed set and the
//! index. No hidden state, so it can be re-run freely; repeated calls over
//! unchanged inputs produce the identical sequence.

use crate::identity::PackageId;
use crate::index::PackageIndex;
use crate::registry::InstalledPackage;
use crate::version::Version;
use serde::Serialize;
use std::fmt::Write as _;

/// One installed package that is older than the index's latest release.
#[derive(Debug, Clone, Serialize)]
pub struct OutdatedEntry {
    pub id: PackageId,
    pub display_name: String,
    pub installed: Version,
    pub latest: Version,
}

/// Compare installed packages against the index.
///
/// An identity absent from the index is skipped (no action, not an error).
/// A package is outdated when its installed version orders strictly below
/// the latest index version; the Unknown category orders below everything,
/// so a corrupted installed version always qualifies. Output is sorted by
/// identity: cores before libraries, then by name.
#[must_use]
pub fn detect(installed: &[InstalledPackage], index: &PackageIndex) -> Vec<OutdatedEntry> {
    let mut out = Vec::new();
    for pkg in installed {
        let Some(latest) = index.latest(&pkg.id) else {
            continue;
        };
        if pkg.version < *latest {
            out.push(OutdatedEntry {
                id: pkg.id.clone(),
                display_name: index.display_name(&pkg.id),
                installed: pkg.version.clone(),
                latest: latest.clone(),
            });
        }
    }
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}

/// Render the outdated set for humans, one line per entry.
///
/// Each line starts with the package's display name (consumers match on the
/// line prefix). An empty set renders the empty string; callers use that
/// exact emptiness as the nothing-to-do signal.
#[must_use]
pub fn render_outdated(entries: &[OutdatedEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{} {} -> {}",
            entry.display_name, entry.installed, entry.latest
        );
    }
    out
}
