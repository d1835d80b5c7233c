//! In-memory view of the package index.
//!
//! The index is the catalog of packages available for install, keyed by
//! identity. The engine only ever asks it one question: what is the latest
//! known version for this identity? Identities the index does not know are
//! answered with `None`, never an error — an installed package the index has
//! forgotten is simply left alone.

use crate::error::Error;
use crate::identity::PackageId;
use crate::version::Version;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One package known to the index, with every release the index has seen.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub id: PackageId,
    /// Human-facing name (e.g. "Arduino AVR Boards"); the identity's display
    /// form is used when the index carries none.
    pub display_name: Option<String>,
    pub versions: Vec<Version>,
}

impl IndexEntry {
    #[must_use]
    pub fn new(id: PackageId, versions: Vec<Version>) -> Self {
        Self {
            id,
            display_name: None,
            versions,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Latest release under the version total order.
    ///
    /// Equal versions from different releases are not expected; a tie
    /// resolves to whichever instance `max` returns.
    #[must_use]
    pub fn latest(&self) -> Option<&Version> {
        self.versions.iter().max()
    }
}

/// Snapshot of available packages.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    entries: HashMap<PackageId, IndexEntry>,
}

impl PackageIndex {
    #[must_use]
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    /// Latest known version for `id`, or `None` if the index does not know
    /// the identity.
    #[must_use]
    pub fn latest(&self, id: &PackageId) -> Option<&Version> {
        self.entries.get(id).and_then(IndexEntry::latest)
    }

    /// Human-facing name for `id`, falling back to the identity itself.
    #[must_use]
    pub fn display_name(&self, id: &PackageId) -> String {
        self.entries
            .get(id)
            .and_then(|e| e.display_name.clone())
            .unwrap_or_else(|| id.display_id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of index snapshots.
///
/// How the index document got onto disk (network fetch, cache) is the
/// provider's own concern; the engine only consumes the parsed snapshot.
pub trait IndexProvider {
    /// Fetch a fresh index snapshot.
    ///
    /// # Errors
    /// Returns an error when the index is unreachable or malformed; the
    /// engine treats that as a hard failure of the whole call.
    fn fetch(&self) -> Result<PackageIndex, Error>;
}

/// Index document schema.
#[derive(Debug, Deserialize)]
struct IndexDoc {
    #[serde(default)]
    cores: Vec<CoreDoc>,
    #[serde(default)]
    libraries: Vec<LibraryDoc>,
}

#[derive(Debug, Deserialize)]
struct CoreDoc {
    vendor: String,
    architecture: String,
    #[serde(default)]
    name: Option<String>,
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LibraryDoc {
    name: String,
    versions: Vec<String>,
}

/// File-backed index provider.
///
/// Re-reads the JSON document on every fetch. Index data is expected to be
/// well-formed: a release version that does not parse is a hard error here,
/// so the Unknown category never enters the index side of a comparison.
#[derive(Debug, Clone)]
pub struct FileIndexProvider {
    path: PathBuf,
}

impl FileIndexProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexProvider for FileIndexProvider {
    fn fetch(&self) -> Result<PackageIndex, Error> {
        let content = fs::read_to_string(&self.path).map_err(|source| Error::IndexRead {
            path: self.path.clone(),
            source,
        })?;
        let doc: IndexDoc =
            serde_json::from_str(&content).map_err(|source| Error::IndexParse {
                path: self.path.clone(),
                source,
            })?;

        let mut entries = Vec::new();
        for core in doc.cores {
            let id = PackageId::core(core.vendor, core.architecture);
            let versions = parse_release_versions(&id.display_id(), &core.versions)?;
            let mut entry = IndexEntry::new(id, versions);
            if let Some(name) = core.name {
                entry = entry.with_display_name(name);
            }
            entries.push(entry);
        }
        for lib in doc.libraries {
            let id = PackageId::library(lib.name);
            let versions = parse_release_versions(&id.display_id(), &lib.versions)?;
            entries.push(IndexEntry::new(id, versions));
        }
        Ok(PackageIndex::new(entries))
    }
}

fn parse_release_versions(name: &str, raw: &[String]) -> Result<Vec<Version>, Error> {
    let mut versions = Vec::with_capacity(raw.len());
    for s in raw {
        let version = Version::parse(s);
        if !version.is_valid() {
            return Err(Error::IndexVersionInvalid {
                name: name.to_string(),
                version: s.clone(),
            });
        }
        versions.push(version);
    }
    Ok(versions)
}
