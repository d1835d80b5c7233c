use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quay operations.
///
/// These are collaborator-level faults: when the index or the installed
/// state cannot be read, the whole detect/upgrade call fails rather than
/// operating on partial data. A malformed installed version string is
/// deliberately not represented here (it parses Unknown), and a failing
/// install for one package is recorded per-action in the upgrade report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read index at {path}: {source}")]
    IndexRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse index at {path}: {source}")]
    IndexParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Index entry {name} has unparsable version {version:?}")]
    IndexVersionInvalid { name: String, version: String },

    #[error("Failed to read installed packages at {path}: {source}")]
    RegistryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Install of {name} failed: {reason}")]
    Install { name: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    #[must_use]
    pub fn install(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Install {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
