//! Package identity: the join key between index and installed state.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// The two kinds of installable unit.
///
/// Ordering places cores before libraries; the detector sorts its output by
/// identity, so this drives how results group in the human summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    Core,
    Library,
}

impl PackageKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Library => "library",
        }
    }
}

/// Identity of an installable unit.
///
/// Compared structurally: exact kind/name/arch match, no normalization.
/// Cores carry an architecture qualifier (`arduino:avr` style); libraries
/// are identified by name alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageId {
    pub kind: PackageKind,
    pub name: String,
    /// Architecture qualifier, present only for cores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl PackageId {
    /// Identity for a core, e.g. `PackageId::core("arduino", "avr")`.
    #[must_use]
    pub fn core(vendor: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            kind: PackageKind::Core,
            name: vendor.into(),
            arch: Some(arch.into()),
        }
    }

    /// Identity for a library.
    #[must_use]
    pub fn library(name: impl Into<String>) -> Self {
        Self {
            kind: PackageKind::Library,
            name: name.into(),
            arch: None,
        }
    }

    /// The `vendor:arch` / name form used in output and as a fallback when
    /// the index carries no display name.
    #[must_use]
    pub fn display_id(&self) -> String {
        match &self.arch {
            Some(arch) => format!("{}:{arch}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Ord for PackageId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.arch.cmp(&other.arch))
    }
}

impl PartialOrd for PackageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_display_id() {
        let id = PackageId::core("arduino", "avr");
        assert_eq!(id.display_id(), "arduino:avr");
        assert_eq!(id.to_string(), "arduino:avr");
    }

    #[test]
    fn test_library_display_id() {
        let id = PackageId::library("USBHost");
        assert_eq!(id.display_id(), "USBHost");
        assert_eq!(id.arch, None);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(PackageId::core("arduino", "avr"), PackageId::core("arduino", "avr"));
        assert_ne!(PackageId::core("arduino", "avr"), PackageId::core("arduino", "samd"));
        // Same name, different kind: different identity.
        assert_ne!(
            PackageId::library("arduino"),
            PackageId::core("arduino", "avr")
        );
    }

    #[test]
    fn test_cores_order_before_libraries() {
        let mut ids = vec![
            PackageId::library("ArduinoJson"),
            PackageId::core("arduino", "samd"),
            PackageId::library("USBHost"),
            PackageId::core("arduino", "avr"),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                PackageId::core("arduino", "avr"),
                PackageId::core("arduino", "samd"),
                PackageId::library("ArduinoJson"),
                PackageId::library("USBHost"),
            ]
        );
    }
}
