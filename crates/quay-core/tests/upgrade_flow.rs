//! End-to-end upgrade flow over the filesystem collaborators.
//!
//! Exercises the full detect → plan → execute cycle against a temp data
//! directory, including the corrupted-version-record path.

use quay_core::{
    render_outdated, DirInstaller, DirRegistry, FileIndexProvider, InstalledProvider, PackageId,
    UpgradeEngine, CORE_RECORD, LIBRARY_RECORD,
};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const INDEX_JSON: &str = r#"{
  "cores": [
    {"vendor": "arduino", "architecture": "avr", "name": "Arduino AVR Boards",
     "versions": ["1.6.3", "1.6.9", "1.6.15"]},
    {"vendor": "arduino", "architecture": "samd", "name": "Arduino SAMD Boards",
     "versions": ["1.8.0"]}
  ],
  "libraries": [
    {"name": "USBHost", "versions": ["1.0.0", "1.0.5"]},
    {"name": "ArduinoJson", "versions": ["6.21.0"]},
    {"name": "WiFi101", "versions": ["0.15.0", "0.16.1"]}
  ]
}"#;

fn install_record(root: &Path, rel: &str, record: &str, name: &str, version: &str) {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(record), format!("name={name}\nversion={version}\n")).unwrap();
}

fn setup() -> (TempDir, UpgradeEngine<FileIndexProvider, DirRegistry, DirInstaller>) {
    let root = tempdir().unwrap();
    let index_path = root.path().join("index.json");
    fs::write(&index_path, INDEX_JSON).unwrap();

    let engine = UpgradeEngine::new(
        FileIndexProvider::new(index_path),
        DirRegistry::new(root.path()),
        DirInstaller::new(root.path()),
    );
    (root, engine)
}

/// Scenario A: an outdated core and library are detected, upgraded, and a
/// second detect pass reports nothing.
#[test]
fn test_upgrade_outdated_core_and_library() {
    let (root, engine) = setup();
    install_record(root.path(), "cores/arduino/avr", CORE_RECORD, "Arduino AVR Boards", "1.6.3");
    install_record(root.path(), "cores/arduino/samd", CORE_RECORD, "Arduino SAMD Boards", "1.8.0");
    install_record(root.path(), "libraries/USBHost", LIBRARY_RECORD, "USBHost", "1.0.0");
    install_record(root.path(), "libraries/ArduinoJson", LIBRARY_RECORD, "ArduinoJson", "6.21.0");

    let outdated = engine.outdated().unwrap();
    let ids: Vec<String> = outdated.iter().map(|e| e.id.display_id()).collect();
    assert_eq!(ids, vec!["arduino:avr", "USBHost"]);

    let rendered = render_outdated(&outdated);
    assert!(rendered.lines().next().unwrap().starts_with("Arduino AVR Boards"));

    let report = engine.upgrade().unwrap();
    assert!(report.ok());

    // Idempotence: everything upgraded, nothing left to report.
    assert!(engine.outdated().unwrap().is_empty());
    assert_eq!(render_outdated(&engine.outdated().unwrap()), "");
}

/// Scenario B: an up-to-date library whose version record is rewritten to
/// an invalid string becomes outdated, and upgrading repairs it.
#[test]
fn test_upgrade_library_with_invalid_version_record() {
    let (root, engine) = setup();
    install_record(root.path(), "libraries/WiFi101", LIBRARY_RECORD, "WiFi101", "0.16.1");

    // At latest: not outdated.
    assert!(engine.outdated().unwrap().is_empty());

    // Corrupt the version record out-of-band; the next scan must see it.
    let record = root.path().join("libraries/WiFi101").join(LIBRARY_RECORD);
    fs::write(&record, "version=1.0001").unwrap();

    let outdated = engine.outdated().unwrap();
    assert_eq!(outdated.len(), 1);
    assert_eq!(outdated[0].id, PackageId::library("WiFi101"));
    assert!(!outdated[0].installed.is_valid());

    let report = engine.upgrade().unwrap();
    assert!(report.ok());
    assert!(report.render().contains("WiFi101"));

    // The record now carries the valid latest version.
    let registry = DirRegistry::new(root.path());
    let installed = registry.list().unwrap();
    assert_eq!(installed.len(), 1);
    assert!(installed[0].version.is_valid());
    assert_eq!(installed[0].version.raw(), "0.16.1");

    assert!(engine.outdated().unwrap().is_empty());
}

/// An installed identity the index no longer knows is never reported and
/// never acted upon.
#[test]
fn test_unindexed_package_left_alone() {
    let (root, engine) = setup();
    install_record(root.path(), "libraries/Forgotten", LIBRARY_RECORD, "Forgotten", "0.1.0");

    assert!(engine.outdated().unwrap().is_empty());
    let report = engine.upgrade().unwrap();
    assert!(report.ok());
    assert!(report.actions.is_empty());

    // Still installed at its old version.
    let installed = DirRegistry::new(root.path()).list().unwrap();
    assert_eq!(installed[0].version.raw(), "0.1.0");
}

/// Re-running the whole cycle after success stays a no-op.
#[test]
fn test_repeated_upgrade_cycles_are_safe() {
    let (root, engine) = setup();
    install_record(root.path(), "libraries/USBHost", LIBRARY_RECORD, "USBHost", "1.0.0");

    assert!(engine.upgrade().unwrap().ok());
    let second = engine.upgrade().unwrap();
    assert!(second.ok());
    assert!(second.actions.is_empty());
}
