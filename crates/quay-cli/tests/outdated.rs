//! Integration tests for `quay outdated`.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "quay-cli", "--bin", "quay", "--"]);
    cmd
}

fn write_index(dir: &Path) {
    fs::write(
        dir.join("index.json"),
        r#"{
  "cores": [
    {"vendor": "arduino", "architecture": "avr", "name": "Arduino AVR Boards",
     "versions": ["1.6.3", "1.6.15"]}
  ],
  "libraries": [
    {"name": "USBHost", "versions": ["1.0.0", "1.0.5"]}
  ]
}"#,
    )
    .unwrap();
}

fn install(dir: &Path, rel: &str, record: &str, name: &str, version: &str) {
    let pkg = dir.join(rel);
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join(record), format!("name={name}\nversion={version}\n")).unwrap();
}

/// Outdated packages are listed one per line, display name first.
#[test]
fn test_outdated_lists_display_name_first() {
    let dir = tempdir().unwrap();
    write_index(dir.path());
    install(dir.path(), "cores/arduino/avr", "core.properties", "Arduino AVR Boards", "1.6.3");
    install(dir.path(), "libraries/USBHost", "library.properties", "USBHost", "1.0.0");

    let output = cargo_bin()
        .args(["outdated", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to run quay outdated");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Arduino AVR Boards"));
    assert!(lines[1].starts_with("USBHost"));
}

/// Nothing outdated means empty stdout, not an empty table.
#[test]
fn test_outdated_empty_output_when_current() {
    let dir = tempdir().unwrap();
    write_index(dir.path());
    install(dir.path(), "libraries/USBHost", "library.properties", "USBHost", "1.0.5");

    let output = cargo_bin()
        .args(["outdated", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to run quay outdated");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
}

/// `--json` emits a single machine-readable object on stdout.
#[test]
fn test_outdated_json_output() {
    let dir = tempdir().unwrap();
    write_index(dir.path());
    install(dir.path(), "libraries/USBHost", "library.properties", "USBHost", "1.0.0");

    let output = cargo_bin()
        .args(["--json", "outdated", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to run quay outdated");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|_| panic!("stdout should be valid JSON: {stdout}"));

    assert_eq!(json["ok"], true);
    let entries = json["outdated"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"]["name"], "USBHost");
    assert_eq!(entries[0]["installed"], "1.0.0");
    assert_eq!(entries[0]["latest"], "1.0.5");
}

/// A missing index is a hard failure of the whole call.
#[test]
fn test_outdated_missing_index_fails() {
    let dir = tempdir().unwrap();

    let output = cargo_bin()
        .args(["outdated", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to run quay outdated");

    assert!(!output.status.success());
}
