//! File I/O: package loading, configuration files and symbol output.

use std::path::Path;

use symbol_layout::config::load_config;
use symbol_layout::error::{ConfigError, PackageError};
use symbol_layout::output::{expand_sources, process_source, process_sources, OutputOptions};
use symbol_layout::package::{load_package, PhysicalLayoutCode};
use symbol_layout::render::{SymbolSet, Variant};
use tempfile::TempDir;

/// Creates a temporary directory inside `.tmp/` for test isolation.
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
///
/// Converts to an absolute path to avoid issues with parallel test execution.
fn test_temp_dir() -> TempDir {
    let tmp_root = Path::new(".tmp");
    std::fs::create_dir_all(tmp_root).expect("Failed to create .tmp directory");
    let tmp_root = tmp_root
        .canonicalize()
        .expect("Failed to canonicalize .tmp path");
    tempfile::tempdir_in(&tmp_root).expect("Failed to create temp dir")
}

const TIMER: &str = r#"{
    "name": "ne555",
    "footprint_designator": "DIP-8",
    "physical_layout": "DIP",
    "ungrouped_pins": [
        { "name": "GND", "designator": { "rank": 1, "fullname": "1" }, "type": "GND", "direction": "IN" },
        { "name": "TRIG", "designator": { "rank": 2, "fullname": "2" }, "type": "I", "direction": "IN" },
        { "name": "OUT", "designator": { "rank": 3, "fullname": "3" }, "type": "O", "direction": "OUT" },
        { "name": "~RESET~", "designator": { "rank": 4, "fullname": "4" }, "type": "I", "direction": "IN" },
        { "name": "CTRL", "designator": { "rank": 5, "fullname": "5" }, "type": "I", "direction": "IN" },
        { "name": "THR", "designator": { "rank": 6, "fullname": "6" }, "type": "I", "direction": "IN" },
        { "name": "DIS", "designator": { "rank": 7, "fullname": "7" }, "type": "OCOL", "direction": "OUT" },
        { "name": "VCC", "designator": { "rank": 8, "fullname": "8" }, "type": "PWR", "direction": "IN" }
    ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

// =============================================================================
// Package loading
// =============================================================================

#[test]
fn load_package_from_file() {
    let temp_dir = test_temp_dir();
    let path = write(temp_dir.path(), "ne555.json", TIMER);

    let package = load_package(&path).unwrap();
    assert_eq!(package.name, "ne555");
    assert_eq!(package.prefix, "U");
    assert_eq!(package.physical_layout, Some(PhysicalLayoutCode::Dip));
    assert_eq!(package.ungrouped_pins.len(), 8);
    assert!(package.grouped_pins.is_empty());
}

#[test]
fn load_package_missing_file() {
    let temp_dir = test_temp_dir();
    let result = load_package(&temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(PackageError::ReadError { .. })));
}

#[test]
fn load_package_rejects_unknown_pin_type() {
    let temp_dir = test_temp_dir();
    let path = write(
        temp_dir.path(),
        "bad.json",
        r#"{ "name": "x", "ungrouped_pins": [
            { "name": "A", "designator": { "rank": 1, "fullname": "1" }, "type": "XYZ" }
        ] }"#,
    );

    let err = load_package(&path).unwrap_err();
    assert!(matches!(err, PackageError::ParseError { .. }));
    assert!(err.to_string().contains("bad.json"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn load_config_from_file() {
    let temp_dir = test_temp_dir();
    let path = write(
        temp_dir.path(),
        "config.json",
        r#"{ "metrics": { "spacing": 50 }, "output": { "variants": ["physical"] } }"#,
    );

    let config = load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.metrics.spacing, 50);
    assert_eq!(config.metrics.pin_length, 300);
    assert_eq!(config.variants(), [Variant::Physical]);
}

#[test]
fn load_config_rejects_invalid_values() {
    let temp_dir = test_temp_dir();
    let path = write(
        temp_dir.path(),
        "config.json",
        r#"{ "metrics": { "pin_length": -100 } }"#,
    );

    let result = load_config(Some(path.as_path()));
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn load_config_rejects_malformed_json() {
    let temp_dir = test_temp_dir();
    let path = write(temp_dir.path(), "config.json", "{ \"metrics\": ");

    let result = load_config(Some(path.as_path()));
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn process_source_writes_beside_the_source() {
    let temp_dir = test_temp_dir();
    let source = write(temp_dir.path(), "ne555.json", TIMER);

    let output = process_source(&source, &OutputOptions::default()).unwrap();
    assert_eq!(output, temp_dir.path().join("ne555.symbols.json"));

    let contents = std::fs::read_to_string(&output).unwrap();
    let set: SymbolSet = serde_json::from_str(&contents).unwrap();
    assert_eq!(set.package, "ne555");
    assert_eq!(set.symbols.len(), 4);
    assert_eq!(set.symbols["functional"].name, "NE555");
    assert_eq!(set.symbols["physical"].name, "NE555_PHY");
}

#[test]
fn process_source_into_directory_with_selected_variants() {
    let temp_dir = test_temp_dir();
    let source = write(temp_dir.path(), "ne555.json", TIMER);
    let into = temp_dir.path().join("out").join("symbols");

    let options = OutputOptions {
        variants: vec![Variant::Socket],
        directory: Some(into.clone()),
        pretty: false,
        ..OutputOptions::default()
    };
    let output = process_source(&source, &options).unwrap();

    assert_eq!(output, into.join("ne555.symbols.json"));
    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(!contents.contains('\n'));
    let set: SymbolSet = serde_json::from_str(&contents).unwrap();
    assert_eq!(set.symbols.keys().collect::<Vec<_>>(), ["socket"]);
}

#[test]
fn failed_variants_are_written_too() {
    let temp_dir = test_temp_dir();
    let source = write(
        temp_dir.path(),
        "nocode.json",
        &TIMER.replace(r#""physical_layout": "DIP","#, ""),
    );

    let output = process_source(&source, &OutputOptions::default()).unwrap();
    let set: SymbolSet = serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();

    assert_eq!(set.symbols.len(), 2);
    let failed: Vec<Variant> = set.failures.iter().map(|f| f.variant).collect();
    assert_eq!(failed, [Variant::Physical, Variant::Socket]);
}

#[test]
fn glob_sources_skip_non_json_files() {
    let temp_dir = test_temp_dir();
    write(temp_dir.path(), "a.json", TIMER);
    write(temp_dir.path(), "b.json", &TIMER.replace("ne555", "lm555"));
    write(temp_dir.path(), "notes.md", "# not a package");

    let pattern = format!("{}/*", temp_dir.path().display());
    let sources = expand_sources(&[pattern]).unwrap();
    assert_eq!(sources.len(), 3);

    let summary = process_sources(&sources, &OutputOptions::default());
    assert!(summary.is_success());
    assert_eq!(summary.written.len(), 2);
    assert_eq!(summary.skipped, [temp_dir.path().join("notes.md")]);
    assert!(temp_dir.path().join("b.symbols.json").exists());
}

#[test]
fn broken_source_does_not_stop_the_run() {
    let temp_dir = test_temp_dir();
    let broken = write(temp_dir.path(), "broken.json", "{");
    let good = write(temp_dir.path(), "good.json", TIMER);

    let summary = process_sources(&[broken.clone(), good], &OutputOptions::default());
    assert!(!summary.is_success());
    assert_eq!(summary.written.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, broken);
}
