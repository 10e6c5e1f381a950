//! Conformance tests that run YAML fixtures against rategate
//!
//! Run with: cargo test -p rategate-test --test conformance

#![cfg(feature = "fixtures")]

use rategate_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the fixtures directory relative to the workspace root
fn fixtures_dir() -> PathBuf {
    // The manifest dir is ext/test, the fixtures live at the workspace root
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .parent() // ext
        .and_then(|p| p.parent()) // workspace root
        .expect("Could not find workspace root")
        .join("fixtures")
}

/// Load and run all fixtures in a file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    assert!(path.exists(), "Fixture file does not exist: {}", path.display());

    let yaml = fs::read_to_string(&path).expect("read yaml");

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });

    for fixture in fixtures {
        println!("Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_exact_rules() {
    run_fixture_file("01_exact.yaml");
}

#[test]
fn test_prefix_and_regex_rules() {
    run_fixture_file("02_prefix_regex.yaml");
}

#[test]
fn test_precedence_and_default() {
    run_fixture_file("03_precedence.yaml");
}

#[test]
fn all_fixture_files_are_covered() {
    // Catches fixture files added without a matching test above
    let mut files: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .collect();
    files.sort_unstable();

    assert_eq!(
        files,
        ["01_exact.yaml", "02_prefix_regex.yaml", "03_precedence.yaml"]
    );
}
