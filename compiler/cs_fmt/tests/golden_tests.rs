#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Golden tests for the whitespace normalizer.
//!
//! Each `tests/golden/<name>.cs` is normalized and compared against
//! `<name>.cs.expected`. The normalizer drops the newline after the last
//! token, so both sides are compared without trailing whitespace.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use cs_fmt::{normalize_whitespace, ReflowConfig};

fn golden_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("golden")
}

fn golden_inputs(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "cs"))
        .collect();
    files.sort();
    files
}

fn run_golden(name: &str) {
    let input_path = golden_dir().join(format!("{name}.cs"));
    let expected_path = golden_dir().join(format!("{name}.cs.expected"));
    let input = fs::read_to_string(&input_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", input_path.display()));
    let expected = fs::read_to_string(&expected_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expected_path.display()));

    let output = normalize_whitespace(&input, &ReflowConfig::default());
    assert_eq!(output.trim_end(), expected.trim_end(), "golden mismatch for {name}");
}

#[test]
fn golden_loops() {
    run_golden("loops");
}

#[test]
fn golden_generics() {
    run_golden("generics");
}

#[test]
fn golden_comments() {
    run_golden("comments");
}

#[test]
fn golden_directives() {
    run_golden("directives");
}

/// Every input has an expected file, so a new input cannot be skipped
/// silently.
#[test]
fn every_input_has_expected_output() {
    for input in golden_inputs(&golden_dir()) {
        let expected = input.with_extension("cs.expected");
        assert!(expected.exists(), "missing {}", expected.display());
    }
}

/// Expected outputs are fixed points.
#[test]
fn expected_outputs_are_stable() {
    for input in golden_inputs(&golden_dir()) {
        let expected_path = input.with_extension("cs.expected");
        let expected = fs::read_to_string(&expected_path).unwrap();
        let output = normalize_whitespace(&expected, &ReflowConfig::default());
        assert_eq!(
            output.trim_end(),
            expected.trim_end(),
            "{} is not a fixed point",
            expected_path.display()
        );
    }
}
