//! Fixture loading shared by integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

/// Base directory for test cases.
pub fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// Path of the three-tree iris model.
pub fn iris_path() -> PathBuf {
    test_cases_dir().join("iris.model.json")
}

/// Iris model file as an editable JSON value.
pub fn iris_json() -> serde_json::Value {
    let path = iris_path();
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

/// Overwrite the value at a JSON pointer.
pub fn set(json: &mut serde_json::Value, pointer: &str, value: serde_json::Value) {
    *json
        .pointer_mut(pointer)
        .unwrap_or_else(|| panic!("no value at {pointer}")) = value;
}
