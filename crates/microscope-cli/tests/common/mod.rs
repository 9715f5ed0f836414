//! Shared test helpers for CLI integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use microscope_cli::config::Config;
use tempfile::TempDir;

/// Writes `source` as a script inside `dir` and returns a config pointing
/// at it, with output under `dir/out`.
pub fn config_for(dir: &TempDir, source: &str) -> Config {
    let script_path = dir.path().join("script.yaml");
    fs::write(&script_path, source).unwrap();
    Config {
        script_path,
        output_dir: dir.path().join("out"),
    }
}

/// Reads a written chronicle back as JSON.
pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
