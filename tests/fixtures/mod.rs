//! Test fixtures for rewrite tests
//!
//! The base configs under `tests/fixtures/` point `output_dir` at
//! `/runs/subject/model`; staging copies them into a temp dir with
//! `output_dir` moved under that dir.

#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Name derived from the base config at rank 16.
pub const RANK16_NAME: &str = "locon,d8,al4,conv16,conval16,epo10,cosin,AdamW8bit,1e-4";

const FIXTURE_OUTPUT_DIR: &str = "/runs/subject/model";

/// Path to the JSON base config fixture
pub fn base_json_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/base_config.json")
}

/// Path to the TOML base config fixture
pub fn base_toml_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/base_config.toml")
}

/// Base config as a JSON value
pub fn base_json() -> Value {
    let contents = fs::read_to_string(base_json_path()).expect("Failed to read base_config.json");
    serde_json::from_str(&contents).expect("Failed to parse base_config.json")
}

/// `output_dir` used by staged configs.
pub fn staged_output_dir(root: &Path) -> PathBuf {
    root.join("runs").join("subject").join("model")
}

/// Write `config` to `root/<file_name>` and return its path.
pub fn write_json(root: &Path, file_name: &str, config: &Value) -> PathBuf {
    let path = root.join(file_name);
    let json = serde_json::to_string_pretty(config).expect("Failed to serialize config");
    fs::write(&path, json).expect("Failed to write config");
    path
}

/// Stage the JSON fixture under `root`.
pub fn stage_json(root: &Path) -> PathBuf {
    let mut config = base_json();
    config["output_dir"] = Value::String(staged_output_dir(root).to_string_lossy().into_owned());
    write_json(root, "base_config.json", &config)
}

/// Stage the TOML fixture under `root`.
pub fn stage_toml(root: &Path) -> PathBuf {
    let contents = fs::read_to_string(base_toml_path()).expect("Failed to read base_config.toml");
    let staged = contents.replace(
        &format!("\"{}\"", FIXTURE_OUTPUT_DIR),
        &format!("'{}'", staged_output_dir(root).display()),
    );
    let path = root.join("base_config.toml");
    fs::write(&path, staged).expect("Failed to write config");
    path
}

/// Read a written config back as JSON.
pub fn read_json(path: &Path) -> Value {
    let contents = fs::read_to_string(path).expect("Failed to read written config");
    serde_json::from_str(&contents).expect("Written config is not valid JSON")
}
