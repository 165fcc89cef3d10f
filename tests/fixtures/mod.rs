//! Shared fixtures for integration tests
//!
//! `content.json` is a small two-language clinic document whose admin
//! password is "secret".

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

pub const PASSWORD: &str = "secret";

/// Path to the fixture content document
pub fn content_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/content.json")
}

/// Parsed fixture content document
pub fn base_document() -> Value {
    let raw = fs::read_to_string(content_path()).unwrap();
    serde_json::from_str(&raw).unwrap()
}

/// Temporary site root holding a copy of the fixture as `content.json`
pub fn site_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::copy(content_path(), dir.path().join("content.json")).unwrap();
    dir
}
