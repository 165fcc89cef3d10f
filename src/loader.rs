//! Base document loading
//!
//! The base document is read fresh on every command; nothing is cached.
//! A failure here is the only fatal error of the content model.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

/// Errors loading the base document
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Content document {0} is not a JSON object")]
    NotAnObject(PathBuf),
}

/// Read and parse the base document at `path`.
pub fn load_base(path: &Path) -> Result<Value, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let doc = parse_base(&raw).map_err(|e| match e {
        LoadError::Parse { source, .. } => LoadError::Parse {
            path: path.to_path_buf(),
            source,
        },
        LoadError::NotAnObject(_) => LoadError::NotAnObject(path.to_path_buf()),
        other => other,
    })?;

    debug!(path = %path.display(), bytes = raw.len(), "loaded base document");
    Ok(doc)
}

/// Parse base document text.
pub fn parse_base(raw: &str) -> Result<Value, LoadError> {
    let doc: Value = serde_json::from_str(raw).map_err(|source| LoadError::Parse {
        path: PathBuf::new(),
        source,
    })?;

    if !doc.is_object() {
        return Err(LoadError::NotAnObject(PathBuf::new()));
    }
    Ok(doc)
}
