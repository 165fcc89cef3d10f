//! Site content model
//!
//! The override/merge model shared by the site renderer and the admin editor:
//! a read-only base document, a sparse override document keyed by dotted
//! paths, and the effective document obtained by merging the two.

pub mod merge;
pub mod path;
pub mod store;

pub use merge::{deep_merge, is_falsy, merge, merge_layers, merge_owned};
pub use path::{get, lookup, resolve, set, ContentPath, PathError, LANG_PLACEHOLDER};
pub use store::{
    FileStore, KeyValueStore, MemoryStore, OverrideStore, StoreError, OVERRIDE_KEY,
};

/// An empty override document.
pub fn empty_document() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
