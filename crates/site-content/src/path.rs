//! Dotted path addressing
//!
//! A path such as `i18n.{lang}.services.items.0.title` addresses a node in a
//! JSON tree. Segments name object fields; numeric segments also index
//! arrays. The `{lang}` placeholder is substituted with the active language
//! before the path is used.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

/// Segment standing for the active language code.
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Errors for malformed paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Path '{path}' has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}

/// A parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentPath {
    segments: Vec<String>,
}

impl ContentPath {
    /// Parse a dotted path. Every segment must be non-empty.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for (position, segment) in path.split('.').enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.to_string(),
                    position,
                });
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether any segment is the language placeholder
    pub fn is_templated(&self) -> bool {
        self.segments.iter().any(|s| s == LANG_PLACEHOLDER)
    }

    /// Substitute the language placeholder with a concrete code.
    pub fn resolve(&self, lang: &str) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|s| {
                if s == LANG_PLACEHOLDER {
                    lang.to_string()
                } else {
                    s.clone()
                }
            })
            .collect();
        Self { segments }
    }

    /// Append a field segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Append an array index segment.
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for ContentPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Substitute the language placeholder in a raw path string.
pub fn resolve(path: &str, lang: &str) -> String {
    path.replace(LANG_PLACEHOLDER, lang)
}

/// Read the value at `path`.
///
/// Returns `None` as soon as a segment is missing or an intermediate node is
/// not a container.
pub fn get<'a>(tree: &'a Value, path: &ContentPath) -> Option<&'a Value> {
    path.segments.iter().try_fold(tree, |node, segment| step(node, segment))
}

/// Read the value at a raw dotted path without validating it first.
///
/// Empty segments simply fail to match.
pub fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(tree, step)
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Write `value` at `path`, creating intermediate objects as needed.
///
/// An intermediate node that is missing or not a container is replaced with
/// an empty object. Numeric segments address array elements when the node
/// is an array; writing past the end pads with `null`.
pub fn set(tree: &mut Value, path: &ContentPath, value: Value) {
    let Some((last, parents)) = path.segments.split_last() else {
        *tree = value;
        return;
    };

    let mut current = tree;
    for segment in parents {
        let slot = slot_mut(current, segment);
        if !slot.is_object() && !slot.is_array() {
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }

    *slot_mut(current, last) = value;
}

fn slot_mut<'a>(node: &'a mut Value, segment: &str) -> &'a mut Value {
    let index = segment.parse::<usize>().ok().filter(|_| node.is_array());

    match index {
        Some(index) => {
            if let Value::Array(items) = node {
                if index >= items.len() {
                    items.resize(index + 1, Value::Null);
                }
            }
            &mut node[index]
        }
        None => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            &mut node[segment]
        }
    }
}
