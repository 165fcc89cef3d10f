//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Base content document, relative to the site root (default: "content.json")
    pub content_path: String,

    /// Directory holding overrides and the admin session (default: ".clinic-admin")
    pub state_dir: String,

    /// Directory receiving rendered pages (default: "dist")
    pub output: String,

    /// Exported effective document (default: "content.export.json")
    pub export_path: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            content_path: "content.json".to_string(),
            state_dir: ".clinic-admin".to_string(),
            output: "dist".to_string(),
            export_path: "content.export.json".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "content_path": self.content_path,
            "state_dir": self.state_dir,
            "output": self.output,
            "export_path": self.export_path,
        })
    }
}
