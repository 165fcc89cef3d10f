//! Content languages
//!
//! The site is bilingual: Albanian (`sq`, the default) and English (`en`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A content language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Sq,
    En,
}

/// Unknown language code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language '{0}' (expected 'sq' or 'en')")]
pub struct LangError(pub String);

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Sq, Lang::En];

    /// Language code used in content paths
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Sq => "sq",
            Lang::En => "en",
        }
    }

    /// The other language (site language toggle)
    pub fn toggle(&self) -> Lang {
        match self {
            Lang::Sq => Lang::En,
            Lang::En => Lang::Sq,
        }
    }

    /// Default language declared by a document under `meta.defaultLang`,
    /// falling back to `sq`.
    pub fn from_document(doc: &Value) -> Lang {
        doc.pointer("/meta/defaultLang")
            .and_then(Value::as_str)
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sq" => Ok(Lang::Sq),
            "en" => Ok(Lang::En),
            _ => Err(LangError(s.to_string())),
        }
    }
}
