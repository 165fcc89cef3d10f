//! Effective site configuration with provenance

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use site_content::merge_layers;
use tracing::debug;

use super::defaults::BuiltinDefaults;
use crate::lang::Lang;

/// Config file looked up in the site root when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "site.toml";

/// Origin of a configuration source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ConfigOrigin::Builtin => "builtin",
            ConfigOrigin::File => "file",
            ConfigOrigin::Cli => "cli",
        })
    }
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MergedConfig {
    content_path: String,
    state_dir: String,
    output: String,
    export_path: String,
    #[serde(default)]
    default_lang: Option<Lang>,
}

/// Effective configuration, paths resolved against the site root
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_root: PathBuf,
    pub content_path: PathBuf,
    pub state_dir: PathBuf,
    pub output: PathBuf,
    pub export_path: PathBuf,
    /// Language forced by configuration, ahead of `meta.defaultLang`
    pub default_lang: Option<Lang>,
    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl SiteConfig {
    /// Build the effective config from defaults, an optional file and CLI flags.
    ///
    /// Without an explicit `config_path`, `site.toml` in the site root is used
    /// when it exists.
    pub fn build(
        site_root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        let file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(site_root.join(CONFIG_FILE_NAME)).filter(|p| p.exists()),
        };

        if let Some(path) = file {
            let (value, digest) = Self::load_toml_file(&path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged: MergedConfig = serde_json::from_value(merge_layers(layers))
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::validate(&merged)?;

        debug!(sources = sources.len(), "built site config");

        Ok(Self {
            site_root: site_root.to_path_buf(),
            content_path: site_root.join(merged.content_path),
            state_dir: site_root.join(merged.state_dir),
            output: site_root.join(merged.output),
            export_path: site_root.join(merged.export_path),
            default_lang: merged.default_lang,
            sources,
        })
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let value: Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((value, digest))
    }

    fn validate(config: &MergedConfig) -> Result<(), ConfigError> {
        for (key, value) in [
            ("content_path", &config.content_path),
            ("state_dir", &config.state_dir),
            ("output", &config.output),
            ("export_path", &config.export_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
