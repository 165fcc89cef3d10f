//! Site configuration
//!
//! Layered merge:
//! 1. Built-in defaults
//! 2. Site config file (`site.toml` in the site root, or `--config`)
//! 3. CLI flags

mod defaults;
mod effective;

pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, SiteConfig, CONFIG_FILE_NAME};
