//! Clinic Site - bilingual site renderer and local content editor
//!
//! The site is rendered from a JSON content document. Edits made in the
//! admin editor never touch that document: they are kept as a sparse override
//! document in a local state directory and merged on top of it whenever the
//! site is rendered or the editor reads a value. Exporting writes the merged
//! result so it can be deployed as the new content document.

pub mod auth;
pub mod config;
pub mod editor;
pub mod lang;
pub mod loader;
pub mod render;
pub mod schema;

pub use site_content;

pub use auth::{AdminGate, GateState, LoginError, SessionToken};
pub use config::{ConfigError, SiteConfig};
pub use editor::{EditorError, EditorSession};
pub use lang::Lang;
pub use loader::{load_base, LoadError};
pub use render::{AppointmentRequest, PageView, SiteRenderer};
pub use schema::{ContentField, ListSection, SiteContent};
