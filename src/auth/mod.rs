//! Admin gate
//!
//! States: LOGGED_OUT → LOGGED_IN (password hash match) → LOGGED_OUT
//! (logout, or expiry noticed at the next load). No renewal.
//!
//! The expected hash ships inside the same content document the site
//! publishes, so this gate only hides the editor from casual visitors. It is
//! a convenience, not access control.

mod session;

pub use session::{SessionStore, SessionToken, SESSION_KEY};

use chrono::{DateTime, Utc};
use serde_json::Value;
use sha2::{Digest, Sha256};
use site_content::{KeyValueStore, StoreError};
use tracing::{debug, info};

use crate::schema::SiteContent;

/// Session length when the document does not set `meta.admin.sessionMinutes`
pub const DEFAULT_SESSION_MINUTES: f64 = 60.0;

/// Lowercase hex SHA-256 of `input`
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    LoggedOut,
    LoggedIn,
}

/// Errors for login
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Wrong password.")]
    WrongPassword,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Gate settings read from the base document
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSettings {
    pub password_sha256: Option<String>,
    pub session_minutes: f64,
}

impl AdminSettings {
    /// Read `meta.admin` from the base document (never from overrides).
    pub fn from_document(base: &Value) -> Self {
        let admin = SiteContent::from_document(base).meta.admin;
        let session_minutes = admin
            .session_minutes
            .filter(|m| m.is_finite() && *m != 0.0)
            .unwrap_or(DEFAULT_SESSION_MINUTES);

        Self {
            password_sha256: admin.password_sha256,
            session_minutes,
        }
    }
}

/// Login state over a session store
#[derive(Debug, Clone)]
pub struct AdminGate<S> {
    sessions: SessionStore<S>,
}

impl<S: KeyValueStore> AdminGate<S> {
    pub fn new(backend: S) -> Self {
        Self {
            sessions: SessionStore::new(backend),
        }
    }

    /// Current state; an absent, malformed or expired token is logged out.
    pub fn state(&self, now: DateTime<Utc>) -> GateState {
        match self.sessions.load() {
            Some(token) if token.is_valid_at(now) => GateState::LoggedIn,
            Some(_) => {
                debug!("admin session expired");
                GateState::LoggedOut
            }
            None => GateState::LoggedOut,
        }
    }

    pub fn is_logged_in(&self, now: DateTime<Utc>) -> bool {
        self.state(now) == GateState::LoggedIn
    }

    /// Compare the password hash with the base document and start a session.
    ///
    /// The stored hash must be the exact lowercase hex digest. A mismatch
    /// leaves any existing session untouched.
    pub fn login(
        &self,
        base: &Value,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, LoginError> {
        let settings = AdminSettings::from_document(base);

        let matches = settings
            .password_sha256
            .as_deref()
            .map(|expected| expected == sha256_hex(password))
            .unwrap_or(false);
        if !matches {
            info!("admin login rejected");
            return Err(LoginError::WrongPassword);
        }

        let token = SessionToken::starting_at(now, settings.session_minutes);
        self.sessions.save(&token)?;
        info!(expires_at = token.expires_at, "admin logged in");
        Ok(token)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.sessions.remove()?;
        info!("admin logged out");
        Ok(())
    }

    /// Stored token, valid or not
    pub fn token(&self) -> Option<SessionToken> {
        self.sessions.load()
    }
}
