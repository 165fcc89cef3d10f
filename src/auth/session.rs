//! Admin session token
//!
//! Stored as `{"expiresAt": <ms since epoch>}` under [`SESSION_KEY`].

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use site_content::{KeyValueStore, StoreError};
use tracing::warn;

/// Storage key holding the session token
pub const SESSION_KEY: &str = "derm_admin_session_v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    /// Expiry in milliseconds since the Unix epoch
    pub expires_at: i64,
}

impl SessionToken {
    /// Token valid for `minutes` from `now`
    pub fn starting_at(now: DateTime<Utc>, minutes: f64) -> Self {
        let millis = (minutes * 60_000.0).round().clamp(-1e15, 1e15) as i64;
        Self {
            expires_at: (now + Duration::milliseconds(millis)).timestamp_millis(),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > 0 && now.timestamp_millis() < self.expires_at
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expires_at).single()
    }
}

/// Reads and writes the session token.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Stored token, `None` when absent or unreadable.
    pub fn load(&self) -> Option<SessionToken> {
        let raw = match self.backend.get_item(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "session store unreadable");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(error = %e, "stored session is malformed, ignoring");
                None
            }
        }
    }

    pub fn save(&self, token: &SessionToken) -> Result<(), StoreError> {
        let raw = serde_json::to_string(token)?;
        self.backend.set_item(SESSION_KEY, &raw)
    }

    pub fn remove(&self) -> Result<(), StoreError> {
        self.backend.remove_item(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_content::MemoryStore;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).single().unwrap()
    }

    #[test]
    fn test_token_expiry() {
        let now = at(1_700_000_000_000);
        let token = SessionToken::starting_at(now, 60.0);

        assert_eq!(token.expires_at, 1_700_000_000_000 + 3_600_000);
        assert!(token.is_valid_at(now));
        assert!(token.is_valid_at(at(token.expires_at - 1)));
        assert!(!token.is_valid_at(at(token.expires_at)));
    }

    #[test]
    fn test_zero_expiry_never_valid() {
        let token = SessionToken { expires_at: 0 };
        assert!(!token.is_valid_at(at(-5)));
    }

    #[test]
    fn test_serialized_shape() {
        let token = SessionToken { expires_at: 42 };
        assert_eq!(serde_json::to_string(&token).unwrap(), "{\"expiresAt\":42}");
    }

    #[test]
    fn test_store_roundtrip_and_corruption() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(&backend);
        assert_eq!(store.load(), None);

        let token = SessionToken { expires_at: 99 };
        store.save(&token).unwrap();
        assert_eq!(store.load(), Some(token));

        backend.set_item(SESSION_KEY, "{\"expiresAt\": \"soon\"}").unwrap();
        assert_eq!(store.load(), None);

        backend.set_item(SESSION_KEY, "garbage").unwrap();
        assert_eq!(store.load(), None);

        store.remove().unwrap();
        assert_eq!(backend.get_item(SESSION_KEY).unwrap(), None);
    }
}
