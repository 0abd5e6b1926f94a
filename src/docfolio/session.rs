//! # Session
//!
//! A persisted "who is logged in" flag. This is a convenience gate for the
//! client, not a security boundary: credentials come from configuration and
//! nothing is hashed or encrypted.
//!
//! The session is an explicit value. Callers `load` it, act on it, and
//! `save` or `clear` it; there is no ambient global.

use crate::error::Result;
use crate::store::backend::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SESSION_KEY: &str = "auth-storage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub login_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    /// Check credentials against the expected pair. On success the session
    /// carries the fixed administrator profile.
    pub fn login(username: &str, password: &str, expected: (&str, &str)) -> Option<Session> {
        if username != expected.0 || password != expected.1 {
            return None;
        }
        Some(Session {
            is_authenticated: true,
            user: Some(User {
                id: "user-001".to_string(),
                username: username.to_string(),
                name: "Administrador".to_string(),
                email: "admin@gestordocumental.com".to_string(),
                login_time: Utc::now(),
            }),
        })
    }

    pub fn is_active(&self) -> bool {
        self.is_authenticated && self.user.is_some()
    }
}

pub struct SessionStore<K: KeyValueStore> {
    backend: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// The persisted session, or a logged-out one if nothing usable is stored.
    pub fn load(&self) -> Session {
        match self.backend.get_item(SESSION_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(error = %e, "stored session unreadable, starting logged out");
                Session::default()
            }),
            Ok(None) => Session::default(),
            Err(e) => {
                warn!(error = %e, "could not read session, starting logged out");
                Session::default()
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.backend.set_item(SESSION_KEY, &json)
    }

    pub fn clear(&self) -> Result<()> {
        self.backend.remove_item(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    const CREDS: (&str, &str) = ("admin", "admin123");

    #[test]
    fn login_with_right_credentials() {
        let session = Session::login("admin", "admin123", CREDS).unwrap();
        assert!(session.is_active());
        assert_eq!(session.user.unwrap().name, "Administrador");
    }

    #[test]
    fn login_with_wrong_credentials() {
        assert!(Session::login("admin", "nope", CREDS).is_none());
        assert!(Session::login("Admin", "admin123", CREDS).is_none());
    }

    #[test]
    fn save_load_clear_lifecycle() {
        let store = SessionStore::new(MemBackend::new());
        assert!(!store.load().is_active());

        let session = Session::login("admin", "admin123", CREDS).unwrap();
        store.save(&session).unwrap();
        assert_eq!(store.load(), session);

        store.clear().unwrap();
        assert_eq!(store.load(), Session::default());
    }

    #[test]
    fn unreadable_session_is_logged_out() {
        let backend = MemBackend::new();
        backend.set_item(SESSION_KEY, "garbage").unwrap();
        let store = SessionStore::new(backend);
        assert!(!store.load().is_active());
    }
}
