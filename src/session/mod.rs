//! Session provider: token, expiry, and cached user behind injectable storage.
//!
//! The HTTP client and the navigation guard both read session validity
//! through the same [`SessionStore`] instance, so they can never disagree.
//! Storage is a trait so tests run against an in-memory map while the
//! console persists to a JSON file in the config directory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use equipdesk_model::{LoginResponse, User};
use tracing::{debug, warn};

/// Storage key for the bearer token.
const KEY_TOKEN: &str = "auth_token";
/// Storage key for the token expiry timestamp (RFC 3339 string, stored raw).
const KEY_EXPIRES_AT: &str = "token_expires_at";
/// Storage key for the serialized user record.
const KEY_USER: &str = "user_data";

/// Durable string key-value storage for session data.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage, used in tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("storage lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().expect("storage lock poisoned").remove(key);
    }
}

/// File-backed storage: one JSON object persisted after every mutation.
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) storage at `path`. An unreadable or corrupt file is
    /// treated as empty rather than an error.
    pub fn open(path: PathBuf) -> Self {
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "session file corrupt, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn persist(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "failed to create session dir");
                return;
            }
        }
        match serde_json::to_string_pretty(values) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), error = %e, "failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize session"),
        }
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("storage lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock().expect("storage lock poisoned");
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock().expect("storage lock poisoned");
        values.remove(key);
        self.persist(&values);
    }
}

/// Shared accessor for the authenticated session.
///
/// Cheap to clone; all clones see the same storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Persist a successful login. Token, expiry, and user are written as a
    /// unit; an empty token writes nothing.
    pub fn set_session(&self, response: &LoginResponse) {
        if response.token.is_empty() {
            debug!("login response carried no token, session not stored");
            return;
        }

        self.storage.set(KEY_TOKEN, &response.token);
        self.storage.set(KEY_EXPIRES_AT, &response.token_expires_at);
        match serde_json::to_string(&response.user) {
            Ok(user_json) => self.storage.set(KEY_USER, &user_json),
            Err(e) => warn!(error = %e, "failed to serialize user record"),
        }
    }

    /// Clear the whole session. Always removes all three keys together.
    pub fn clear(&self) {
        self.storage.remove(KEY_TOKEN);
        self.storage.remove(KEY_EXPIRES_AT);
        self.storage.remove(KEY_USER);
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.storage.get(KEY_TOKEN).filter(|t| !t.is_empty())
    }

    /// The stored expiry, if present and parseable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.storage.get(KEY_EXPIRES_AT)?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(e) => {
                debug!(raw = %raw, error = %e, "unparseable token expiry");
                None
            }
        }
    }

    /// The cached user record, if any.
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get(KEY_USER)?;
        serde_json::from_str(&raw).ok()
    }

    /// Whether the session is currently valid: token present and expiry
    /// strictly in the future.
    pub fn is_authenticated(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.token().is_none() {
            return false;
        }
        match self.expires_at() {
            Some(expires_at) => expires_at > now,
            None => false,
        }
    }
}
