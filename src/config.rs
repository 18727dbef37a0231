//! Session configuration parsed from environment variables.

use std::path::PathBuf;

use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::verifier::{DEFAULT_DEMO_USER_ID, DEFAULT_DEMO_USER_NAME, MockVerifier};

pub const DEFAULT_SESSION_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Durable-store key holding the serialized identity.
    pub session_key: String,
    /// File backing the durable store; `None` keeps the session in memory.
    pub store_path: Option<PathBuf>,
    pub demo_user_id: String,
    pub demo_user_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_key: DEFAULT_SESSION_KEY.to_owned(),
            store_path: None,
            demo_user_id: DEFAULT_DEMO_USER_ID.to_owned(),
            demo_user_name: DEFAULT_DEMO_USER_NAME.to_owned(),
        }
    }
}

impl SessionConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `RECIPEBOX_SESSION_KEY`: default `user`
    /// - `RECIPEBOX_STORE_PATH`: unset keeps the store in memory
    /// - `RECIPEBOX_DEMO_USER_ID`: default `user-1`
    /// - `RECIPEBOX_DEMO_USER_NAME`: default `Demo User`
    ///
    /// Blank values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            session_key: env_or("RECIPEBOX_SESSION_KEY", DEFAULT_SESSION_KEY),
            store_path: env_non_empty("RECIPEBOX_STORE_PATH").map(PathBuf::from),
            demo_user_id: env_or("RECIPEBOX_DEMO_USER_ID", DEFAULT_DEMO_USER_ID),
            demo_user_name: env_or("RECIPEBOX_DEMO_USER_NAME", DEFAULT_DEMO_USER_NAME),
        }
    }

    /// Open the configured durable store.
    #[must_use]
    pub fn open_store(&self) -> Box<dyn KeyValueStore> {
        match &self.store_path {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        }
    }

    /// Mock verifier returning the configured placeholder account.
    #[must_use]
    pub fn demo_verifier(&self) -> MockVerifier {
        MockVerifier::new(self.demo_user_id.clone(), self.demo_user_name.clone())
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_non_empty(key).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
