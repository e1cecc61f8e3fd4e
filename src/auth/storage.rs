//! Persistent key-value storage for session state.
//!
//! `LocalStore` is a small string-keyed store, one file per key under a
//! fixed directory - the native equivalent of browser local storage. When
//! no storage directory is available (sandboxed or misconfigured
//! environments) every operation is a safe no-op rather than a failure.

use std::path::PathBuf;

use tracing::warn;

/// Fixed key holding the bearer access token.
pub const TOKEN_KEY: &str = "portfolio_access_token";

/// Fixed key holding the persisted session object (user + token + flag).
pub const AUTH_STATE_KEY: &str = "portfolio_auth_state";

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: Option<PathBuf>,
}

impl LocalStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// A store with no backing medium; all operations are no-ops.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(key))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key)?;
        std::fs::read_to_string(path).ok()
    }

    pub fn set(&self, key: &str, value: &str) {
        let Some(path) = self.path_for(key) else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(error = %e, key, "failed to create storage directory");
                return;
            }
        }
        if let Err(e) = std::fs::write(&path, value) {
            warn!(error = %e, key, "failed to write storage entry");
        }
    }

    pub fn remove(&self, key: &str) {
        let Some(path) = self.path_for(key) else {
            return;
        };
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(error = %e, key, "failed to remove storage entry");
            }
        }
    }
}

/// The credential store: a single bearer token under a fixed key.
/// No encryption, no expiry tracking - the token's own expiry is enforced
/// server-side.
#[derive(Debug, Clone)]
pub struct TokenStore {
    store: LocalStore,
}

impl TokenStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn set(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
    }
}
