//! Single bearer-token slot in session storage.

use tracing::debug;

use domain::AUTH_TOKEN_KEY;

use super::SessionStorage;

/// Holds at most one token under [`AUTH_TOKEN_KEY`].
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: SessionStorage,
}

impl TokenStore {
    pub fn new(storage: SessionStorage) -> Self {
        Self { storage }
    }

    /// Store a token verbatim, replacing any previous one.
    pub fn set(&self, token: &str) {
        self.storage.set_item(AUTH_TOKEN_KEY, token);
        debug!(key = AUTH_TOKEN_KEY, "Token stored");
    }

    pub fn get(&self) -> Option<String> {
        self.storage.get_item(AUTH_TOKEN_KEY)
    }

    /// Remove the token. Idempotent.
    pub fn clear(&self) {
        self.storage.remove_item(AUTH_TOKEN_KEY);
    }

    /// Backing storage area.
    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }
}
