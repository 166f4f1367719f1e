//! In-memory, session-scoped key-value area.
//!
//! Contents live exactly as long as the last handle to the area. Nothing is
//! ever written to disk or to any longer-lived store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Cloneable handle to a shared session storage area.
///
/// Clones see the same entries, so an application shell can hand one clone
/// to the session manager and keep another for inspection.
#[derive(Clone, Default)]
pub struct SessionStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStorage {
    /// Create an empty storage area.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Remove an entry. Missing keys are a no-op.
    pub fn remove_item(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// All keys currently held, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

// Values may hold bearer tokens, so only keys are shown.
impl std::fmt::Debug for SessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStorage")
            .field("keys", &self.keys())
            .finish()
    }
}
