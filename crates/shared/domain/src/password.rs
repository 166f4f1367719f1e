//! Password value object - a plain-text secret in transit.
//!
//! The client never hashes or stores a password. It exists only long enough to
//! be serialized into one login request body and is dropped with that request.

use serde::{Deserialize, Serialize};

/// Plain-text password wrapper that never shows up in debug output or logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password {
    secret: String,
}

// Don't expose the secret in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap a plain-text password.
    pub fn new(plain_text: impl Into<String>) -> Self {
        Self {
            secret: plain_text.into(),
        }
    }

    /// Borrow the plain text, for the request body and for tests.
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl From<&str> for Password {
    fn from(plain_text: &str) -> Self {
        Password::new(plain_text)
    }
}

impl From<String> for Password {
    fn from(plain_text: String) -> Self {
        Password::new(plain_text)
    }
}
