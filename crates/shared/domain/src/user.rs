//! User identity and profile update types.

use serde::{Deserialize, Serialize};

/// Authenticated user identity as returned by the server.
///
/// Unknown fields in server payloads are ignored; the record is always
/// replaced as a whole, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    /// Check if the user holds a role (exact, case-sensitive match)
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Partial profile update. Unset fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Update only the email address
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}
