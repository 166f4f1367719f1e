//! Domain-level constants.
//!
//! These constants define the fixed API surface and storage layout of a session.

// =============================================================================
// Endpoints
// =============================================================================

/// Credential exchange endpoint (POST)
pub const LOGIN_ENDPOINT: &str = "/api/login";

/// Profile update endpoint (PUT)
pub const PROFILE_ENDPOINT: &str = "/api/profile";

/// Current user endpoint (GET)
pub const CURRENT_USER_ENDPOINT: &str = "/api/user";

// =============================================================================
// Token storage
// =============================================================================

/// Session storage key holding the raw bearer token
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Number of dot-separated segments in a compact token
pub const TOKEN_SEGMENT_COUNT: usize = 3;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_NETWORK_ERROR: &str =
    "Unable to connect to the server. Please check your connection.";

pub const MSG_INVALID_CREDENTIALS: &str =
    "Invalid credentials. Please check your username and password.";

pub const MSG_FORBIDDEN: &str = "You do not have permission to perform this action.";

pub const MSG_GENERIC_REQUEST_ERROR: &str = "An error occurred. Please try again.";
