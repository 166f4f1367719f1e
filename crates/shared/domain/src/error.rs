//! Domain-level errors.
//!
//! The closed set of failures a session operation can surface to its caller.
//! Each kind carries a fixed user-facing message; transport detail never leaks
//! past this type.

use thiserror::Error;

use crate::constants::{
    MSG_FORBIDDEN, MSG_GENERIC_REQUEST_ERROR, MSG_INVALID_CREDENTIALS, MSG_NETWORK_ERROR,
};

/// Domain errors produced by the error classifier.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// No response was received from the server
    #[error("{}", MSG_NETWORK_ERROR)]
    NetworkError,

    /// Login was rejected with 401
    #[error("{}", MSG_INVALID_CREDENTIALS)]
    InvalidCredentials,

    /// The server refused the action with 403
    #[error("{}", MSG_FORBIDDEN)]
    Forbidden,

    /// Any other failed request
    #[error("{}", MSG_GENERIC_REQUEST_ERROR)]
    GenericRequestError,
}

impl DomainError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NetworkError => "NETWORK_ERROR",
            DomainError::InvalidCredentials => "INVALID_CREDENTIALS",
            DomainError::Forbidden => "FORBIDDEN",
            DomainError::GenericRequestError => "REQUEST_ERROR",
        }
    }

    /// Get the fixed user-facing message
    pub fn message(&self) -> &'static str {
        match self {
            DomainError::NetworkError => MSG_NETWORK_ERROR,
            DomainError::InvalidCredentials => MSG_INVALID_CREDENTIALS,
            DomainError::Forbidden => MSG_FORBIDDEN,
            DomainError::GenericRequestError => MSG_GENERIC_REQUEST_ERROR,
        }
    }
}

/// Result type alias for session operations
pub type DomainResult<T> = Result<T, DomainError>;
