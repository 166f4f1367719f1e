//! Transport errors and their classification into domain errors.
//!
//! Transport implementations report what happened on the wire as a
//! [`TransportError`]. [`classify`] is the single translation point from that
//! detail to the closed [`DomainError`] set seen by callers.

use domain::DomainError;
use thiserror::Error;

/// Outcome of a failed exchange, as seen by the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response was received (connect failure, timeout, aborted request)
    #[error("No response from server: {0}")]
    Unreachable(String),

    /// The server answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    /// The server answered with success but the body had the wrong shape
    #[error("Invalid response body (HTTP {status}): {reason}")]
    InvalidBody { status: u16, reason: String },
}

impl TransportError {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        TransportError::Unreachable(reason.into())
    }

    pub fn invalid_body(status: u16, reason: impl Into<String>) -> Self {
        TransportError::InvalidBody {
            status,
            reason: reason.into(),
        }
    }

    /// HTTP status of the response, if one was received.
    ///
    /// Status 0 is how some transports report "no response"; it is treated the
    /// same as [`TransportError::Unreachable`].
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Unreachable(_) | TransportError::Status(0) => None,
            TransportError::Status(code) => Some(*code),
            TransportError::InvalidBody { status, .. } => Some(*status),
        }
    }
}

/// Result type alias for transport calls
pub type TransportResult<T> = Result<T, TransportError>;

/// Which exchange failed. Only login turns a 401 into bad credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Login,
    ProfileUpdate,
    ProfileFetch,
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exchange::Login => write!(f, "login"),
            Exchange::ProfileUpdate => write!(f, "profile update"),
            Exchange::ProfileFetch => write!(f, "profile fetch"),
        }
    }
}

/// Map a failed exchange to exactly one domain error.
///
/// Depends only on the presence of a response, its status and the exchange.
/// Response bodies are never read for messages.
pub fn classify(err: &TransportError, exchange: Exchange) -> DomainError {
    let domain_err = match (err, err.status()) {
        (_, None) => DomainError::NetworkError,
        (TransportError::Status(_), Some(401)) if exchange == Exchange::Login => {
            DomainError::InvalidCredentials
        }
        (TransportError::Status(_), Some(403)) => DomainError::Forbidden,
        _ => DomainError::GenericRequestError,
    };

    tracing::warn!(
        exchange = %exchange,
        status = ?err.status(),
        code = domain_err.code(),
        "Request failed"
    );

    domain_err
}
