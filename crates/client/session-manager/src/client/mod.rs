//! HTTP clients for calling the authentication API.

mod auth_client;

pub use auth_client::{AuthApiClient, HttpAuthClient};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_client::MockAuthApiClient;
