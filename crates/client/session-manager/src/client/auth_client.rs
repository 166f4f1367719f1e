//! HTTP client for the authentication API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use common::{ClientConfig, TransportError, TransportResult};
use domain::{
    LoginRequest, LoginResponse, ProfileUpdate, User, BEARER_TOKEN_PREFIX, CURRENT_USER_ENDPOINT,
    LOGIN_ENDPOINT, PROFILE_ENDPOINT,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trait for the remote calls the session manager needs.
///
/// Implementations report raw transport outcomes; classification into domain
/// errors happens in the session manager.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthApiClient: Send + Sync {
    /// Exchange credentials for a token and user (POST)
    async fn login(&self, request: LoginRequest) -> TransportResult<LoginResponse>;

    /// Apply a partial profile update and return the full user (PUT)
    async fn update_profile(
        &self,
        bearer: Option<String>,
        update: ProfileUpdate,
    ) -> TransportResult<User>;

    /// Fetch the user the bearer token belongs to (GET)
    async fn fetch_profile(&self, bearer: Option<String>) -> TransportResult<User>;
}

/// reqwest-backed client for the authentication API.
pub struct HttpAuthClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpAuthClient {
    /// Build a client for the configured base URL.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        debug!("Creating auth API client for {}", config.base_url);
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Send a request and decode a success body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> TransportResult<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            debug!(status = status.as_u16(), "Request rejected");
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::invalid_body(status.as_u16(), e.to_string()))
    }
}

#[async_trait]
impl AuthApiClient for HttpAuthClient {
    async fn login(&self, request: LoginRequest) -> TransportResult<LoginResponse> {
        debug!(username = %request.username, "POST {}", LOGIN_ENDPOINT);
        let builder = self.client.post(self.url(LOGIN_ENDPOINT)).json(&request);
        // The request (and the password in it) is dropped once the body is built.
        drop(request);

        self.send(builder).await
    }

    async fn update_profile(
        &self,
        bearer: Option<String>,
        update: ProfileUpdate,
    ) -> TransportResult<User> {
        debug!("PUT {}", PROFILE_ENDPOINT);
        let builder = with_bearer(self.client.put(self.url(PROFILE_ENDPOINT)), bearer).json(&update);

        self.send(builder).await
    }

    async fn fetch_profile(&self, bearer: Option<String>) -> TransportResult<User> {
        debug!("GET {}", CURRENT_USER_ENDPOINT);
        let builder = with_bearer(self.client.get(self.url(CURRENT_USER_ENDPOINT)), bearer);

        self.send(builder).await
    }
}

fn with_bearer(builder: RequestBuilder, bearer: Option<String>) -> RequestBuilder {
    match bearer {
        Some(token) => {
            builder.header(AUTHORIZATION, format!("{}{}", BEARER_TOKEN_PREFIX, token))
        }
        None => builder,
    }
}

/// Convert reqwest error to TransportError.
///
/// Errors without a status never got a response.
fn transport_error(e: reqwest::Error) -> TransportError {
    match e.status() {
        Some(status) => TransportError::Status(status.as_u16()),
        None => TransportError::unreachable(e.to_string()),
    }
}
