//! Shell configuration.

use std::env;

use common::ClientConfig;

/// Shell configuration loaded from the environment.
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    pub client: ClientConfig,
}

impl ShellConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ClientConfig::default();
        Self {
            client: ClientConfig {
                base_url: env::var("SESSION_API_URL")
                    .or_else(|_| env::var("API_URL"))
                    .unwrap_or(defaults.base_url),
                connect_timeout_ms: env::var("SESSION_CONNECT_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.connect_timeout_ms),
                request_timeout_ms: env::var("SESSION_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.request_timeout_ms),
            },
        }
    }
}
