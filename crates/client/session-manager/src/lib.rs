//! Session Manager Library
//!
//! Client-side authentication session: exchanges credentials for a bearer
//! token, keeps that token in session-scoped storage, caches the current
//! user's identity and answers authorization queries against it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use common::ClientConfig;
//! use session_manager::{HttpAuthClient, SessionManager, SessionStorage};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpAuthClient::new(ClientConfig::new("http://localhost:8080"))?;
//! let session = SessionManager::new(Arc::new(client), SessionStorage::new());
//!
//! session.login("testuser", "password123").await?;
//! if session.is_authenticated() && session.has_role("admin") {
//!     println!("welcome back, {:?}", session.current_user());
//! }
//! session.logout();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod service;
pub mod store;
pub mod token;

pub use client::{AuthApiClient, HttpAuthClient};
pub use service::SessionManager;
pub use store::{SessionStorage, TokenStore};
pub use token::{is_unexpired_at, read_claims, TokenClaims};

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockAuthApiClient;
