//! Session manager - Owns the token slot and the identity cache.
//!
//! Remote calls go through an [`AuthApiClient`]; every failure is passed
//! through [`classify`] so callers only ever see a `DomainError`. State is
//! mutated only on the success path of an operation, after the full response
//! has been received and decoded.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};

use common::{classify, Exchange};
use domain::{DomainResult, LoginRequest, LoginResponse, ProfileUpdate, User};

use crate::client::AuthApiClient;
use crate::store::{SessionStorage, TokenStore};
use crate::token;

/// Client-side authentication session.
pub struct SessionManager {
    client: Arc<dyn AuthApiClient>,
    tokens: TokenStore,
    // Held for writing while the token slot changes too, so the pair is
    // always replaced or cleared together.
    identity: RwLock<Option<User>>,
}

impl SessionManager {
    /// Create a session manager with an empty identity cache.
    pub fn new(client: Arc<dyn AuthApiClient>, storage: SessionStorage) -> Self {
        Self {
            client,
            tokens: TokenStore::new(storage),
            identity: RwLock::new(None),
        }
    }

    /// Start with a known identity (e.g. one restored by the application shell).
    pub fn with_identity(self, user: User) -> Self {
        *self.identity.write() = Some(user);
        self
    }

    /// Replace the cached identity without touching the token.
    pub fn set_identity(&self, user: Option<User>) {
        *self.identity.write() = user;
    }

    /// Exchange credentials for a token and user.
    ///
    /// On success the token is stored verbatim and the user is cached. On
    /// failure nothing changes. The password is sent once and not kept.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResponse> {
        debug!(username = %username, "Login attempt");
        let request = LoginRequest::new(username, password);

        let response = self
            .client
            .login(request)
            .await
            .map_err(|e| classify(&e, Exchange::Login))?;

        let mut identity = self.identity.write();
        self.tokens.set(&response.token);
        *identity = Some(response.user.clone());
        drop(identity);

        info!(username = %response.user.username, "Logged in");
        Ok(response)
    }

    /// Send a partial profile update; the returned user replaces the cache.
    pub async fn update_profile(&self, update: ProfileUpdate) -> DomainResult<User> {
        let user = self
            .client
            .update_profile(self.tokens.get(), update)
            .await
            .map_err(|e| classify(&e, Exchange::ProfileUpdate))?;

        *self.identity.write() = Some(user.clone());

        info!(username = %user.username, "Profile updated");
        Ok(user)
    }

    /// Fetch the current user for the stored token and cache it.
    pub async fn refresh_identity(&self) -> DomainResult<User> {
        let user = self
            .client
            .fetch_profile(self.tokens.get())
            .await
            .map_err(|e| classify(&e, Exchange::ProfileFetch))?;

        *self.identity.write() = Some(user.clone());

        debug!(username = %user.username, "Identity refreshed");
        Ok(user)
    }

    /// Check if a stored token carries an unexpired `exp` claim.
    ///
    /// Missing or malformed tokens count as unauthenticated. No I/O.
    pub fn is_authenticated(&self) -> bool {
        self.tokens
            .get()
            .is_some_and(|token| token::is_unexpired_at(&token, Utc::now().timestamp()))
    }

    /// Check if the cached user holds `role` (exact match).
    pub fn has_role(&self, role: &str) -> bool {
        self.identity
            .read()
            .as_ref()
            .is_some_and(|user| user.has_role(role))
    }

    /// Get the cached user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.identity.read().clone()
    }

    /// Raw stored token, for attaching to other requests.
    pub fn access_token(&self) -> Option<String> {
        self.tokens.get()
    }

    /// Clear the token and the cached user. Idempotent.
    pub fn logout(&self) {
        let mut identity = self.identity.write();
        self.tokens.clear();
        let was_logged_in = identity.take().is_some();
        drop(identity);

        if was_logged_in {
            info!("Logged out");
        }
    }

    /// Storage area backing the token slot.
    pub fn storage(&self) -> &SessionStorage {
        self.tokens.storage()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("storage", self.tokens.storage())
            .field("identity", &*self.identity.read())
            .finish()
    }
}
