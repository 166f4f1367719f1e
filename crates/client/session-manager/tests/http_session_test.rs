//! End-to-end tests for the session manager over HTTP.
//!
//! A small axum app stands in for the authentication API so the reqwest
//! client, the classifier and the session state are exercised together over
//! real sockets.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

use common::ClientConfig;
use domain::{DomainError, LoginRequest, LoginResponse, ProfileUpdate, User, BEARER_TOKEN_PREFIX};
use session_manager::{HttpAuthClient, SessionManager, SessionStorage};

const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

/// How long the API stalls before answering a login for `slow`
const SLOW_LOGIN_DELAY: Duration = Duration::from_millis(1500);

// =============================================================================
// Test API
// =============================================================================

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: i64,
}

fn mint_token(sub: &str, exp: i64) -> String {
    encode(
        &Header::default(),
        &Claims {
            sub: sub.to_string(),
            exp,
        },
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

fn server_user(email: &str) -> User {
    User {
        id: "123".to_string(),
        username: "testuser".to_string(),
        email: email.to_string(),
        roles: vec!["user".to_string(), "admin".to_string()],
    }
}

async fn login(Json(request): Json<LoginRequest>) -> Response {
    if request.username == "slow" {
        tokio::time::sleep(SLOW_LOGIN_DELAY).await;
    }

    let now = Utc::now().timestamp();
    match (request.username.as_str(), request.password.expose()) {
        ("testuser" | "slow", "password123") => Json(LoginResponse {
            token: mint_token("123", now + 3600),
            user: server_user("test@example.com"),
        })
        .into_response(),
        ("stale", "password123") => Json(LoginResponse {
            token: mint_token("123", now - 3600),
            user: server_user("test@example.com"),
        })
        .into_response(),
        ("broken", _) => Json(json!({ "token": 42 })).into_response(),
        ("locked", _) => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
        _ => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
}

async fn update_profile(headers: HeaderMap, Json(update): Json<ProfileUpdate>) -> Response {
    if bearer(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    match update.email.as_deref() {
        Some("invalid") => (StatusCode::BAD_REQUEST, "Bad Request").into_response(),
        Some(email) if email.ends_with("@forbidden.com") => {
            (StatusCode::FORBIDDEN, "Forbidden").into_response()
        }
        Some(email) => Json(User {
            roles: vec!["user".to_string()],
            ..server_user(email)
        })
        .into_response(),
        None => Json(server_user("test@example.com")).into_response(),
    }
}

async fn current_user(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(_) => Json(server_user("test@example.com")).into_response(),
        None => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    }
}

async fn spawn_api() -> String {
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/profile", put(update_profile))
        .route("/api/user", get(current_user));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn session_for(base_url: &str, storage: SessionStorage) -> SessionManager {
    session_with_timeout(base_url, storage, 5000)
}

fn session_with_timeout(
    base_url: &str,
    storage: SessionStorage,
    request_timeout_ms: u64,
) -> SessionManager {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        connect_timeout_ms: 1000,
        request_timeout_ms,
    };
    let client = HttpAuthClient::new(config).unwrap();
    SessionManager::new(Arc::new(client), storage)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_login_establishes_session() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    let session = session_for(&base_url, storage.clone());

    let response = assert_ok!(session.login("testuser", "password123").await);

    assert!(session.is_authenticated());
    assert!(session.has_role("admin"));
    assert_eq!(session.current_user(), Some(response.user));
    assert_eq!(storage.get_item("auth_token"), Some(response.token.clone()));
    assert_eq!(session.access_token(), Some(response.token));
    assert_eq!(storage.keys(), vec!["auth_token".to_string()]);
}

#[tokio::test]
async fn test_password_is_not_kept_anywhere() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    let session = session_for(&base_url, storage.clone());

    assert_ok!(session.login("testuser", "password123").await);

    for key in storage.keys() {
        assert!(!storage.get_item(&key).unwrap().contains("password123"));
    }
    assert!(!format!("{:?}", session).contains("password123"));
}

#[tokio::test]
async fn test_wrong_password() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    let session = session_for(&base_url, storage.clone());

    let err = assert_err!(session.login("testuser", "wrongpassword").await);

    assert_eq!(err, DomainError::InvalidCredentials);
    assert!(storage.is_empty());
    assert_eq!(session.current_user(), None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_forbidden_login() {
    let base_url = spawn_api().await;
    let session = session_for(&base_url, SessionStorage::new());

    let err = assert_err!(session.login("locked", "password123").await);

    assert_eq!(err, DomainError::Forbidden);
}

#[tokio::test]
async fn test_malformed_login_body_is_generic_error() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    let session = session_for(&base_url, storage.clone());

    let err = assert_err!(session.login("broken", "password123").await);

    assert_eq!(err, DomainError::GenericRequestError);
    assert!(storage.is_empty());
    assert_eq!(session.current_user(), None);
}

#[tokio::test]
async fn test_server_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = session_for(&format!("http://{}", addr), SessionStorage::new());

    let err = assert_err!(session.login("testuser", "password123").await);

    assert_eq!(err, DomainError::NetworkError);
    assert_eq!(
        err.to_string(),
        "Unable to connect to the server. Please check your connection."
    );
}

#[tokio::test]
async fn test_request_timeout_is_network_error() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    let session = session_with_timeout(&base_url, storage.clone(), 300);

    let err = assert_err!(session.login("slow", "password123").await);

    assert_eq!(err, DomainError::NetworkError);
    assert!(storage.is_empty());
    assert_eq!(session.current_user(), None);
}

#[tokio::test]
async fn test_dropped_login_leaves_no_state() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    let session = session_for(&base_url, storage.clone());

    let pending = tokio::time::timeout(
        Duration::from_millis(200),
        session.login("slow", "password123"),
    )
    .await;
    assert!(pending.is_err());

    // Give the server time to answer the abandoned request.
    tokio::time::sleep(SLOW_LOGIN_DELAY + Duration::from_millis(500)).await;

    assert!(storage.is_empty());
    assert_eq!(session.current_user(), None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_expired_token_from_server() {
    let base_url = spawn_api().await;
    let session = session_for(&base_url, SessionStorage::new());

    assert_ok!(session.login("stale", "password123").await);

    // Identity is cached even though the token has already expired.
    assert!(!session.is_authenticated());
    assert!(session.current_user().is_some());
}

#[tokio::test]
async fn test_update_profile_replaces_identity() {
    let base_url = spawn_api().await;
    let session = session_for(&base_url, SessionStorage::new());
    assert_ok!(session.login("testuser", "password123").await);

    let user = assert_ok!(
        session
            .update_profile(ProfileUpdate::email("newemail@example.com"))
            .await
    );

    assert_eq!(user.email, "newemail@example.com");
    assert_eq!(user.roles, vec!["user".to_string()]);
    assert_eq!(session.current_user(), Some(user));
    assert!(!session.has_role("admin"));
}

#[tokio::test]
async fn test_update_profile_errors() {
    let base_url = spawn_api().await;
    let session = session_for(&base_url, SessionStorage::new());
    assert_ok!(session.login("testuser", "password123").await);
    let before = session.current_user();

    let err = assert_err!(session.update_profile(ProfileUpdate::email("invalid")).await);
    assert_eq!(err.to_string(), "An error occurred. Please try again.");

    let err = assert_err!(
        session
            .update_profile(ProfileUpdate::email("test@forbidden.com"))
            .await
    );
    assert_eq!(
        err.to_string(),
        "You do not have permission to perform this action."
    );

    assert_eq!(session.current_user(), before);
}

#[tokio::test]
async fn test_update_profile_without_session_is_generic_error() {
    let base_url = spawn_api().await;
    let session = session_for(&base_url, SessionStorage::new());

    let err = assert_err!(session.update_profile(ProfileUpdate::email("x@y.com")).await);

    assert_eq!(err, DomainError::GenericRequestError);
}

#[tokio::test]
async fn test_refresh_identity_from_restored_token() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    storage.set_item("auth_token", mint_token("123", Utc::now().timestamp() + 60));
    let session = session_for(&base_url, storage);

    assert!(session.is_authenticated());
    assert_eq!(session.current_user(), None);

    let user = assert_ok!(session.refresh_identity().await);

    assert_eq!(session.current_user(), Some(user));
    assert!(session.has_role("admin"));
}

#[tokio::test]
async fn test_logout_after_login() {
    let base_url = spawn_api().await;
    let storage = SessionStorage::new();
    let session = session_for(&base_url, storage.clone());
    assert_ok!(session.login("testuser", "password123").await);

    session.logout();
    session.logout();

    assert!(storage.is_empty());
    assert_eq!(session.current_user(), None);
    assert!(!session.is_authenticated());
    assert!(!session.has_role("user"));
}
