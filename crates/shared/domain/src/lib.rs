//! Domain layer - Core session entities and value objects.
//!
//! This crate contains pure domain types with no transport dependencies.
//! The session manager, the error classifier and the shell all share them.

pub mod auth;
pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use auth::{LoginRequest, LoginResponse};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{ProfileUpdate, User};
