//! Common utilities shared by the session manager and its shell.
//!
//! This crate provides:
//! - Transport error type and the error classifier
//! - Client configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{classify, Exchange, TransportError, TransportResult};
