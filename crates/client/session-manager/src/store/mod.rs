//! Session-scoped storage and the token slot built on it.

mod session_storage;
mod token_store;

pub use session_storage::SessionStorage;
pub use token_store::TokenStore;
