//! Durable credential storage for the salon booking client.
//!
//! This crate provides the persisted token surface shared by the session
//! and the request pipeline:
//! - A `TokenStorage` trait over string key-value backends
//! - A file-backed backend persisting to the profile directory
//! - An in-memory backend for tests and ephemeral sessions
//! - The high-level `TokenStore` API for the credential pair and role tag

mod file;
mod keys;
mod memory;
mod store;
mod traits;

pub use file::FileTokenStorage;
pub use keys::StorageKeys;
pub use memory::MemoryTokenStorage;
pub use store::{CredentialPair, TokenStore};
pub use traits::TokenStorage;

use salon_core::Paths;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Open the default file-backed token store under the given profile paths.
pub fn open_store(paths: &Paths) -> StorageResult<TokenStore> {
    let storage = FileTokenStorage::open(paths.tokens_file())?;
    Ok(TokenStore::new(Box::new(storage)))
}
