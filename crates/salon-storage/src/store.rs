//! High-level API for the persisted credential pair and role tag.

use crate::{MemoryTokenStorage, StorageKeys, StorageResult, TokenStorage};
use serde::{Deserialize, Serialize};

/// The access/refresh credential pair issued at login.
///
/// Access tokens are short-lived and self-describing; refresh tokens are
/// opaque and long-lived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access: String,
    pub refresh: String,
}

/// High-level API for storing and retrieving the session credentials.
///
/// Other components receive token copies from here, never direct write
/// access to the backend.
pub struct TokenStore {
    storage: Box<dyn TokenStorage>,
}

impl TokenStore {
    /// Create a new token store with the given storage backend
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Create a token store backed by in-memory storage
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryTokenStorage::new()))
    }

    /// Retrieve the credential pair, present only when both tokens exist
    pub fn credentials(&self) -> StorageResult<Option<CredentialPair>> {
        let access = self.storage.get(StorageKeys::ACCESS_TOKEN)?;
        let refresh = self.storage.get(StorageKeys::REFRESH_TOKEN)?;

        match (access, refresh) {
            (Some(access), Some(refresh)) => Ok(Some(CredentialPair { access, refresh })),
            _ => Ok(None),
        }
    }

    /// Retrieve the access token
    pub fn access_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::ACCESS_TOKEN)
    }

    /// Retrieve the refresh token
    pub fn refresh_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::REFRESH_TOKEN)
    }

    /// Retrieve the cached role tag
    pub fn role(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::USER_ROLE)
    }

    /// Store the access token (refresh-success path)
    pub fn set_access_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::ACCESS_TOKEN, token)
    }

    /// Store the refresh token
    pub fn set_refresh_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::REFRESH_TOKEN, token)
    }

    /// Store the complete session (credential pair + role tag).
    ///
    /// A missing role removes any stale tag left from a previous session.
    pub fn set_session(&self, pair: &CredentialPair, role: Option<&str>) -> StorageResult<()> {
        self.storage.set(StorageKeys::ACCESS_TOKEN, &pair.access)?;
        self.storage.set(StorageKeys::REFRESH_TOKEN, &pair.refresh)?;
        match role {
            Some(role) => self.storage.set(StorageKeys::USER_ROLE, role)?,
            None => {
                let _ = self.storage.delete(StorageKeys::USER_ROLE);
            }
        }
        Ok(())
    }

    /// Clear all persisted session entries
    pub fn clear(&self) -> StorageResult<()> {
        let _ = self.storage.delete(StorageKeys::ACCESS_TOKEN);
        let _ = self.storage.delete(StorageKeys::REFRESH_TOKEN);
        let _ = self.storage.delete(StorageKeys::USER_ROLE);
        Ok(())
    }
}
