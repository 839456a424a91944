//! Session state management.
//!
//! The session holds the current advisory identity and changes only at
//! login/logout boundaries. Silent token refreshes performed by the request
//! pipeline never touch it.

use crate::claims::{decode_access_token, Identity};
use crate::{AuthError, AuthResult};
use salon_storage::{CredentialPair, TokenStore};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

/// Process-wide session state.
///
/// Create one per application and hand it (via `Arc`) to every consumer,
/// together with the request pipeline built on top of it.
pub struct Session {
    store: Arc<TokenStore>,
    current: Mutex<Option<Identity>>,
}

impl Session {
    /// Create a new session over the given token store, initially logged out.
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self {
            store,
            current: Mutex::new(None),
        }
    }

    /// Restore the session from persisted credentials on startup.
    ///
    /// A persisted role tag overrides the role embedded in the decoded
    /// identity. A token that fails to decode leaves the session logged out
    /// but does NOT clear storage.
    ///
    /// Returns whether a session was restored.
    pub fn restore(&self) -> AuthResult<bool> {
        let Some(access) = self.store.access_token()? else {
            debug!("No persisted credentials found");
            return Ok(false);
        };

        let mut identity = match decode_access_token(&access) {
            Ok(identity) => identity,
            Err(AuthError::MalformedToken) => {
                warn!("Persisted access token failed to decode, treating as logged out");
                *self.current.lock().unwrap() = None;
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if let Some(role) = self.store.role()? {
            identity.role = Some(role);
        }

        info!(user_id = %identity.subject, "Session restored from storage");
        *self.current.lock().unwrap() = Some(identity);
        Ok(true)
    }

    /// Establish a session from a fresh credential pair.
    ///
    /// This is the only path that both writes durable storage and updates
    /// in-memory state in one step. A pair without an access token is
    /// reported and rejected without changing anything.
    pub fn login(&self, pair: &CredentialPair, role: Option<&str>) -> AuthResult<Identity> {
        if pair.access.is_empty() {
            error!("Invalid login payload: missing access token");
            return Err(AuthError::InvalidLoginPayload);
        }

        self.store.set_session(pair, role)?;

        let mut identity = decode_access_token(&pair.access)?;
        if let Some(role) = role {
            identity.role = Some(role.to_string());
        }

        info!(user_id = %identity.subject, role = ?identity.role, "Login successful");
        *self.current.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    /// Tear the session down, clearing storage and in-memory state.
    ///
    /// Unconditional and idempotent; also invoked by the request pipeline
    /// when a credential refresh is impossible or rejected.
    pub fn logout(&self) -> AuthResult<()> {
        self.store.clear()?;
        *self.current.lock().unwrap() = None;
        info!("Logged out");
        Ok(())
    }

    /// The current identity, if logged in.
    pub fn current(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }

    /// Whether a session is currently established.
    pub fn is_logged_in(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }
}
