//! Session and resilient-request core for the salon booking client.
//!
//! This crate provides:
//! - Unverified decoding of access tokens into an advisory identity
//! - Session state with a restore/login/logout lifecycle
//! - Token refresh against the backend refresh endpoint
//! - A request pipeline that attaches credentials to every call and
//!   recovers from credential expiry with a single refresh-and-retry
//!
//! ```ignore
//! let paths = salon_core::Paths::new()?;
//! let store = Arc::new(salon_storage::open_store(&paths)?);
//! let session = Arc::new(Session::new(store.clone()));
//! session.restore()?;
//!
//! let client = ApiClient::new("https://api.salon.example", store, session)?;
//! let services = client.services().await?;
//! ```

mod claims;
mod client;
mod error;
mod refresh;
mod session;

pub use claims::{decode_access_token, Identity};
pub use client::ApiClient;
pub use error::{AuthError, AuthResult};
pub use refresh::{RefreshCoordinator, RefreshedTokens};
pub use session::Session;
