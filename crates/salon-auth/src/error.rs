//! Authentication and request pipeline error types.

use thiserror::Error;

/// Error type for session and API operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Access token cannot be decoded into an identity
    #[error("Malformed access token")]
    MalformedToken,

    /// Login payload is missing the access token
    #[error("Invalid login payload: missing access token")]
    InvalidLoginPayload,

    /// The refresh endpoint rejected the refresh token
    #[error("Token refresh rejected: HTTP {status}: {body}")]
    RefreshRejected { status: u16, body: String },

    /// An API endpoint returned a non-success response
    #[error("API request failed: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] salon_storage::StorageError),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;
