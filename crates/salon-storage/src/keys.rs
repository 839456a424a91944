//! Storage key constants.

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    /// Access token (short-lived, attached to outgoing requests)
    pub const ACCESS_TOKEN: &'static str = "access_token";

    /// Refresh token (long-lived, exchanged for new access tokens)
    pub const REFRESH_TOKEN: &'static str = "refresh_token";

    /// Cached role tag (side channel, may be absent)
    pub const USER_ROLE: &'static str = "user_role";
}
