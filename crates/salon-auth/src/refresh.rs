//! Token refresh against the backend refresh endpoint.

use crate::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

/// Tokens returned by the refresh endpoint.
///
/// The server may rotate the refresh token; when it does not, the caller
/// keeps using the existing one.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedTokens {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Stateless client for the refresh endpoint.
///
/// Performs a single network call per invocation and never retries; retry
/// policy belongs to the request pipeline. Concurrent invocations are safe
/// but not deduplicated.
#[derive(Clone)]
pub struct RefreshCoordinator {
    http: reqwest::Client,
    base_url: String,
}

impl RefreshCoordinator {
    /// Create a new coordinator for the given API base URL.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Exchange a refresh token for a new access token (and possibly a new
    /// refresh token).
    ///
    /// Fails with [`AuthError::RefreshRejected`] on any non-success response
    /// and with [`AuthError::Http`] on transport failure.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<RefreshedTokens> {
        let url = format!("{}/user/refresh/", self.base_url);

        debug!(url = %url, "Refreshing access token");

        let response = self
            .http
            .post(&url)
            .json(&RefreshRequest {
                refresh: refresh_token,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, body = %body, "Token refresh rejected");
            return Err(AuthError::RefreshRejected { status, body });
        }

        let tokens: RefreshedTokens = response.json().await?;
        debug!(rotated_refresh = tokens.refresh.is_some(), "Access token refreshed");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refreshed_tokens_without_rotation() {
        let tokens: RefreshedTokens = serde_json::from_str(r#"{"access":"a2"}"#).unwrap();
        assert_eq!(tokens.access, "a2");
        assert!(tokens.refresh.is_none());
    }

    #[test]
    fn test_refreshed_tokens_with_rotation() {
        let tokens: RefreshedTokens =
            serde_json::from_str(r#"{"access":"a2","refresh":"r2"}"#).unwrap();
        assert_eq!(tokens.access, "a2");
        assert_eq!(tokens.refresh, Some("r2".to_string()));
    }
}
