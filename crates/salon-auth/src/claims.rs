//! Unverified access-token decoding.
//!
//! Access tokens are decoded locally into an advisory identity for display
//! purposes. The signature is NOT verified here; that is the server's
//! responsibility, and real authorization is always enforced server-side.

use crate::{AuthError, AuthResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Identity decoded from an access token.
///
/// Always consistent with the token it was derived from: decoding either
/// fully succeeds or yields no identity at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Subject (user id) from the `sub` claim, falling back to `user_id`
    pub subject: String,
    /// Role claim, possibly overridden by the persisted role tag
    pub role: Option<String>,
    /// Expiry (`exp` claim, unix timestamp)
    pub expiry: Option<i64>,
    /// All claims carried by the token
    pub claims: Map<String, Value>,
}

impl Identity {
    /// Whether this identity carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// Expiry as a UTC timestamp, when the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Decode an access token's payload into an [`Identity`].
///
/// Fails with [`AuthError::MalformedToken`] when the token is not in the
/// expected compact three-segment form or its payload is not a JSON claims
/// object with a subject.
pub fn decode_access_token(token: &str) -> AuthResult<Identity> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(AuthError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::MalformedToken)?;
    let claims: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;

    let subject = claims
        .get("sub")
        .or_else(|| claims.get("user_id"))
        .and_then(claim_to_string)
        .ok_or(AuthError::MalformedToken)?;

    let role = claims
        .get("role")
        .and_then(Value::as_str)
        .map(String::from);
    let expiry = claims.get("exp").and_then(Value::as_i64);

    Ok(Identity {
        subject,
        role,
        expiry,
        claims,
    })
}

// Subjects arrive as strings or bare numbers depending on the issuer.
fn claim_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
