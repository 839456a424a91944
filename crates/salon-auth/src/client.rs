//! REST API client with credential attachment and refresh-and-retry.
//!
//! Every outgoing call is decorated with the current access token from the
//! token store. A response carrying HTTP 401 triggers at most one refresh
//! of the credential pair followed by a single replay of the original
//! request; a second 401 on the replay is handed back to the caller as-is.

use crate::refresh::RefreshCoordinator;
use crate::session::Session;
use crate::{AuthError, AuthResult, Identity};
use reqwest::{Method, Response, StatusCode};
use salon_core::Config;
use salon_storage::{CredentialPair, TokenStore};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Token payload returned by the login endpoint.
#[derive(Debug, Deserialize)]
struct LoginTokens {
    access: String,
    refresh: String,
    #[serde(default)]
    role: Option<String>,
}

/// REST API client for the salon booking backend.
///
/// Wraps every request in the credential pipeline. Cheap to clone; clones
/// share the same token store and session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<TokenStore>,
    session: Arc<Session>,
    refresher: RefreshCoordinator,
}

impl ApiClient {
    /// Create a new client for the given API base URL.
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<TokenStore>,
        session: Arc<Session>,
    ) -> AuthResult<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let http = reqwest::Client::new();
        let refresher = RefreshCoordinator::new(http.clone(), base_url.clone());

        Ok(Self {
            http,
            base_url,
            store,
            session,
            refresher,
        })
    }

    /// Create a new client from the loaded configuration.
    pub fn from_config(
        config: &Config,
        store: Arc<TokenStore>,
        session: Arc<Session>,
    ) -> AuthResult<Self> {
        Self::new(config.api_url.clone(), store, session)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request through the credential pipeline.
    ///
    /// The current access token is read from the store at dispatch time and
    /// attached as a bearer credential when present. On a 401 response the
    /// pipeline refreshes the credential pair once and replays the request
    /// once; whatever the replay returns is the caller's outcome. When no
    /// refresh token exists or the refresh is rejected, the session is torn
    /// down and the original 401 is returned unchanged.
    ///
    /// Concurrent requests that each hit a 401 before any refresh completes
    /// will each trigger their own refresh call; the last write to the
    /// store wins.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> AuthResult<Response> {
        let url = self.api_url(path);
        // Marks that this request already spent its one refresh-and-retry
        let mut retried = false;

        loop {
            let mut request = self.http.request(method.clone(), &url);
            if let Some(token) = self.store.access_token()? {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;

            if response.status() != StatusCode::UNAUTHORIZED || retried {
                return Ok(response);
            }
            retried = true;

            let Some(refresh_token) = self.store.refresh_token()? else {
                warn!(path = %path, "Unauthorized with no refresh token, logging out");
                self.session.logout()?;
                return Ok(response);
            };

            match self.refresher.refresh(&refresh_token).await {
                Ok(tokens) => {
                    self.store.set_access_token(&tokens.access)?;
                    if let Some(refresh) = &tokens.refresh {
                        self.store.set_refresh_token(refresh)?;
                    }
                    debug!(path = %path, "Replaying request with refreshed credential");
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Credential refresh failed, logging out");
                    self.session.logout()?;
                    return Ok(response);
                }
            }
        }
    }

    // ==========================================
    // Account endpoints (unauthenticated)
    // ==========================================

    /// Log in with username and password.
    ///
    /// On success the issued credential pair and role tag are handed to the
    /// session, which persists them and becomes logged in.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<Identity> {
        let url = self.api_url("/user/login/");

        debug!(username = %username, "Attempting login");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, "Login failed");
            return Err(AuthError::Api { status, body });
        }

        let tokens: LoginTokens = response.json().await?;
        let pair = CredentialPair {
            access: tokens.access,
            refresh: tokens.refresh,
        };

        self.session.login(&pair, tokens.role.as_deref())
    }

    /// Register a new account.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AuthResult<Value> {
        let url = self.api_url("/user/register/");

        debug!(username = %username, "Registering account");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
                "first_name": first_name,
                "last_name": last_name,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, "Registration failed");
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    // ==========================================
    // Service endpoints
    // ==========================================

    /// Fetch all services.
    pub async fn services(&self) -> AuthResult<Value> {
        let response = self.request(Method::GET, "/api/services/", None).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, "Failed to fetch services");
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Create a service.
    pub async fn create_service(&self, data: &Value) -> AuthResult<Value> {
        let response = self
            .request(Method::POST, "/api/services/", Some(data))
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, "Failed to create service");
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Update a service.
    pub async fn update_service(&self, id: i64, data: &Value) -> AuthResult<Value> {
        let path = format!("/api/services/{}/", id);
        let response = self.request(Method::PUT, &path, Some(data)).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, service_id = id, "Failed to update service");
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Delete a service.
    pub async fn delete_service(&self, id: i64) -> AuthResult<()> {
        let path = format!("/api/services/{}/", id);
        let response = self.request(Method::DELETE, &path, None).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, service_id = id, "Failed to delete service");
            return Err(AuthError::Api { status, body });
        }

        Ok(())
    }

    // ==========================================
    // Appointment endpoints
    // ==========================================

    /// Fetch all appointments.
    pub async fn appointments(&self) -> AuthResult<Value> {
        let response = self
            .request(Method::GET, "/api/appointments/", None)
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, "Failed to fetch appointments");
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Book an appointment.
    pub async fn book_appointment(&self, data: &Value) -> AuthResult<Value> {
        let response = self
            .request(Method::POST, "/api/appointments/", Some(data))
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, "Failed to book appointment");
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Partially update an appointment (status, checklist).
    pub async fn update_appointment(&self, id: i64, data: &Value) -> AuthResult<Value> {
        let path = format!("/api/appointments/{}/", id);
        let response = self.request(Method::PATCH, &path, Some(data)).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status,
                appointment_id = id,
                "Failed to update appointment"
            );
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Fetch the appointment history for a user.
    pub async fn user_appointments(&self, user_id: &str) -> AuthResult<Value> {
        let path = format!("/api/user/appointments/?user_id={}", user_id);
        let response = self.request(Method::GET, &path, None).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status, user_id = %user_id, "Failed to fetch appointment history");
            return Err(AuthError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}
