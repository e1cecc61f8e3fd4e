//! HTTP client for the portfolio REST API.
//!
//! This module provides the `ApiClient` struct: the single configured entry
//! point for all REST calls. It injects the bearer token from the credential
//! store at dispatch time, deserializes the response envelope, and recovers
//! transparently from an expired access token by refreshing once and
//! re-dispatching the original request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::models::{
    AuthPayload, LoginCredentials, RefreshPayload, RegisterCredentials, RegisterPayload,
};

use super::{ApiError, ApiResponse};

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the portfolio backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and the refresh gate and expiry signal are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: TokenStore,
    /// Serializes refresh attempts so concurrent 401s trigger at most one
    /// network refresh.
    refresh_gate: Arc<Mutex<()>>,
    /// Flipped to true on terminal auth failure; the application layer
    /// observes this to send the user back to the login surface.
    expired_tx: Arc<watch::Sender<bool>>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    /// The cookie store is enabled unconditionally so the long-lived
    /// refresh cookie set at login accompanies every request.
    pub fn new(base_url: impl Into<String>, tokens: TokenStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()?;

        let (expired_tx, _) = watch::channel(false);

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            refresh_gate: Arc::new(Mutex::new(())),
            expired_tx: Arc::new(expired_tx),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Receiver that flips to true when the session is torn down after a
    /// terminal auth failure.
    pub fn session_expired(&self) -> watch::Receiver<bool> {
        self.expired_tx.subscribe()
    }

    // ===== Verb helpers =====

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request::<T, ()>(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse<()>, ApiError> {
        self.request::<(), ()>(Method::DELETE, path, &[], None)
            .await
    }

    // ===== Auth endpoints =====

    pub async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<ApiResponse<AuthPayload>, ApiError> {
        self.post("/auth/login", credentials).await
    }

    pub async fn register(
        &self,
        credentials: &RegisterCredentials,
    ) -> Result<ApiResponse<RegisterPayload>, ApiError> {
        self.post("/auth/register", credentials).await
    }

    pub async fn logout(&self) -> Result<ApiResponse<()>, ApiError> {
        self.request::<(), ()>(Method::POST, "/auth/logout", &[], None)
            .await
    }

    pub async fn verify_email(&self, token: &str) -> Result<ApiResponse<()>, ApiError> {
        self.post("/auth/verify-email", &serde_json::json!({ "token": token }))
            .await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<ApiResponse<()>, ApiError> {
        self.post(
            "/auth/resend-verification",
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    /// Exchange the refresh cookie for a new access token and store it.
    /// This is the single refresh routine shared by the 401 recovery path
    /// and the session store; the gate guarantees one attempt at a time.
    pub async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let _guard = self.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    // ===== Pipeline =====

    /// Dispatch a request, recovering once from an expired token.
    ///
    /// The `sent_token` captured before dispatch doubles as the retry guard:
    /// a request is only ever re-dispatched from the 401 arm below, and that
    /// arm does not recurse.
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let sent_token = self.tokens.get();

        let original = match self
            .dispatch(method.clone(), path, query, body, sent_token.as_deref())
            .await
        {
            Err(ApiError::Unauthorized(message)) => ApiError::Unauthorized(message),
            other => return other,
        };

        // One-shot recovery: refresh, then re-dispatch with the new token.
        let fresh = match self.refresh_after_401(sent_token.as_deref()).await {
            Ok(token) => token,
            Err(refresh_err) => {
                debug!(error = %refresh_err, "token refresh failed");
                self.expire_session();
                return Err(original);
            }
        };

        match self.dispatch(method, path, query, body, Some(&fresh)).await {
            Err(ApiError::Unauthorized(_)) => {
                // Still rejected with a fresh token; the session is gone.
                self.expire_session();
                Err(original)
            }
            other => other,
        }
    }

    /// Single send: build the request, attach the bearer token if present,
    /// and normalize any non-2xx outcome into an ApiError.
    async fn dispatch<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(ApiError::from_transport)?;

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        ApiResponse::from_json(&text)
    }

    /// Acquire the refresh gate, then either reuse a token another task
    /// refreshed while we waited, or perform the refresh ourselves.
    async fn refresh_after_401(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_gate.lock().await;

        if let Some(current) = self.tokens.get() {
            if stale != Some(current.as_str()) {
                debug!("reusing token refreshed by a concurrent request");
                return Ok(current);
            }
        }

        self.refresh_locked().await
    }

    /// The refresh call itself: a plain POST with no body, issued directly
    /// on the inner client so it cannot recurse into the 401 recovery.
    /// Caller must hold the refresh gate.
    async fn refresh_locked(&self) -> Result<String, ApiError> {
        let url = format!("{}/auth/refresh", self.base_url);
        debug!("refreshing access token");

        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(ApiError::from_transport)?;

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        let envelope: ApiResponse<RefreshPayload> = ApiResponse::from_json(&text)?;
        if !envelope.success {
            let message = envelope.error_message("Token refresh failed");
            return Err(ApiError::Unauthorized(message));
        }

        let token = envelope
            .data
            .and_then(|payload| payload.access_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::InvalidResponse("refresh response missing access token".to_string())
            })?;

        self.tokens.set(&token);
        Ok(token)
    }

    /// Terminal auth failure: drop the stored token and tell the
    /// application layer to send the user back to login.
    fn expire_session(&self) {
        self.tokens.clear();
        // send_replace updates the value even when nobody subscribed yet
        self.expired_tx.send_replace(true);
        warn!("session expired - login required");
    }
}
