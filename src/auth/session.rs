//! Auth session store: who is logged in, and the operations that change it.
//!
//! State machine: anonymous (user unset) -> authenticating (loading during
//! login/register) -> authenticated (user and token set) -> anonymous again
//! on logout or fatal refresh failure. The `{user, access_token,
//! is_logged_in}` triple is persisted across restarts; loading and error
//! flags are always transient.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{LoginCredentials, RegisterCredentials, User};

use super::storage::{LocalStore, AUTH_STATE_KEY};

/// Client-side session state. The serde-skipped fields are the transient
/// ones: they reset to their defaults on every rehydration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<User>,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    #[serde(rename = "isLoggedIn")]
    pub is_logged_in: bool,
    #[serde(skip)]
    pub is_loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
}

pub struct AuthSession {
    client: ApiClient,
    store: LocalStore,
    state: SessionState,
}

impl AuthSession {
    pub fn new(client: ApiClient, store: LocalStore) -> Self {
        Self {
            client,
            store,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in
    }

    /// Rehydrate a previous session from persistent storage. Returns true
    /// when a logged-in session was recovered.
    pub fn load(&mut self) -> bool {
        let Some(raw) = self.store.get(AUTH_STATE_KEY) else {
            return false;
        };
        match serde_json::from_str::<SessionState>(&raw) {
            Ok(state) => {
                self.state = state;
                // Logged-in only holds when both halves are present
                self.state.is_logged_in = self.state.is_logged_in
                    && self.state.user.is_some()
                    && self.state.access_token.is_some();
                self.state.is_logged_in
            }
            Err(e) => {
                warn!(error = %e, "failed to parse persisted session state");
                false
            }
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.state) {
            Ok(raw) => self.store.set(AUTH_STATE_KEY, &raw),
            Err(e) => warn!(error = %e, "failed to serialize session state"),
        }
    }

    /// Authenticate and establish a session. On failure the error message
    /// lands in the display state *and* is re-raised so the caller can
    /// react.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        self.state.is_loading = true;
        self.state.error = None;

        let result = self.login_inner(credentials).await;

        self.state.is_loading = false;
        if let Err(ref e) = result {
            self.state.error = Some(e.to_string());
        }
        result
    }

    async fn login_inner(&mut self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        let envelope = self.client.login(credentials).await?;
        if !envelope.success {
            return Err(ApiError::Api(envelope.error_message("Login failed")));
        }
        let payload = envelope.data.ok_or_else(|| {
            ApiError::InvalidResponse("login response missing data".to_string())
        })?;
        // A success response without the token would leave the session
        // half-authenticated; reject it instead.
        let token = payload
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::InvalidResponse("login response missing access token".to_string())
            })?;

        self.client.token_store().set(&token);
        self.state.user = Some(payload.user);
        self.state.access_token = Some(token);
        self.state.is_logged_in = true;
        self.persist();

        debug!("session authenticated");
        Ok(())
    }

    /// Create an account. Registration never establishes a session; the
    /// caller is expected to direct the user to login (after email
    /// verification).
    pub async fn register(&mut self, credentials: &RegisterCredentials) -> Result<(), ApiError> {
        self.state.is_loading = true;
        self.state.error = None;

        let result = async {
            let envelope = self.client.register(credentials).await?;
            if !envelope.success {
                return Err(ApiError::Api(envelope.error_message("Registration failed")));
            }
            Ok(())
        }
        .await;

        self.state.is_loading = false;
        if let Err(ref e) = result {
            self.state.error = Some(e.to_string());
        }
        result
    }

    /// End the session. The server call is best-effort; the local session
    /// always ends regardless of its outcome.
    pub async fn logout(&mut self) {
        self.state.is_loading = true;

        if let Err(e) = self.client.logout().await {
            debug!(error = %e, "logout request failed; clearing local session anyway");
        }

        self.client.token_store().clear();
        self.store.remove(AUTH_STATE_KEY);
        self.state = SessionState::default();
    }

    /// Obtain a fresh access token through the client's shared refresh
    /// routine. Any failure tears the session down.
    pub async fn refresh_token(&mut self) -> Option<String> {
        match self.client.refresh_access_token().await {
            Ok(token) => {
                self.state.access_token = Some(token.clone());
                self.persist();
                Some(token)
            }
            Err(e) => {
                debug!(error = %e, "token refresh failed; logging out");
                self.logout().await;
                None
            }
        }
    }

    /// Direct state patch, used when recovering the user from elsewhere.
    pub fn set_user(&mut self, user: Option<User>) {
        self.state.is_logged_in = user.is_some() && self.state.access_token.is_some();
        self.state.user = user;
        self.persist();
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        self.client.verify_email(token).await?.ok()
    }

    pub async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        self.client.resend_verification(email).await?.ok()
    }
}
