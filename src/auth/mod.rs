//! Authentication module for managing the user session and credentials.
//!
//! This module provides:
//! - `AuthSession`: the session store (login/register/logout/refresh)
//! - `LocalStore`/`TokenStore`: persistent storage for the token and the
//!   session object, safe no-ops when no storage medium is available
//! - `SavedLogin`: optional remember-me password storage via the OS keychain

pub mod credentials;
pub mod session;
pub mod storage;

pub use credentials::SavedLogin;
pub use session::{AuthSession, SessionState};
pub use storage::{LocalStore, TokenStore, AUTH_STATE_KEY, TOKEN_KEY};
