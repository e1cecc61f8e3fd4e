//! Client library for the portfolio REST API.
//!
//! Provides the authenticated HTTP pipeline (bearer token injection with
//! one-shot refresh-and-retry on expiry), the auth session store, persistent
//! credential storage, and typed resource services for every entity of the
//! portfolio backend (about, skills, projects, services, experience,
//! certificates, contact messages).
//!
//! Typical wiring:
//!
//! ```no_run
//! use portfolio_client::auth::{AuthSession, LocalStore, TokenStore};
//! use portfolio_client::{api::{ApiClient, PortfolioApi}, config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = LocalStore::new(portfolio_client::config::Config::storage_dir());
//! let client = ApiClient::new(config::api_base_url(), TokenStore::new(store.clone()))?;
//! let api = PortfolioApi::new(client.clone());
//! let mut session = AuthSession::new(client, store);
//! session.load();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError, ApiResponse, PortfolioApi, Resource};
pub use auth::{AuthSession, LocalStore, SessionState, TokenStore};
pub use config::Config;
