//! REST API client module for the portfolio backend.
//!
//! This module provides the `ApiClient` request/response pipeline (bearer
//! token injection, envelope decoding, one-shot 401 refresh-and-retry) and
//! the typed `Resource` services built on top of it.
//!
//! Authentication uses a short-lived bearer access token obtained at login,
//! renewed through the refresh-cookie endpoint when it expires.

pub mod client;
pub mod error;
pub mod resource;
pub mod response;

pub use client::ApiClient;
pub use error::ApiError;
pub use resource::{PortfolioApi, Resource};
pub use response::ApiResponse;
