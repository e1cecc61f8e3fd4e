//! Application configuration management.
//!
//! The API base URL comes from the `PORTFOLIO_API_URL` environment variable
//! (a `.env` file is honored), defaulting to the local development backend.
//! A small persisted config at `~/.config/portfolio-admin/config.json`
//! remembers the last used login email.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/storage directory paths
const APP_NAME: &str = "portfolio-admin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable selecting the API base URL
const API_URL_ENV: &str = "PORTFOLIO_API_URL";

/// Local development backend, used when the environment does not say
/// otherwise
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Resolve the API base URL from the environment.
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory backing the local key-value store (token + session state).
    pub fn storage_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_NAME))
    }
}
