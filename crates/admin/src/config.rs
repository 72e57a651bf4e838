//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPHUB_API_BASE_URL` - Base URL of the store backend (default: <http://localhost:5000>)
//! - `SHOPHUB_ADMIN_TOKEN` - Bearer token for admin backend requests

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum AdminConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the store backend.
    pub api_base_url: Url,
    /// Bearer token for admin requests, if the deployment requires one.
    pub admin_token: Option<SecretString>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `AdminConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AdminConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = std::env::var("SHOPHUB_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            AdminConfigError::InvalidEnvVar("SHOPHUB_API_BASE_URL".to_string(), e.to_string())
        })?;

        let admin_token = std::env::var("SHOPHUB_ADMIN_TOKEN")
            .ok()
            .map(SecretString::from);

        Ok(Self {
            api_base_url,
            admin_token,
        })
    }
}
