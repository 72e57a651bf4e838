//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPHUB_API_BASE_URL` - Base URL of the store backend (default: <http://localhost:5000>)
//! - `SHOPHUB_DATA_DIR` - Directory for the durable cart snapshot (default: `.shophub`)
//! - `SHOPHUB_API_TOKEN` - Bearer token sent on every backend request
//! - `SHOPHUB_ADMIN_EMAILS` - Comma-separated allowlist of admin emails

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_DATA_DIR: &str = ".shophub";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the store backend.
    pub api_base_url: Url,
    /// Directory holding the durable cart snapshot.
    pub data_dir: PathBuf,
    /// Bearer token for backend requests, if the deployment requires one.
    pub api_token: Option<SecretString>,
    /// Lowercased emails granted the admin flag.
    pub admin_emails: Vec<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("SHOPHUB_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPHUB_API_BASE_URL".to_string(), e.to_string())
        })?;

        let data_dir = PathBuf::from(get_env_or_default("SHOPHUB_DATA_DIR", DEFAULT_DATA_DIR));
        let api_token = get_optional_env("SHOPHUB_API_TOKEN").map(SecretString::from);
        let admin_emails =
            parse_admin_emails(&get_optional_env("SHOPHUB_ADMIN_EMAILS").unwrap_or_default());

        Ok(Self {
            api_base_url,
            data_dir,
            api_token,
            admin_emails,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
pub(crate) fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated email allowlist, lowercasing entries.
fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
