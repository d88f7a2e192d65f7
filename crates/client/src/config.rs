//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BIZNIZ_API_URL` - Base URL of the remote API
//!   (default: `https://bizniz-api.vercel.app`)
//! - `BIZNIZ_STATE_DIR` - Directory for durable client state such as the
//!   resolved-endpoint cache (default: the platform data directory, e.g.
//!   `~/.local/share/bizniz`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default base URL of the remote API.
const DEFAULT_API_URL: &str = "https://bizniz-api.vercel.app";

/// File name of the resolved-endpoint cache inside the state directory.
const ENDPOINT_CACHE_FILE: &str = "endpoints.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote API; all request paths are relative to it.
    pub base_url: Url,
    /// Location of the durable resolved-endpoint cache.
    pub endpoint_cache_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `BIZNIZ_API_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("BIZNIZ_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("BIZNIZ_API_URL".to_string(), e.to_string()))?;

        let state_dir = std::env::var("BIZNIZ_STATE_DIR").map_or_else(|_| default_state_dir(), PathBuf::from);

        Ok(Self {
            base_url,
            endpoint_cache_path: state_dir.join(ENDPOINT_CACHE_FILE),
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Platform data directory for bizniz, falling back to the working directory
/// on platforms without one.
fn default_state_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join("bizniz"))
}
