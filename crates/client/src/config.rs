//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CASITA_API_URL` - Base URL of the listing API including the `/api`
//!   path (default: `http://localhost:5000/api`)
//! - `CASITA_API_ORIGINS` - Extra origins that may receive the bearer
//!   token, comma-separated (the origin of `CASITA_API_URL` is always
//!   included)
//! - `CASITA_SESSION_FILE` - Path of the persisted session record
//!   (default: `<config dir>/casita-azul/session.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const SESSION_DIR: &str = "casita-azul";
const SESSION_FILE: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, including the `/api` path segment.
    pub base_url: Url,
    /// Origins allowed to receive the bearer token. Requests to any other
    /// host pass through without credentials.
    pub authorized_origins: Vec<String>,
    /// Where the session record is persisted. `None` disables persistence
    /// (the non-browser execution path).
    pub session_file: Option<PathBuf>,
}

impl ApiConfig {
    /// Build a configuration for one API base URL.
    ///
    /// The URL's own origin becomes the single authorized origin and the
    /// default session file location is used.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        let origin = base_url.origin().ascii_serialization();
        Self {
            base_url,
            authorized_origins: vec![origin],
            session_file: default_session_file(),
        }
    }

    /// Load the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `CASITA_API_URL` is not a
    /// valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            get_optional_env("CASITA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CASITA_API_URL".to_string(), e.to_string()))?;

        let mut config = Self::new(base_url);

        if let Some(origins) = get_optional_env("CASITA_API_ORIGINS") {
            for origin in origins.split(',') {
                let origin = origin.trim().trim_end_matches('/');
                if !origin.is_empty() {
                    config.authorized_origins.push(origin.to_string());
                }
            }
        }

        if let Some(path) = get_optional_env("CASITA_SESSION_FILE") {
            config.session_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

/// Default location of the persisted session record.
///
/// `None` when the platform exposes no configuration directory; the
/// session then lives in memory only.
#[must_use]
pub fn default_session_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_origin() {
        let config = ApiConfig::new(Url::parse("https://casita-azul-app.onrender.com/api").unwrap());
        assert_eq!(
            config.authorized_origins,
            vec!["https://casita-azul-app.onrender.com".to_string()]
        );
    }

    #[test]
    fn test_default_base_url_parses() {
        assert!(Url::parse(DEFAULT_API_URL).is_ok());
    }
}
