//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKOFFICE_API_URL` - Base URL of the REST backend, including the API
//!   prefix (e.g. `http://localhost:8000/api`)
//!
//! ## Optional
//! - `BACKOFFICE_API_TOKEN` - Bearer token for non-interactive sessions
//!   (CLI, scripts); interactive callers sign in instead

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Back-office client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend.
    pub base_url: Url,
    /// Bearer token to preload into the client's token cache.
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "token",
                &self.token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for a known backend, with no preloaded token.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `BACKOFFICE_API_URL` is missing or not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_required_env("BACKOFFICE_API_URL")?)?;
        let token = get_optional_env("BACKOFFICE_API_TOKEN").map(SecretString::from);

        Ok(Self { base_url, token })
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    value
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar("BACKOFFICE_API_URL".to_owned(), e.to_string()))
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_accepts_http() {
        let url = parse_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            base_url: "http://localhost:8000/api".parse().unwrap(),
            token: Some(SecretString::from("5|xK9vQm2wPz8yTr4u")),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("http://localhost:8000/api"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("xK9vQm2wPz8yTr4u"));
    }
}
