//! Client configuration loaded from environment variables.
//!
//! - `PROSHOP_API_URL` - Base URL of the API (default: `http://127.0.0.1:5000`)
//! - `PROSHOP_STORAGE_DIR` - Directory for persisted cart and user info
//!   (default: `.proshop`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_STORAGE_DIR: &str = ".proshop";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL {0}: {1}")]
    InvalidApiUrl(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PROSHOP_API_URL` is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_url = std::env::var("PROSHOP_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let storage_dir = std::env::var("PROSHOP_STORAGE_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_owned());

        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            storage_dir: PathBuf::from(storage_dir),
        })
    }
}

/// Parse an API base URL, accepting only http and https.
///
/// # Errors
///
/// Returns `ConfigError::InvalidApiUrl` for unparseable or non-http URLs.
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidApiUrl(raw.to_owned(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidApiUrl(
            raw.to_owned(),
            format!("unsupported scheme {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url() {
        let url = parse_api_url("http://localhost:5000").ok();
        assert_eq!(url.map(String::from).as_deref(), Some("http://localhost:5000/"));
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        assert!(parse_api_url("ftp://example.com").is_err());
        assert!(parse_api_url("not a url").is_err());
    }
}
