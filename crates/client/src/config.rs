//! Client configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Used when no override is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "STOCKROOM_API_URL";

/// Every request is abandoned after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Validate `base_url` (http/https only) and drop a trailing slash.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/').to_string();
        let url = Url::parse(&trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        Ok(Self {
            base_url: trimmed,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// `STOCKROOM_API_URL` if set and non-empty, else the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(url),
            None => Self::new(DEFAULT_API_URL),
        }
    }

    /// Override the request timeout (tests use short ones).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}
