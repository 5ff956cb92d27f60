//! Failures at the transport boundary.

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// What went wrong below the HTTP status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Connect,
    Other,
}

/// A failed Gateway call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Network failure or timeout; no response was received.
    #[error("{message}")]
    Transport { kind: TransportKind, message: String },

    /// The backend answered with a non-2xx status.
    ///
    /// `error` is the structured `error` field of a JSON body, when present.
    #[error("Request failed with status code {status}")]
    Remote {
        status: u16,
        error: Option<String>,
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request could not be constructed.
    #[error("failed to build request: {0}")]
    Build(String),
}

impl GatewayError {
    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Build a remote error from a status and raw body, picking out the
    /// backend's `{"error": "..."}` field if the body carries one.
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let error = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .filter(|e| !e.trim().is_empty());
        Self::Remote {
            status,
            error,
            body,
        }
    }

    pub fn is_connection_refused(&self) -> bool {
        matches!(
            self,
            GatewayError::Transport {
                kind: TransportKind::Connect,
                ..
            }
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            let message = match err.url() {
                Some(url) => format!("request to {url} timed out"),
                None => "request timed out".to_string(),
            };
            GatewayError::transport(TransportKind::Timeout, message)
        } else if err.is_connect() {
            let message = match err.url() {
                Some(url) => format!("could not connect to {url}"),
                None => "connection refused".to_string(),
            };
            GatewayError::transport(TransportKind::Connect, message)
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else if err.is_builder() {
            GatewayError::Build(err.to_string())
        } else if let Some(status) = err.status() {
            GatewayError::remote(status.as_u16(), String::new())
        } else {
            GatewayError::transport(TransportKind::Other, err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Invalid client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported API URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}
