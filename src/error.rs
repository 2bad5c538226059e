//! Error types for flyertown
//!
//! Every failure of the fetch flow (missing credentials, an unreachable
//! backend, a rejected login, a body that does not decode) lands in [`Error`].
//! The variants keep enough detail for logs, while the top-level report treats
//! them all alike.

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for flyertown operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for flyertown
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "POCKETBASE_EMAIL")
        key: Option<String>,
    },

    /// Network error (connection refused, timeout, TLS, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Message from the backend's error body, or the status reason
        message: String,
    },

    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (output sink, descriptor file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// HTTP status carried by the error, if the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error body returned by PocketBase on a failed request
///
/// ```json
/// {"code": 400, "message": "Failed to authenticate.", "data": {}}
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ApiErrorBody {
    /// Build an [`Error::Api`] from a status code and raw response text
    ///
    /// Falls back to the canonical reason phrase when the body is not a
    /// PocketBase error document.
    pub(crate) fn into_error(status: reqwest::StatusCode, body: &str) -> Error {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
