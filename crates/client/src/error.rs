//! Client error type.

use thiserror::Error;

/// Errors that can occur when talking to the remote backend.
///
/// Remote failures keep the service's own message so callers can surface it
/// verbatim. No variant is retried; every failure is terminal for the
/// operation that produced it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("remote error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the service's error body.
        message: String,
    },

    /// JSON (de)serialization failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configured or derived URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a status code and raw error body.
    ///
    /// GoTrue, PostgREST and Storage each use a slightly different error
    /// envelope; this pulls the human-readable message out of whichever
    /// field is present and falls back to the raw body.
    #[must_use]
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error_description", "msg", "message", "error"]
                    .iter()
                    .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(String::from))
            })
            .unwrap_or_else(|| body.trim().to_string());

        Self::Api { status, message }
    }
}
