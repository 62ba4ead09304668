//! Unified application error.

use thiserror::Error;

use crate::config::ConfigError;

/// Application-level error type.
///
/// Every remote error is caught at the call site, surfaced to the user as a
/// status string, and halts the current operation. Nothing is retried or
/// escalated.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is missing or unreadable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An operation needs a configured client but none exists yet.
    #[error("not configured: set the backend URL and key first")]
    NotConfigured,

    /// An operation needs a signed-in identity but none exists.
    #[error("not authenticated: sign in first")]
    NotAuthenticated,

    /// Client-side validation failed; no remote call was made.
    #[error("{0}")]
    Validation(String),

    /// The remote backend reported a failure.
    #[error(transparent)]
    Client(#[from] tatame_client::ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::Validation("Preencha hora e turma.".to_string());
        assert_eq!(err.to_string(), "Preencha hora e turma.");
    }

    #[test]
    fn test_client_error_is_transparent() {
        let inner = tatame_client::ClientError::Api {
            status: 401,
            message: "JWT expired".to_string(),
        };
        let err = AppError::from(inner);
        assert_eq!(err.to_string(), "remote error (HTTP 401): JWT expired");
    }
}
