//! Command implementations, one module per area.

pub mod admin;
pub mod agenda;
pub mod pay;
pub mod profile;
pub mod setup;

use thiserror::Error;

use tatame_app::{AppContext, AppError, ConfigStore, ViewState};

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// No credentials were given via flags or environment.
    #[error("informe --email e --password (ou TATAME_EMAIL / TATAME_PASSWORD)")]
    MissingCredentials,

    /// Setup has not happened yet.
    #[error("backend não configurado - rode `tatame setup --url ... --key ...`")]
    NotConfigured,

    /// A local file could not be read.
    #[error("não foi possível ler o arquivo {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// The terminal prompt could not be written or read.
    #[error("falha de entrada/saída no terminal: {0}")]
    Terminal(#[from] std::io::Error),

    /// The application core reported a failure.
    #[error(transparent)]
    App(#[from] AppError),
}

/// Resolve the email/password pair or fail before any remote call.
pub fn credentials(
    email: &Option<String>,
    password: &Option<String>,
) -> Result<(String, String), CliError> {
    match (email, password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => {
            Ok((e.trim().to_string(), p.clone()))
        }
        _ => Err(CliError::MissingCredentials),
    }
}

/// Bootstrap the context from stored configuration and sign in.
pub async fn sign_in(
    store: &ConfigStore,
    email: &str,
    password: &str,
) -> Result<AppContext, CliError> {
    let mut context = AppContext::bootstrap(store)?;
    if context.view_state() == ViewState::NeedsConfig {
        return Err(CliError::NotConfigured);
    }
    context.sign_in(email, password).await?;
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_present() {
        let pair = credentials(
            &Some("aluno@example.com".to_string()),
            &Some("secret".to_string()),
        )
        .expect("credentials should resolve");
        assert_eq!(pair.0, "aluno@example.com");
    }

    #[test]
    fn test_terminal_error_names_the_terminal() {
        let err = CliError::from(std::io::Error::other("pipe quebrado"));
        assert_eq!(
            err.to_string(),
            "falha de entrada/saída no terminal: pipe quebrado"
        );
    }

    #[test]
    fn test_credentials_missing() {
        assert!(matches!(
            credentials(&None, &Some("secret".to_string())),
            Err(CliError::MissingCredentials)
        ));
        assert!(matches!(
            credentials(&Some("  ".to_string()), &Some("secret".to_string())),
            Err(CliError::MissingCredentials)
        ));
    }
}
