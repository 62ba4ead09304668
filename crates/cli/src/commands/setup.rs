//! Setup and account creation.
//!
//! # Usage
//!
//! ```bash
//! tatame setup --url https://xyz.supabase.co --key <publishable-key>
//! tatame signup --email aluno@example.com --password secret
//! ```

use tatame_app::{AppContext, ConfigStore, ViewState};
use tatame_core::Email;

use super::CliError;

/// Persist the two configuration strings.
///
/// Presence is the only validation; the URL is not probed. After this the
/// view state advances past `NeedsConfig` on the next start.
pub fn run(store: &ConfigStore, url: &str, key: &str) -> Result<(), CliError> {
    store.save(url, key).map_err(tatame_app::AppError::from)?;
    println!("Salvo ✅");
    Ok(())
}

/// Create an account. Sign-in stays a separate step, matching the backend's
/// optional email confirmation.
pub async fn signup(store: &ConfigStore, email: &str, password: &str) -> Result<(), CliError> {
    // Structural check only; the auth service is the authority.
    let email = Email::parse(email)
        .map_err(|e| tatame_app::AppError::Validation(e.to_string()))?;

    let context = AppContext::bootstrap(store)?;
    if context.view_state() == ViewState::NeedsConfig {
        return Err(CliError::NotConfigured);
    }

    let user = context.sign_up(email.as_str(), password).await?;
    println!("Conta criada ✅ Agora faça login. (id: {})", user.id);
    Ok(())
}
