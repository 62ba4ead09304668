//! The view/session state machine.
//!
//! The signed-in identity and the client handle live on an explicit context
//! object rather than global mutable state, with lifecycle
//! `Uninitialized -> Configured -> Authenticated`. The derived
//! [`ViewState`] is what a front end renders:
//!
//! - `NeedsConfig` - no backend configuration, show setup
//! - `NeedsAuth` - configured, show sign-in/sign-up
//! - `Authenticated { admin_visible }` - the main surface; the admin panel
//!   is shown iff the profile role is admin, otherwise a locked placeholder
//!
//! `admin_visible` is UI convenience, not a security boundary - the remote
//! service's row-level security is what actually authorizes writes.
//!
//! Sign-out explicitly resets the context to configured-but-unauthenticated
//! instead of restarting the process; no stale identity survives either way.

use tracing::{instrument, warn};

use tatame_client::{AuthUser, Session, SupabaseClient, SupabaseConfig};
use tatame_core::UserId;

use crate::config::{self, ConfigStore};
use crate::error::AppError;
use crate::models::Profile;
use crate::profile;

/// Which of the mutually exclusive screens is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Both configuration strings are absent; only setup is available.
    NeedsConfig,
    /// A client exists; sign-in/sign-up are available.
    NeedsAuth,
    /// An identity is signed in for the remainder of the session.
    Authenticated {
        /// Whether the admin sub-panel is unlocked.
        admin_visible: bool,
    },
}

enum State {
    Uninitialized,
    Configured {
        client: SupabaseClient,
    },
    Authenticated {
        client: SupabaseClient,
        session: Session,
        admin_visible: bool,
    },
}

/// The application context: configuration, client handle, and session.
///
/// Long-lived; there is no terminal state. Single-threaded use is assumed -
/// overlapping operations are not locked against each other (the backend's
/// upsert conflict resolution is the only safety net).
pub struct AppContext {
    state: State,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext {
    /// Create an unconfigured context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    /// Create a context from whatever configuration is available at
    /// start-up (environment first, stored file second).
    ///
    /// # Errors
    ///
    /// Returns an error if stored configuration exists but is unreadable,
    /// or if the configured endpoint is not a valid URL. Absent
    /// configuration is not an error - the context starts at `NeedsConfig`.
    pub fn bootstrap(store: &ConfigStore) -> Result<Self, AppError> {
        let mut context = Self::new();
        if let Some(config) = config::resolve(store)? {
            context.configure(&config)?;
        }
        Ok(context)
    }

    /// Install backend configuration, constructing the remote client.
    ///
    /// Fires the `NeedsConfig -> NeedsAuth` transition. Reconfiguring an
    /// authenticated context drops the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid.
    pub fn configure(&mut self, config: &SupabaseConfig) -> Result<(), AppError> {
        let client = SupabaseClient::new(config)?;
        self.state = State::Configured { client };
        Ok(())
    }

    /// The currently visible screen.
    #[must_use]
    pub const fn view_state(&self) -> ViewState {
        match &self.state {
            State::Uninitialized => ViewState::NeedsConfig,
            State::Configured { .. } => ViewState::NeedsAuth,
            State::Authenticated { admin_visible, .. } => ViewState::Authenticated {
                admin_visible: *admin_visible,
            },
        }
    }

    /// The remote client handle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotConfigured`] before configuration.
    pub fn client(&self) -> Result<&SupabaseClient, AppError> {
        match &self.state {
            State::Uninitialized => Err(AppError::NotConfigured),
            State::Configured { client } | State::Authenticated { client, .. } => Ok(client),
        }
    }

    /// The signed-in session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`] before sign-in.
    pub fn session(&self) -> Result<&Session, AppError> {
        match &self.state {
            State::Authenticated { session, .. } => Ok(session),
            _ => Err(AppError::NotAuthenticated),
        }
    }

    /// The signed-in identity's id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`] before sign-in.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.session().map(Session::user_id)
    }

    /// Register a new identity. Does not sign in - the account may need
    /// email confirmation first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotConfigured`] before configuration, or the
    /// backend's message verbatim on rejection.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let client = self.client()?;
        Ok(client.auth().sign_up(email, password).await?)
    }

    /// Sign in, then bring the profile in sync: create it if missing and
    /// read it to decide admin visibility.
    ///
    /// Fires `NeedsAuth -> Authenticated`. The identity is cached for the
    /// remainder of the session.
    ///
    /// # Errors
    ///
    /// Returns the backend's message verbatim on authentication failure.
    /// Profile sync failures do not fail the login; they leave the admin
    /// panel locked and the fields empty until the next reload.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        let client = self.client()?.clone();
        let session = client.auth().sign_in_with_password(email, password).await?;
        let user_id = session.user_id();

        if let Err(err) = profile::ensure_profile(&client, user_id).await {
            warn!(%user_id, error = %err, "profile bootstrap failed");
        }

        let loaded = profile::load_profile(&client, user_id).await;
        let admin_visible = admin_visible_for(loaded.ok().flatten().as_ref());

        self.state = State::Authenticated {
            client,
            session,
            admin_visible,
        };
        Ok(())
    }

    /// Sign out and return to `NeedsAuth`.
    ///
    /// The remote logout is best-effort; the context is reset regardless.
    /// Front ends with per-invocation sessions (sign in, run one command,
    /// exit) never need this; it exists for long-lived surfaces that return
    /// to the sign-in screen.
    #[instrument(skip(self))]
    pub async fn sign_out(&mut self) {
        if let State::Authenticated { client, .. } = &self.state {
            let client = client.clone();
            client.auth().sign_out().await;
            self.state = State::Configured { client };
        }
    }

    /// Re-apply admin gating after a profile reload.
    pub fn set_admin_visible(&mut self, profile: Option<&Profile>) {
        if let State::Authenticated { admin_visible, .. } = &mut self.state {
            *admin_visible = admin_visible_for(profile);
        }
    }
}

/// The gating rule: the admin panel is visible iff the loaded profile's
/// role is admin. A missing or unreadable profile keeps it locked.
fn admin_visible_for(profile: Option<&Profile>) -> bool {
    profile.is_some_and(|p| p.role.is_admin())
}
