//! GoTrue authentication surface.
//!
//! Email/password only - that is the whole credential surface of the
//! application. Tokens are JWTs minted by the remote service; this module
//! never inspects them, it only carries them.

use secrecy::SecretString;
use serde::Deserialize;
use tracing::{debug, instrument};

use tatame_core::UserId;

use crate::{ClientError, SupabaseClient};

/// The identity record returned by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// Opaque user id. Keys the profile row one-to-one.
    pub id: UserId,
    /// Email as confirmed by the service.
    pub email: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    user: AuthUser,
}

impl Session {
    /// Create a session record for an identity.
    #[must_use]
    pub const fn new(user: AuthUser) -> Self {
        Self { user }
    }

    /// The signed-in identity.
    #[must_use]
    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    /// The signed-in identity's id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

/// Authentication operations on a [`SupabaseClient`].
pub struct AuthClient {
    client: SupabaseClient,
}

impl AuthClient {
    pub(crate) fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Register a new identity.
    ///
    /// Does not establish a session - the caller signs in afterwards, which
    /// also covers projects with email confirmation enabled.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure (e.g., the email is
    /// already registered or the password is rejected).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, ClientError> {
        let url = self.client.endpoint("auth/v1/signup")?;

        let response = self
            .client
            .authorize(self.client.http().post(url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        // GoTrue answers with the bare user when confirmation is pending and
        // with a session envelope when auto-confirm is on.
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let user_value = value.get("user").cloned().unwrap_or(value);
        let user: AuthUser = serde_json::from_value(user_value)?;

        debug!(user_id = %user.id, "account created");
        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// On success the session token is kept on the client handle and
    /// authorizes all subsequent row and blob requests.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure (invalid
    /// credentials included).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let mut url = self.client.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .client
            .authorize(self.client.http().post(url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        self.client
            .set_access_token(Some(SecretString::from(token.access_token)));

        debug!(user_id = %token.user.id, "signed in");
        Ok(Session { user: token.user })
    }

    /// Sign out.
    ///
    /// The remote logout is best-effort; the local session token is cleared
    /// unconditionally so no stale identity survives.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if self.client.has_session()
            && let Ok(url) = self.client.endpoint("auth/v1/logout")
        {
            let _ = self
                .client
                .authorize(self.client.http().post(url))
                .send()
                .await;
        }

        self.client.set_access_token(None);
        debug!("signed out");
    }
}
