//! Typed client for the remote Supabase backend.
//!
//! # Architecture
//!
//! - The backend is source of truth - NO local sync, direct API calls
//! - Three capability surfaces behind one handle:
//!   - [`AuthClient`] - GoTrue email/password authentication
//!   - [`TableClient`] - PostgREST row select/insert/update/delete/upsert
//!   - [`BucketClient`] - Storage blob upload and public URL issuance
//! - Every remote error is surfaced with the service's message verbatim;
//!   nothing is retried
//!
//! # Example
//!
//! ```rust,ignore
//! use tatame_client::{SupabaseClient, SupabaseConfig};
//!
//! let client = SupabaseClient::new(&config)?;
//!
//! // Sign in (the session token is kept on the handle)
//! let session = client.auth().sign_in_with_password(&email, &password).await?;
//!
//! // Read rows
//! let schedules: Vec<ScheduleRow> = client
//!     .table("tc_schedules")
//!     .select()
//!     .order("sort_key", true)
//!     .list()
//!     .await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod auth;
mod config;
mod error;
mod storage;
mod table;

pub use auth::{AuthClient, AuthUser, Session};
pub use config::SupabaseConfig;
pub use error::ClientError;
pub use storage::BucketClient;
pub use table::{DeleteBuilder, SelectBuilder, TableClient, UpdateBuilder};

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Handle to the remote backend.
///
/// Cheaply cloneable via `Arc`. Holds the project endpoint, the publishable
/// key, and - once signed in - the session access token that authorizes row
/// and blob requests under the service's row-level security.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    anon_key: SecretString,
    /// Session token set by sign-in, cleared by sign-out. The UI is
    /// single-threaded event-driven; the lock is uncontended in practice.
    access_token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("anon_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Create a new client for a project endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint is not a valid URL.
    pub fn new(config: &SupabaseConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(config.url.trim_end_matches('/'))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                base_url,
                anon_key: config.anon_key.clone(),
                access_token: RwLock::new(None),
            }),
        })
    }

    /// The authentication surface.
    #[must_use]
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.clone())
    }

    /// The row surface for one table.
    #[must_use]
    pub fn table(&self, name: &str) -> TableClient {
        TableClient::new(self.clone(), name)
    }

    /// The blob surface for one storage bucket.
    #[must_use]
    pub fn bucket(&self, name: &str) -> BucketClient {
        BucketClient::new(self.clone(), name)
    }

    /// Whether a session token is currently held.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.inner
            .access_token
            .read()
            .map(|t| t.is_some())
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Build an endpoint URL under the project base.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    /// Attach `apikey` and `Authorization` headers to a request.
    ///
    /// The bearer token is the session access token when signed in, falling
    /// back to the publishable key - matching what supabase-js sends.
    pub(crate) fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let anon = self.inner.anon_key.expose_secret().to_string();
        let bearer = self
            .inner
            .access_token
            .read()
            .ok()
            .and_then(|t| t.as_ref().map(|t| t.expose_secret().to_string()))
            .unwrap_or_else(|| anon.clone());

        req.header("apikey", anon).bearer_auth(bearer)
    }

    pub(crate) fn set_access_token(&self, token: Option<SecretString>) {
        if let Ok(mut guard) = self.inner.access_token.write() {
            *guard = token;
        }
    }
}
