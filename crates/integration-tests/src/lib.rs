//! Integration tests for Tatame Connect.
//!
//! Every test here talks to a real Supabase project and is `#[ignore]`d by
//! default. To run them, point the environment at a throwaway project with
//! email confirmation disabled and the `tc_*` tables and storage buckets
//! provisioned:
//!
//! ```bash
//! export SUPABASE_URL=https://<project>.supabase.co
//! export SUPABASE_ANON_KEY=<publishable-key>
//!
//! cargo test -p tatame-integration-tests -- --ignored
//! ```
//!
//! Each scenario signs up a fresh identity so tests do not interfere with
//! each other; the project accumulates throwaway accounts and rows.
//!
//! # Test Categories
//!
//! - `profile_sync` - sign-in bootstrap, profile reads and writes
//! - `schedule_attendance` - schedule CRUD, ordering, attendance upserts
//! - `payments` - receipt upload and payment recording

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use secrecy::SecretString;
use uuid::Uuid;

use tatame_app::AppContext;
use tatame_client::SupabaseConfig;

/// Password shared by all throwaway accounts.
pub const TEST_PASSWORD: &str = "tatame-it-senha-12345";

/// Backend coordinates from the environment. Panics with instructions when
/// unset, so a forgotten export fails loudly instead of hitting localhost.
#[must_use]
pub fn live_config() -> SupabaseConfig {
    let url = std::env::var("SUPABASE_URL")
        .expect("set SUPABASE_URL to run the live integration tests");
    let key = std::env::var("SUPABASE_ANON_KEY")
        .expect("set SUPABASE_ANON_KEY to run the live integration tests");
    SupabaseConfig::new(url, SecretString::from(key))
}

/// A unique throwaway address per call.
#[must_use]
pub fn unique_email() -> String {
    format!("tatame-it-{}@example.com", Uuid::new_v4().simple())
}

/// Sign up and sign in a brand-new identity, returning the authenticated
/// context and its address.
///
/// Relies on the test project having email confirmation disabled, so the
/// password grant works immediately after signup.
pub async fn fresh_identity() -> (AppContext, String) {
    let mut context = AppContext::new();
    context.configure(&live_config()).expect("invalid SUPABASE_URL");

    let email = unique_email();
    context
        .sign_up(&email, TEST_PASSWORD)
        .await
        .expect("signup rejected");
    context
        .sign_in(&email, TEST_PASSWORD)
        .await
        .expect("password sign-in rejected");
    (context, email)
}
