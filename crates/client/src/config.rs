//! Client configuration.

use secrecy::SecretString;

/// Connection settings for one Supabase project.
///
/// Implements `Debug` manually to redact the key.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project endpoint URL (e.g., `https://xyzcompany.supabase.co`).
    pub url: String,
    /// Publishable (anon) key. Row-level security is what actually protects
    /// data; the key only identifies the project.
    pub anon_key: SecretString,
}

impl SupabaseConfig {
    /// Create a configuration from its two strings.
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: SecretString) -> Self {
        Self {
            url: url.into(),
            anon_key,
        }
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}
