//! The session/configuration store.
//!
//! Exactly two strings persist across process restarts: the backend
//! endpoint URL and the publishable key. They are read at start-up and
//! written on explicit setup; presence of both is what lets the remote
//! client be constructed at all.
//!
//! # Sources
//!
//! Environment variables (via `dotenvy`, so a `.env` file works) take
//! precedence over the on-disk store:
//!
//! - `SUPABASE_URL` - project endpoint URL
//! - `SUPABASE_ANON_KEY` - publishable key

use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use tatame_client::SupabaseConfig;

/// Configuration errors that can occur while loading or saving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config at {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("setup requires both the URL and the key")]
    IncompleteSetup,
}

/// On-disk shape of the store. Two slots, nothing else.
#[derive(Serialize, Deserialize)]
struct StoredConfig {
    supabase_url: String,
    supabase_anon_key: String,
}

/// Persistent store for the two configuration strings.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional store location: `$HOME/.config/tatame/config.json`,
    /// overridable with `TATAME_CONFIG`, falling back to the working
    /// directory when neither is available.
    #[must_use]
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TATAME_CONFIG") {
            return PathBuf::from(path);
        }
        std::env::var("HOME").map_or_else(
            |_| PathBuf::from("tatame-config.json"),
            |home| {
                Path::new(&home)
                    .join(".config")
                    .join("tatame")
                    .join("config.json")
            },
        )
    }

    /// Read the stored configuration, if any.
    ///
    /// A missing file is `Ok(None)` - it just means setup has not happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<SupabaseConfig>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let stored: StoredConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), "loaded configuration");
        Ok(Some(SupabaseConfig::new(
            stored.supabase_url,
            SecretString::from(stored.supabase_anon_key),
        )))
    }

    /// Persist both strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteSetup`] when either string is empty
    /// (presence is the only validation), or an I/O error if the file cannot
    /// be written.
    pub fn save(&self, url: &str, anon_key: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        let anon_key = anon_key.trim();
        if url.is_empty() || anon_key.is_empty() {
            return Err(ConfigError::IncompleteSetup);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let stored = StoredConfig {
            supabase_url: url.to_string(),
            supabase_anon_key: anon_key.to_string(),
        };
        let raw = serde_json::to_string_pretty(&stored).map_err(|source| {
            ConfigError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, raw).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

/// Resolve the active configuration: environment first, stored file second.
///
/// Calls `dotenvy::dotenv()` so a local `.env` file participates.
///
/// # Errors
///
/// Returns an error only when the stored file exists but is unreadable;
/// absence of configuration is `Ok(None)`.
pub fn resolve(store: &ConfigStore) -> Result<Option<SupabaseConfig>, ConfigError> {
    let _ = dotenvy::dotenv();

    if let (Ok(url), Ok(key)) = (
        std::env::var("SUPABASE_URL"),
        std::env::var("SUPABASE_ANON_KEY"),
    ) && !url.trim().is_empty()
        && !key.trim().is_empty()
    {
        return Ok(Some(SupabaseConfig::new(url, SecretString::from(key))));
    }

    store.load()
}
