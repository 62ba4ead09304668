//! Tatame application core.
//!
//! Everything durable lives in the remote backend; this crate owns the
//! transient session and the operations the user can trigger:
//!
//! - [`config`] - the two persisted configuration strings that gate client
//!   construction
//! - [`context`] - the view/session state machine
//!   (`NeedsConfig -> NeedsAuth -> Authenticated`)
//! - [`profile`] - create-if-missing profile sync, load, and save with
//!   optional avatar upload
//! - [`schedule`] - schedule listing, admin create/delete, per-day
//!   attendance confirmation
//! - [`payment`] - proof-of-payment upload and pending payment record
//!
//! # Concurrency model
//!
//! Single-threaded, event-driven. All operations are async and non-blocking;
//! none is guarded by a lock or debounce - the remote service's upsert
//! conflict resolution is the only concurrency safety net. No operation
//! retries: every failure is terminal for that user gesture.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod context;
mod error;
pub mod models;
pub mod payment;
pub mod profile;
pub mod schedule;

pub use config::{ConfigError, ConfigStore};
pub use context::{AppContext, ViewState};
pub use error::AppError;
