//! Tatame Core - Shared domain types.
//!
//! This crate provides common types used across all Tatame components:
//! - `client` - Typed client for the remote Supabase backend
//! - `app` - Application core (session state machine and operations)
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, validated emails, weekday/time/sort-key types,
//!   role and payment enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
