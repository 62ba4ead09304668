//! Core types for Tatame.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod class_time;
pub mod email;
pub mod id;
pub mod role;
pub mod sort_key;
pub mod weekday;

pub use class_time::{ClassTime, ClassTimeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use role::{PaymentMethod, PaymentStatus, Role};
pub use sort_key::SortKey;
pub use weekday::{Weekday, WeekdayError};
