//! Wire types for the backend tables.
//!
//! These are transient, non-authoritative copies; the backend owns every
//! entity. Field names match the deployed table columns so the client stays
//! wire compatible with existing data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tatame_core::{
    PaymentMethod, PaymentStatus, Role, ScheduleId, SortKey, UserId, Weekday,
};

/// Profiles table, keyed one-to-one by identity id.
pub const PROFILES_TABLE: &str = "tc_profiles";
/// Weekly class slots.
pub const SCHEDULES_TABLE: &str = "tc_schedules";
/// Per-user, per-schedule, per-day confirmations.
pub const ATTENDANCE_TABLE: &str = "tc_attendance";
/// Submitted proofs of payment.
pub const PAYMENTS_TABLE: &str = "tc_payments";

/// A per-identity profile row.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub belt: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub role: Role,
}

/// Insert payload for the lazily created default profile.
#[derive(Debug, Serialize)]
pub struct NewProfile {
    pub user_id: UserId,
    pub role: Role,
}

/// Update payload for a profile save.
///
/// The avatar field is attached only when a new image was uploaded in the
/// same gesture; it is omitted - never nulled - otherwise, so a failed or
/// absent upload leaves the previous avatar in place.
#[derive(Debug, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: String,
    pub belt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A weekly class slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEntry {
    pub id: ScheduleId,
    pub day_of_week: Weekday,
    pub time: String,
    pub class_name: String,
    pub sort_key: SortKey,
}

/// Insert payload for a new schedule entry. The id is issued by the backend.
#[derive(Debug, Serialize)]
pub struct NewSchedule {
    pub day_of_week: Weekday,
    pub time: String,
    pub class_name: String,
    pub sort_key: SortKey,
}

/// Upsert payload for an attendance confirmation.
///
/// The conflict target `(user_id, schedule_id, date)` makes re-confirmation
/// on the same calendar day overwrite instead of duplicate.
#[derive(Debug, Serialize)]
pub struct AttendanceUpsert {
    pub user_id: UserId,
    pub schedule_id: ScheduleId,
    pub date: NaiveDate,
    pub present: bool,
}

/// Insert payload for a submitted payment.
#[derive(Debug, Serialize)]
pub struct NewPayment {
    pub user_id: UserId,
    pub method: PaymentMethod,
    pub pix_key: String,
    pub receipt_url: String,
    pub status: PaymentStatus,
}
