//! Schedule and attendance manager.
//!
//! Schedules are recurring weekly class slots ordered by a single numeric
//! sort key (week order, then time of day). Attendance is a per-identity,
//! per-schedule, per-calendar-day confirmation: re-confirming on the same
//! day overwrites, a later day creates a new record.

use chrono::{Local, NaiveDate};
use tracing::{debug, instrument};

use tatame_client::SupabaseClient;
use tatame_core::{ClassTime, ScheduleId, SortKey, UserId, Weekday};

use crate::error::AppError;
use crate::models::{
    ATTENDANCE_TABLE, AttendanceUpsert, NewSchedule, SCHEDULES_TABLE, ScheduleEntry,
};

/// Conflict target that makes attendance idempotent per calendar day.
const ATTENDANCE_CONFLICT: &str = "user_id,schedule_id,date";

/// User input for a new schedule entry, before validation.
#[derive(Debug, Clone)]
pub struct ScheduleInput {
    pub day: Weekday,
    pub time: String,
    pub class_name: String,
}

impl ScheduleInput {
    /// Presence-check and parse the input, computing the sort key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the time or class label is
    /// missing or the time is not `HH:MM`; no remote call happens in that
    /// case.
    pub fn validate(&self) -> Result<NewSchedule, AppError> {
        let class_name = self.class_name.trim();
        if self.time.trim().is_empty() || class_name.is_empty() {
            return Err(AppError::Validation("Preencha hora e turma.".to_string()));
        }

        let time = ClassTime::parse(&self.time)
            .map_err(|err| AppError::Validation(err.to_string()))?;

        Ok(NewSchedule {
            day_of_week: self.day,
            time: time.to_string(),
            class_name: class_name.to_string(),
            sort_key: SortKey::compute(self.day, time),
        })
    }
}

/// Fetch all schedule entries ordered week-then-time.
///
/// An empty list and a fetch error are distinct outcomes; both reach the
/// caller as-is.
///
/// # Errors
///
/// Returns the backend's message verbatim on failure.
#[instrument(skip(client))]
pub async fn list_schedules(client: &SupabaseClient) -> Result<Vec<ScheduleEntry>, AppError> {
    Ok(client
        .table(SCHEDULES_TABLE)
        .select()
        .order("sort_key", true)
        .list()
        .await?)
}

/// Create one schedule entry (admin gesture).
///
/// # Errors
///
/// Returns a validation error before any remote call when required fields
/// are missing, otherwise the backend's message verbatim on failure.
#[instrument(skip(client, input))]
pub async fn create_schedule(
    client: &SupabaseClient,
    input: &ScheduleInput,
) -> Result<NewSchedule, AppError> {
    let row = input.validate()?;
    client.table(SCHEDULES_TABLE).insert(&row).await?;
    debug!(day = %row.day_of_week, time = %row.time, "schedule created");
    Ok(row)
}

/// Delete one schedule entry by id (admin gesture).
///
/// Interactive confirmation is the front end's job. Dependent attendance
/// records are left to the backend's own rules; this client never cascades.
///
/// # Errors
///
/// Returns the backend's message verbatim on failure.
#[instrument(skip(client), fields(id = %id))]
pub async fn delete_schedule(client: &SupabaseClient, id: ScheduleId) -> Result<(), AppError> {
    client
        .table(SCHEDULES_TABLE)
        .delete()
        .eq("id", id)
        .execute()
        .await?;
    Ok(())
}

/// Confirm attendance for today.
///
/// Upserts on `(user_id, schedule_id, date)` with presence set, so a second
/// confirmation on the same calendar day is a state-wise no-op while a
/// later day creates a new record. Returns the date that was confirmed.
///
/// # Errors
///
/// Returns the backend's message verbatim on failure.
#[instrument(skip(client), fields(user_id = %user_id, schedule_id = %schedule_id))]
pub async fn confirm_attendance(
    client: &SupabaseClient,
    user_id: UserId,
    schedule_id: ScheduleId,
) -> Result<NaiveDate, AppError> {
    let date = today();
    client
        .table(ATTENDANCE_TABLE)
        .upsert(
            &AttendanceUpsert {
                user_id,
                schedule_id,
                date,
                present: true,
            },
            ATTENDANCE_CONFLICT,
        )
        .await?;
    debug!(%user_id, %schedule_id, %date, "attendance confirmed");
    Ok(date)
}

/// "Today" as the client's local calendar date.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(day: Weekday, time: &str, class_name: &str) -> ScheduleInput {
        ScheduleInput {
            day,
            time: time.to_string(),
            class_name: class_name.to_string(),
        }
    }

    #[test]
    fn test_validate_computes_sort_key() {
        let row = input(Weekday::Segunda, "07:00", "Fundamentals")
            .validate()
            .unwrap();
        assert_eq!(row.sort_key.as_u32(), 700);
        assert_eq!(row.time, "07:00");
        assert_eq!(row.class_name, "Fundamentals");
    }

    #[test]
    fn test_validate_week_then_time_order() {
        // Segunda 07:00 sorts before Terça 06:00 regardless of time.
        let segunda = input(Weekday::Segunda, "07:00", "Fundamentals")
            .validate()
            .unwrap();
        let terca = input(Weekday::Terca, "06:00", "Kids").validate().unwrap();
        assert!(segunda.sort_key < terca.sort_key);
    }

    #[test]
    fn test_validate_rejects_empty_time() {
        let err = input(Weekday::Quarta, "  ", "Kids").validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Preencha hora e turma.");
    }

    #[test]
    fn test_validate_rejects_empty_class() {
        let err = input(Weekday::Quarta, "19:00", "").validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_malformed_time() {
        let err = input(Weekday::Quarta, "7pm", "Kids").validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_trims_class_name() {
        let row = input(Weekday::Sexta, "18:30", "  No-Gi  ").validate().unwrap();
        assert_eq!(row.class_name, "No-Gi");
    }
}
