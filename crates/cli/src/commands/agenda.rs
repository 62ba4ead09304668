//! Schedule listing and attendance confirmation.

use tatame_app::AppContext;
use tatame_app::schedule::{confirm_attendance, list_schedules};
use tatame_core::ScheduleId;

use super::CliError;

/// List the weekly schedule in week-then-time order.
///
/// An empty list and a fetch error are distinct: the former prints a
/// friendly line, the latter propagates the backend's message.
pub async fn list(context: &AppContext) -> Result<(), CliError> {
    let schedules = list_schedules(context.client()?).await?;

    if schedules.is_empty() {
        println!("Nenhum horário cadastrado ainda.");
        return Ok(());
    }

    for entry in schedules {
        println!(
            "{}  {} • {} — {}",
            entry.id, entry.day_of_week, entry.time, entry.class_name
        );
    }
    Ok(())
}

/// Confirm attendance for today on one schedule entry.
pub async fn confirm(context: &AppContext, schedule_id: ScheduleId) -> Result<(), CliError> {
    let date = confirm_attendance(context.client()?, context.user_id()?, schedule_id).await?;
    println!("Presença confirmada ✅ ({date})");
    Ok(())
}
