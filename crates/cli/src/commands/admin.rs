//! Schedule management commands.
//!
//! Gating here is presentational: the commands run for any signed-in user,
//! and the backend's row-level security decides whether the writes land.
//!
//! # Usage
//!
//! ```bash
//! tatame admin add --day Segunda --time 07:00 --class Fundamentals
//! tatame admin remove <schedule-id> [--yes]
//! ```

use std::io::{BufRead, Write};

use tatame_app::AppContext;
use tatame_app::schedule::{ScheduleInput, create_schedule, delete_schedule};
use tatame_core::{ScheduleId, Weekday};

use super::CliError;

/// Add a schedule entry.
pub async fn add(
    context: &AppContext,
    day: Weekday,
    time: String,
    class_name: String,
) -> Result<(), CliError> {
    let input = ScheduleInput {
        day,
        time,
        class_name,
    };
    let row = create_schedule(context.client()?, &input).await?;
    println!(
        "Horário adicionado ✅ {} • {} — {}",
        row.day_of_week, row.time, row.class_name
    );
    Ok(())
}

/// Remove a schedule entry after interactive confirmation.
pub async fn remove(
    context: &AppContext,
    schedule_id: ScheduleId,
    yes: bool,
) -> Result<(), CliError> {
    if !yes && !confirm_on_terminal("Excluir este horário? [y/N] ")? {
        println!("Cancelado.");
        return Ok(());
    }

    delete_schedule(context.client()?, schedule_id).await?;
    println!("Horário excluído ✅");
    Ok(())
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no.
fn confirm_on_terminal(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;

    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("Sim"));
        assert!(is_affirmative("YES"));
    }

    #[test]
    fn test_default_is_no() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("maybe"));
    }
}
