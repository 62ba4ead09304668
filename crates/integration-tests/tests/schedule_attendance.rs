//! Integration tests for schedule management and attendance confirmation.
//!
//! These tests require:
//! - A Supabase project with the `tc_schedules` and `tc_attendance` tables
//!   provisioned, writable by authenticated users (the test project relaxes
//!   the admin-only policy so a throwaway student can create slots)
//! - `SUPABASE_URL` and `SUPABASE_ANON_KEY` in the environment
//!
//! Run with: cargo test -p tatame-integration-tests -- --ignored

use serde_json::Value;
use uuid::Uuid;

use tatame_app::models::{ATTENDANCE_TABLE, ScheduleEntry};
use tatame_app::schedule::{
    ScheduleInput, confirm_attendance, create_schedule, delete_schedule, list_schedules,
};
use tatame_core::Weekday;
use tatame_integration_tests::fresh_identity;

/// A class label unique to one test run, so assertions only see rows this
/// test created even on a shared project.
fn unique_class(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

async fn find_by_class(
    client: &tatame_client::SupabaseClient,
    class_name: &str,
) -> Option<ScheduleEntry> {
    list_schedules(client)
        .await
        .expect("listing failed")
        .into_iter()
        .find(|entry| entry.class_name == class_name)
}

// ============================================================================
// Schedule Ordering Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_listing_orders_week_then_time_regardless_of_insertion() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");

    // Insert out of order: a late-week early slot first, then an
    // early-week later slot.
    let terca = unique_class("kids");
    let segunda = unique_class("fundamentals");
    create_schedule(
        client,
        &ScheduleInput {
            day: Weekday::Terca,
            time: "06:00".to_string(),
            class_name: terca.clone(),
        },
    )
    .await
    .expect("create failed");
    create_schedule(
        client,
        &ScheduleInput {
            day: Weekday::Segunda,
            time: "07:00".to_string(),
            class_name: segunda.clone(),
        },
    )
    .await
    .expect("create failed");

    let listing = list_schedules(client).await.expect("listing failed");
    let pos = |name: &str| {
        listing
            .iter()
            .position(|e| e.class_name == name)
            .expect("created row missing from listing")
    };
    assert!(
        pos(&segunda) < pos(&terca),
        "Segunda 07:00 must sort before Terça 06:00"
    );

    // Whole listing is monotone in the sort key.
    assert!(listing.windows(2).all(|w| w[0].sort_key <= w[1].sort_key));

    for name in [&segunda, &terca] {
        let entry = find_by_class(client, name).await.expect("row missing");
        delete_schedule(client, entry.id).await.expect("cleanup failed");
    }
}

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_deleted_schedule_leaves_the_listing() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");

    let class_name = unique_class("nogi");
    create_schedule(
        client,
        &ScheduleInput {
            day: Weekday::Sexta,
            time: "18:30".to_string(),
            class_name: class_name.clone(),
        },
    )
    .await
    .expect("create failed");

    let entry = find_by_class(client, &class_name).await.expect("row missing");
    delete_schedule(client, entry.id).await.expect("delete failed");

    assert!(find_by_class(client, &class_name).await.is_none());
}

// ============================================================================
// Attendance Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_reconfirming_attendance_same_day_does_not_duplicate() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");
    let user_id = context.user_id().expect("signed in");

    let class_name = unique_class("open-mat");
    create_schedule(
        client,
        &ScheduleInput {
            day: Weekday::Sabado,
            time: "10:00".to_string(),
            class_name: class_name.clone(),
        },
    )
    .await
    .expect("create failed");
    let entry = find_by_class(client, &class_name).await.expect("row missing");

    let first = confirm_attendance(client, user_id, entry.id)
        .await
        .expect("first confirmation failed");
    let second = confirm_attendance(client, user_id, entry.id)
        .await
        .expect("second confirmation failed");
    assert_eq!(first, second, "both confirmations target today");

    let rows: Vec<Value> = client
        .table(ATTENDANCE_TABLE)
        .select()
        .eq("user_id", user_id)
        .eq("schedule_id", entry.id)
        .list()
        .await
        .expect("attendance listing failed");
    assert_eq!(rows.len(), 1, "same-day reconfirmation must overwrite");
    assert_eq!(rows[0]["present"], Value::Bool(true));

    delete_schedule(client, entry.id).await.expect("cleanup failed");
}
