//! Integration tests for payment receipt submission.
//!
//! These tests require:
//! - A Supabase project with the `tc_payments` table and the `receipts`
//!   storage bucket provisioned
//! - `SUPABASE_URL` and `SUPABASE_ANON_KEY` in the environment
//!
//! Run with: cargo test -p tatame-integration-tests -- --ignored

use serde_json::Value;

use tatame_app::models::PAYMENTS_TABLE;
use tatame_app::payment::{PIX_KEY, ReceiptFile, submit_receipt};
use tatame_integration_tests::fresh_identity;

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_submitted_receipt_creates_pending_payment() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");
    let user_id = context.user_id().expect("signed in");

    let receipt = ReceiptFile::new("comprovante.pdf", b"%PDF-1.4 test".to_vec())
        .expect("non-empty file");
    let url = submit_receipt(client, user_id, receipt)
        .await
        .expect("submission failed");
    assert!(url.contains("/storage/v1/object/public/receipts/"));
    assert!(url.contains(&user_id.to_string()));
    assert!(url.ends_with(".pdf"));

    let rows: Vec<Value> = client
        .table(PAYMENTS_TABLE)
        .select()
        .eq("user_id", user_id)
        .list()
        .await
        .expect("payments listing failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "pending");
    assert_eq!(rows[0]["method"], "pix");
    assert_eq!(rows[0]["pix_key"], PIX_KEY);
    assert_eq!(rows[0]["receipt_url"], url.as_str());
}

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_each_submission_gets_its_own_path() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");
    let user_id = context.user_id().expect("signed in");

    let first = submit_receipt(
        client,
        user_id,
        ReceiptFile::new("junho.png", vec![1, 2, 3]).expect("non-empty file"),
    )
    .await
    .expect("first submission failed");
    let second = submit_receipt(
        client,
        user_id,
        ReceiptFile::new("julho.png", vec![4, 5, 6]).expect("non-empty file"),
    )
    .await
    .expect("second submission failed");

    // Receipts are append-only: a later upload never replaces an earlier one.
    assert_ne!(first, second);

    let rows: Vec<Value> = client
        .table(PAYMENTS_TABLE)
        .select()
        .eq("user_id", user_id)
        .list()
        .await
        .expect("payments listing failed");
    assert_eq!(rows.len(), 2);
}
