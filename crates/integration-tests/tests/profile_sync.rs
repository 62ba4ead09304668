//! Integration tests for sign-in bootstrap and profile persistence.
//!
//! These tests require:
//! - A Supabase project with the `tc_profiles` table and the `avatars`
//!   storage bucket provisioned
//! - Email confirmation disabled, so fresh signups can sign in immediately
//! - `SUPABASE_URL` and `SUPABASE_ANON_KEY` in the environment
//!
//! Run with: cargo test -p tatame-integration-tests -- --ignored

use tatame_app::ViewState;
use tatame_app::models::{PROFILES_TABLE, Profile};
use tatame_app::profile::{AvatarImage, ProfileFields, ensure_profile, load_profile, save_profile};
use tatame_integration_tests::fresh_identity;

// Minimal valid 1x1 PNG.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

// ============================================================================
// Sign-In Bootstrap Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_fresh_identity_gets_one_student_profile() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");
    let user_id = context.user_id().expect("signed in");

    let profile = load_profile(client, user_id)
        .await
        .expect("profile lookup failed")
        .expect("sign-in did not create a profile");
    assert_eq!(profile.user_id, user_id);
    assert!(!profile.role.is_admin());
    assert!(profile.full_name.is_none());

    // A fresh student never sees the admin panel.
    assert_eq!(
        context.view_state(),
        ViewState::Authenticated {
            admin_visible: false
        }
    );
}

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_ensure_profile_is_idempotent() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");
    let user_id = context.user_id().expect("signed in");

    // Sign-in already ran the bootstrap once; run it twice more.
    ensure_profile(client, user_id).await.expect("second ensure");
    ensure_profile(client, user_id).await.expect("third ensure");

    let rows: Vec<Profile> = client
        .table(PROFILES_TABLE)
        .select()
        .eq("user_id", user_id)
        .list()
        .await
        .expect("profile listing failed");
    assert_eq!(rows.len(), 1, "bootstrap must never duplicate the profile");
}

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_second_sign_in_preserves_saved_fields() {
    let (context, email) = fresh_identity().await;
    let client = context.client().expect("configured").clone();
    let user_id = context.user_id().expect("signed in");

    let fields = ProfileFields {
        full_name: "Ana Souza".to_string(),
        phone: "+55 11 90000-0000".to_string(),
        belt: "azul".to_string(),
    };
    save_profile(&client, user_id, fields, None)
        .await
        .expect("profile save failed");

    // Fresh context, same identity.
    let mut second = tatame_app::AppContext::new();
    second
        .configure(&tatame_integration_tests::live_config())
        .expect("configure");
    second
        .sign_in(&email, tatame_integration_tests::TEST_PASSWORD)
        .await
        .expect("second sign-in failed");

    let profile = load_profile(second.client().expect("configured"), user_id)
        .await
        .expect("reload failed")
        .expect("profile vanished");
    assert_eq!(profile.full_name.as_deref(), Some("Ana Souza"));
    assert_eq!(profile.belt.as_deref(), Some("azul"));
}

// ============================================================================
// Avatar Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_avatar_upload_sets_public_url() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");
    let user_id = context.user_id().expect("signed in");

    let fields = ProfileFields {
        full_name: "Ana".to_string(),
        ..ProfileFields::default()
    };
    let avatar = AvatarImage::new("foto.png", TINY_PNG.to_vec());
    let saved = save_profile(client, user_id, fields, Some(avatar))
        .await
        .expect("save with avatar failed")
        .expect("profile missing after save");

    let url = saved.avatar_url.expect("avatar url not recorded");
    assert!(url.contains("/storage/v1/object/public/avatars/"));
    assert!(url.contains(&user_id.to_string()));
}

#[tokio::test]
#[ignore = "requires a live Supabase project"]
async fn test_save_without_avatar_keeps_previous_image() {
    let (context, _email) = fresh_identity().await;
    let client = context.client().expect("configured");
    let user_id = context.user_id().expect("signed in");

    let with_avatar = save_profile(
        client,
        user_id,
        ProfileFields::default(),
        Some(AvatarImage::new("foto.png", TINY_PNG.to_vec())),
    )
    .await
    .expect("save with avatar failed")
    .expect("profile missing");
    let original_url = with_avatar.avatar_url.expect("avatar url not recorded");

    // Edit only the text fields.
    let fields = ProfileFields {
        full_name: "Ana Souza".to_string(),
        phone: String::new(),
        belt: "roxa".to_string(),
    };
    let resaved = save_profile(client, user_id, fields, None)
        .await
        .expect("second save failed")
        .expect("profile missing");

    assert_eq!(resaved.avatar_url.as_deref(), Some(original_url.as_str()));
    assert_eq!(resaved.belt.as_deref(), Some("roxa"));
}
