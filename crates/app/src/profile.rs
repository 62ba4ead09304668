//! Profile synchronizer.
//!
//! Ensures exactly one profile row exists per identity (created lazily on
//! first login with role `student`), and loads/saves its fields and
//! optional avatar image.

use tracing::{debug, instrument};

use tatame_client::SupabaseClient;
use tatame_core::{Role, UserId};

use crate::error::AppError;
use crate::models::{NewProfile, PROFILES_TABLE, Profile, ProfileUpdate};

/// Bucket holding avatar images, one overwritable path per identity.
pub const AVATARS_BUCKET: &str = "avatars";

/// An avatar image picked by the user, not yet uploaded.
#[derive(Debug, Clone)]
pub struct AvatarImage {
    bytes: Vec<u8>,
    extension: String,
}

impl AvatarImage {
    /// Wrap image bytes, deriving the extension from the original file
    /// name (lowercased, defaulting to `png` when absent).
    #[must_use]
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            extension: extension_of(file_name, "png"),
        }
    }

    /// The storage path for this identity's avatar. Deterministic in the
    /// identity id, so a new upload replaces the previous one in place.
    #[must_use]
    pub fn storage_path(&self, user_id: UserId) -> String {
        format!("{user_id}/avatar.{}", self.extension)
    }

    fn content_type(&self) -> &'static str {
        match self.extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "image/png",
        }
    }
}

/// Derive a lowercase file extension, falling back when there is none.
pub(crate) fn extension_of(file_name: &str, fallback: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map_or_else(|| fallback.to_string(), str::to_lowercase)
}

/// Editable profile fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub full_name: String,
    pub phone: String,
    pub belt: String,
}

/// Create the profile row for an identity if it does not exist yet.
///
/// Safe to call on every login: a pre-existing row is left untouched (this
/// is select-then-insert, deliberately not an upsert, so nothing is ever
/// overwritten).
///
/// # Errors
///
/// Returns an error if the lookup or insert fails; callers treat this as
/// non-fatal for the login itself.
#[instrument(skip(client), fields(user_id = %user_id))]
pub async fn ensure_profile(client: &SupabaseClient, user_id: UserId) -> Result<(), AppError> {
    let existing: Option<Profile> = client
        .table(PROFILES_TABLE)
        .select()
        .eq("user_id", user_id)
        .maybe_single()
        .await?;

    if existing.is_none() {
        client
            .table(PROFILES_TABLE)
            .insert(&NewProfile {
                user_id,
                role: Role::Student,
            })
            .await?;
        debug!(%user_id, "created default profile");
    }

    Ok(())
}

/// Fetch the profile for an identity.
///
/// # Errors
///
/// Returns an error if the remote lookup fails; callers that are refreshing
/// a screen treat that as a no-op and keep prior state.
#[instrument(skip(client), fields(user_id = %user_id))]
pub async fn load_profile(
    client: &SupabaseClient,
    user_id: UserId,
) -> Result<Option<Profile>, AppError> {
    Ok(client
        .table(PROFILES_TABLE)
        .select()
        .eq("user_id", user_id)
        .maybe_single()
        .await?)
}

/// Save profile fields, uploading a new avatar first when one was picked.
///
/// The avatar upload targets a path deterministic in the identity id and
/// replaces any prior image in place; its public URL is attached to the
/// update payload. Without an image the avatar field is omitted entirely -
/// never nulled - so the stored URL survives. Any failure aborts the whole
/// gesture; on success the profile is re-read so the caller reflects
/// server-computed values.
///
/// # Errors
///
/// Returns an error if the upload or the row update fails. An upload
/// failure leaves the profile row untouched.
#[instrument(skip(client, fields, avatar), fields(user_id = %user_id))]
pub async fn save_profile(
    client: &SupabaseClient,
    user_id: UserId,
    fields: ProfileFields,
    avatar: Option<AvatarImage>,
) -> Result<Option<Profile>, AppError> {
    let mut avatar_url = None;

    if let Some(image) = avatar {
        let path = image.storage_path(user_id);
        let bucket = client.bucket(AVATARS_BUCKET);
        bucket
            .upload(&path, image.bytes.clone(), image.content_type(), true)
            .await?;
        avatar_url = Some(bucket.public_url(&path)?.to_string());
        debug!(%user_id, path, "avatar replaced");
    }

    let update = ProfileUpdate {
        full_name: fields.full_name.trim().to_string(),
        phone: fields.phone.trim().to_string(),
        belt: fields.belt.trim().to_string(),
        avatar_url,
    };

    client
        .table(PROFILES_TABLE)
        .update(&update)?
        .eq("user_id", user_id)
        .execute()
        .await?;

    load_profile(client, user_id).await
}
