//! Storage blob surface.
//!
//! Buckets hold avatars (overwritable, one path per user) and receipts
//! (append-only, one path per submission). Public URLs are derived locally,
//! exactly like supabase-js `getPublicUrl` - no request is made.

use tracing::instrument;
use url::Url;

use crate::{ClientError, SupabaseClient};

/// Blob operations on one storage bucket.
pub struct BucketClient {
    client: SupabaseClient,
    name: String,
}

impl BucketClient {
    pub(crate) fn new(client: SupabaseClient, name: &str) -> Self {
        Self {
            client,
            name: name.to_string(),
        }
    }

    /// Upload a blob.
    ///
    /// With `overwrite` set, an existing blob at the same path is replaced
    /// in place (`x-upsert`); without it the service rejects a duplicate
    /// path, which is what keeps receipts append-only.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure.
    #[instrument(skip(self, bytes), fields(bucket = %self.name, path = %path, size = bytes.len()))]
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<(), ClientError> {
        let url = self
            .client
            .endpoint(&format!("storage/v1/object/{}/{path}", self.name))?;

        let response = self
            .client
            .authorize(self.client.http().post(url))
            .header("Content-Type", content_type)
            .header("x-upsert", if overwrite { "true" } else { "false" })
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_response(status.as_u16(), &body))
    }

    /// The public URL for a blob path.
    ///
    /// Purely derived from the project endpoint; whether the URL actually
    /// resolves depends on the bucket being public.
    ///
    /// # Errors
    ///
    /// Returns an error if the path produces an invalid URL.
    pub fn public_url(&self, path: &str) -> Result<Url, ClientError> {
        self.client
            .endpoint(&format!("storage/v1/object/public/{}/{path}", self.name))
    }
}
