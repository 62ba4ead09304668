//! Payment receipt submitter.
//!
//! Uploads a proof-of-payment file to a unique path (never overwritten,
//! unlike avatars) and inserts one pending payment record referencing it.
//! Status transitions after `pending` belong to an administrative process
//! outside this client.

use chrono::Utc;
use tracing::{instrument, warn};

use tatame_client::SupabaseClient;
use tatame_core::{PaymentMethod, PaymentStatus, UserId};

use crate::error::AppError;
use crate::models::{NewPayment, PAYMENTS_TABLE};
use crate::profile::extension_of;

/// Bucket holding submitted receipts, append-only.
pub const RECEIPTS_BUCKET: &str = "receipts";

/// The academy's payment target, printed next to the upload affordance.
pub const PIX_KEY: &str = "financeiro@tatame.app";

/// A receipt file picked by the user, not yet uploaded.
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    bytes: Vec<u8>,
    extension: String,
}

impl ReceiptFile {
    /// Wrap receipt bytes, deriving the extension from the original file
    /// name (lowercased, defaulting to `bin`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the file is empty - that is
    /// "no file selected", and no remote call may happen.
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Result<Self, AppError> {
        if bytes.is_empty() {
            return Err(AppError::Validation(
                "Selecione o comprovante.".to_string(),
            ));
        }
        Ok(Self {
            bytes,
            extension: extension_of(file_name, "bin"),
        })
    }

    /// A unique storage path: identity id plus submission timestamp, so no
    /// earlier receipt is ever overwritten.
    fn storage_path(&self, user_id: UserId, timestamp_millis: i64) -> String {
        format!("{user_id}/{timestamp_millis}.{}", self.extension)
    }

    fn content_type(&self) -> &'static str {
        match self.extension.as_str() {
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

/// Upload a receipt and record the pending payment.
///
/// The upload runs first with overwrite disabled; if it fails, nothing is
/// inserted. If the insert then fails, the uploaded blob has no record
/// pointing at it - the path is logged so an operator can reconcile.
/// Returns the receipt's public URL.
///
/// # Errors
///
/// Returns a validation error for an empty file (no remote call),
/// otherwise the backend's message verbatim from whichever step failed.
#[instrument(skip(client, receipt), fields(user_id = %user_id))]
pub async fn submit_receipt(
    client: &SupabaseClient,
    user_id: UserId,
    receipt: ReceiptFile,
) -> Result<String, AppError> {
    let path = receipt.storage_path(user_id, Utc::now().timestamp_millis());
    let bucket = client.bucket(RECEIPTS_BUCKET);

    bucket
        .upload(&path, receipt.bytes.clone(), receipt.content_type(), false)
        .await?;
    let receipt_url = bucket.public_url(&path)?.to_string();

    let insert = client
        .table(PAYMENTS_TABLE)
        .insert(&NewPayment {
            user_id,
            method: PaymentMethod::Pix,
            pix_key: PIX_KEY.to_string(),
            receipt_url: receipt_url.clone(),
            status: PaymentStatus::Pending,
        })
        .await;

    if let Err(err) = insert {
        warn!(%user_id, path, error = %err, "receipt uploaded but payment record insert failed");
        return Err(err.into());
    }

    Ok(receipt_url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new(uuid::Uuid::nil())
    }

    #[test]
    fn test_empty_file_is_rejected_before_any_remote_call() {
        let err = ReceiptFile::new("comprovante.pdf", vec![]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Selecione o comprovante.");
    }

    #[test]
    fn test_storage_path_is_unique_per_timestamp() {
        let receipt = ReceiptFile::new("comprovante.pdf", vec![1]).unwrap();
        let first = receipt.storage_path(user(), 1_700_000_000_000);
        let second = receipt.storage_path(user(), 1_700_000_000_001);
        assert_ne!(first, second);
        assert_eq!(
            first,
            "00000000-0000-0000-0000-000000000000/1700000000000.pdf"
        );
    }

    #[test]
    fn test_extension_defaults_to_bin() {
        let receipt = ReceiptFile::new("comprovante", vec![1]).unwrap();
        assert!(
            receipt
                .storage_path(user(), 1)
                .ends_with(".bin")
        );
        assert_eq!(receipt.content_type(), "application/octet-stream");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            ReceiptFile::new("a.PDF", vec![1]).unwrap().content_type(),
            "application/pdf"
        );
        assert_eq!(
            ReceiptFile::new("a.jpeg", vec![1]).unwrap().content_type(),
            "image/jpeg"
        );
    }
}
