//! Payment receipt submission.

use std::path::Path;

use tatame_app::AppContext;
use tatame_app::payment::{PIX_KEY, ReceiptFile, submit_receipt};

use super::CliError;

/// Upload a proof of payment and record the pending payment.
pub async fn send(context: &AppContext, path: &Path) -> Result<(), CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let receipt = ReceiptFile::new(file_name, bytes)?;
    let url = submit_receipt(context.client()?, context.user_id()?, receipt).await?;

    println!("Comprovante enviado ✅ (aguardando aprovação)");
    println!("Chave pix: {PIX_KEY}");
    println!("Recibo: {url}");
    Ok(())
}
