use anyhow::{Context, Result};
use tracing::warn;

use crate::doc_link::DocumentId;
use crate::services::DocExportService;
use crate::types::AccessToken;

/// Resolves a document URL to its plain-text export, trimmed of surrounding
/// whitespace. Extraction failures never propagate: one unreadable
/// attachment must not abort processing of the rest of an assignment, so
/// every failure degrades to an empty string after logging.
pub async fn extract_document_text(
    docs: &impl DocExportService,
    url: &str,
    token: &AccessToken,
) -> String {
    match try_extract(docs, url, token).await {
        Ok(text) => text,
        Err(err) => {
            warn!(?err, url, "error extracting text from document");
            String::new()
        }
    }
}

async fn try_extract(
    docs: &impl DocExportService,
    url: &str,
    token: &AccessToken,
) -> Result<String> {
    let document = DocumentId::from_url(url).context("invalid document URL")?;
    let text = docs.export_document_text(&document, token).await?;
    Ok(text.trim().to_owned())
}
