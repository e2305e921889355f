//! Text extraction: turns an uploaded document into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so handlers never depend on the
//! PDF library directly.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("document contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: Bytes) -> Result<String, ExtractionError>;
}

/// PDF extractor backed by `pdf-extract`. Parsing is CPU-bound and runs on the
/// blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: Bytes) -> Result<String, ExtractionError> {
        let size = data.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await?
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        debug!(bytes = size, chars = text.chars().count(), "Extracted PDF text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pdf_extractor_rejects_non_pdf_bytes() {
        let result = PdfTextExtractor
            .extract(Bytes::from_static(b"definitely not a pdf"))
            .await;
        assert!(result.is_err());
    }
}
