use async_trait::async_trait;
use tracing::debug;

use crate::extract::{ExtractedText, TextExtractor};
use crate::{Error, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// PDF text extraction via `pdf-extract`.
///
/// Parsing runs on the blocking pool. Pages are joined with a blank line so
/// page boundaries also act as paragraph boundaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Whether `bytes` start like a PDF file
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> bool {
        bytes.starts_with(PDF_MAGIC)
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedText> {
        // a panic inside the parser comes back as a JoinError
        let pages =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
                .await
                .map_err(|e| Error::Extraction(format!("PDF parser aborted: {e}")))?
                .map_err(|e| Error::Extraction(format!("PDF extraction error: {e}")))?;

        debug!(pages = pages.len(), "extracted PDF text");
        Ok(ExtractedText {
            page_count: pages.len(),
            text: pages.join("\n\n"),
        })
    }

    fn name(&self) -> &str {
        "pdf"
    }
}
