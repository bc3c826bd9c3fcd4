//! Source document to text
//!
//! Extractors run before chunking and report how many pages the source had.
//! [`AutoExtractor`] picks PDF or plain text from the leading bytes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Text pulled out of a source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Trait for turning document bytes into text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text, failing with [`Error::Extraction`](crate::Error::Extraction)
    /// on malformed input.
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedText>;

    /// Returns the name of this extractor
    fn name(&self) -> &str;
}

/// Dispatches on the `%PDF-` magic number
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoExtractor;

#[async_trait]
impl TextExtractor for AutoExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedText> {
        if PdfExtractor::sniff(&bytes) {
            PdfExtractor.extract(bytes).await
        } else {
            PlainTextExtractor.extract(bytes).await
        }
    }

    fn name(&self) -> &str {
        "auto"
    }
}

mod pdf;
mod plain;

pub use pdf::*;
pub use plain::*;
