use async_trait::async_trait;

use crate::extract::{ExtractedText, TextExtractor};
use crate::{Error, Result};

/// UTF-8 text. Form feeds mark page breaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedText> {
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Extraction(format!("not valid UTF-8 text: {e}")))?;
        let page_count = text.matches('\u{c}').count() + 1;
        Ok(ExtractedText { text, page_count })
    }

    fn name(&self) -> &str {
        "plain"
    }
}
