//! Ingest and ask operations for a transport layer to call
//!
//! # Usage
//!
//! ```ignore
//! use askdoc_lib::{answer::OpenAiCompleter, config::RagConfig, service::RagService};
//!
//! let completer = OpenAiCompleter::new("https://api.openai.com/v1", "gpt-4o-mini")?;
//! let service = RagService::new(RagConfig::default(), completer)?;
//!
//! let report = service.ingest_document(Some(bytes)).await?;
//! let answer = service.ask_question(Some(&report.document_id), Some("Who won?")).await?;
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::answer::{Answer, AnswerComposer, Completer};
use crate::config::RagConfig;
use crate::extract::{AutoExtractor, TextExtractor};
use crate::index::DocumentIndex;
use crate::store::IdGenerator;
use crate::{Error, Result};

/// Outcome of a successful ingest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub document_id: String,
    pub page_count: usize,
    pub segment_count: usize,
}

/// Extraction, indexing and answering behind two calls.
///
/// All methods take `&self`; wrap the service in an `Arc` to share it
/// between request handlers.
pub struct RagService<P: Completer> {
    config: RagConfig,
    extractor: Box<dyn TextExtractor>,
    index: DocumentIndex,
    composer: AnswerComposer<P>,
}

impl<P: Completer> RagService<P> {
    /// Build a service with in-memory storage and automatic format detection.
    pub fn new(config: RagConfig, completer: P) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: Box::new(AutoExtractor),
            index: DocumentIndex::from_config(&config),
            composer: AnswerComposer::from_config(completer, &config),
            config,
        })
    }

    /// Replace the text extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Replace the document id generator.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.index = self.index.with_ids(ids);
        self
    }

    /// Extract and index a document.
    pub async fn ingest_document(&self, bytes: Option<Vec<u8>>) -> Result<IngestReport> {
        let bytes = bytes.filter(|b| !b.is_empty()).ok_or(Error::NoFileProvided)?;
        let extracted = self.extractor.extract(bytes).await?;
        let record = self.index.ingest(&extracted.text, extracted.page_count)?;

        Ok(IngestReport {
            document_id: record.id.clone(),
            page_count: record.page_count,
            segment_count: record.total_segments,
        })
    }

    /// Answer a question about a previously ingested document.
    ///
    /// Unknown ids fail before the completer is called.
    pub async fn ask_question(
        &self,
        document_id: Option<&str>,
        question: Option<&str>,
    ) -> Result<Answer> {
        let document_id = required(document_id, "document_id")?;
        let question = required(question, "question")?;

        let record = self.index.lookup(document_id)?;
        let results = self.index.retrieve(&record, question, self.config.top_k);
        let answer = self.composer.answer(&results, question).await?;

        info!(
            document = %record.id,
            segments_used = answer.segments_used,
            context_chars = answer.context_chars,
            "answered question"
        );
        Ok(answer)
    }

    /// Render the prompt `ask_question` would send, without sending it.
    pub fn preview_prompt(&self, document_id: &str, question: &str) -> Result<String> {
        let record = self.index.lookup(document_id)?;
        let results = self.index.retrieve(&record, question, self.config.top_k);
        Ok(self.composer.prompt_for(&results, question))
    }

    #[must_use]
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    #[must_use]
    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    #[must_use]
    pub fn completer(&self) -> &P {
        self.composer.completer()
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingInput(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::testing::RecordingCompleter;
    use crate::answer::NO_CONTEXT_ANSWER;
    use crate::store::SequentialIds;

    fn service(fail: bool) -> RagService<RecordingCompleter> {
        let config = RagConfig {
            chunk_size: 20,
            chunk_overlap: 0,
            ..RagConfig::default()
        };
        let completer = RecordingCompleter {
            fail,
            ..Default::default()
        };
        RagService::new(config, completer)
            .unwrap()
            .with_ids(SequentialIds::default())
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let svc = service(false);
        let report = svc
            .ingest_document(Some(b"Cats are mammals.\n\nDogs are mammals too.".to_vec()))
            .await
            .unwrap();
        assert_eq!(report.document_id, "doc-1");
        assert_eq!(report.page_count, 1);
        assert!((1..=2).contains(&report.segment_count));

        let answer = svc
            .ask_question(Some(&report.document_id), Some("What are mammals?"))
            .await
            .unwrap();

        assert!(!answer.answer.is_empty());
        assert!(answer.segments_used >= 1 && answer.segments_used <= 3);

        let prompts = svc.completer().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Cats are mammals."));
        assert!(prompts[0].contains("What are mammals?"));
    }

    #[tokio::test]
    async fn test_unknown_document_never_calls_completer() {
        let svc = service(false);
        let err = svc
            .ask_question(Some("doc-404"), Some("Anyone there?"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DocumentNotFound(_)));
        assert_eq!(svc.completer().calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_inputs() {
        let svc = service(false);

        let err = svc.ask_question(None, Some("q")).await.unwrap_err();
        assert!(matches!(err, Error::MissingInput("document_id")));

        let err = svc.ask_question(Some("doc-1"), Some("   ")).await.unwrap_err();
        assert!(matches!(err, Error::MissingInput("question")));

        let err = svc.ingest_document(None).await.unwrap_err();
        assert!(matches!(err, Error::NoFileProvided));

        let err = svc.ingest_document(Some(Vec::new())).await.unwrap_err();
        assert!(matches!(err, Error::NoFileProvided));
    }

    #[tokio::test]
    async fn test_extraction_error_registers_nothing() {
        let svc = service(false);
        let err = svc.ingest_document(Some(vec![0xff, 0xfe])).await.unwrap_err();

        assert!(matches!(err, Error::Extraction(_)));
        assert!(svc.index().is_empty());
    }

    #[tokio::test]
    async fn test_blank_document_answers_without_context() {
        let svc = service(false);
        let report = svc.ingest_document(Some(b" \n\n \n".to_vec())).await.unwrap();
        assert_eq!(report.segment_count, 0);

        let answer = svc
            .ask_question(Some(&report.document_id), Some("Anything?"))
            .await
            .unwrap();

        assert_eq!(answer.answer, NO_CONTEXT_ANSWER);
        assert_eq!(svc.completer().calls(), 0);
    }

    #[tokio::test]
    async fn test_completion_failure_surfaces() {
        let svc = service(true);
        let report = svc.ingest_document(Some(b"Some text.".to_vec())).await.unwrap();

        let err = svc
            .ask_question(Some(&report.document_id), Some("text?"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Completion(_)));
        assert_eq!(svc.completer().calls(), 1);
    }

    #[tokio::test]
    async fn test_top_k_caps_segments_used() {
        let svc = service(false);
        let text = "one apple here\n\ntwo apple there\n\nthree apple again\n\nfour apple more\n\nfive apple end";
        let report = svc.ingest_document(Some(text.as_bytes().to_vec())).await.unwrap();
        assert_eq!(report.segment_count, 5);

        let answer = svc
            .ask_question(Some(&report.document_id), Some("apple"))
            .await
            .unwrap();
        assert_eq!(answer.segments_used, 3);
    }

    #[test]
    fn test_preview_prompt() {
        let svc = service(false);
        let record = svc.index().ingest("Owls hunt at night.", 1).unwrap();

        let prompt = svc.preview_prompt(&record.id, "When do owls hunt?").unwrap();
        assert!(prompt.contains("Owls hunt at night."));
        assert_eq!(svc.completer().calls(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RagConfig {
            top_k: 0,
            ..RagConfig::default()
        };
        assert!(RagService::new(config, RecordingCompleter::default()).is_err());
    }
}
