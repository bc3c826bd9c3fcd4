//! Per-document index lifecycle
//!
//! [`DocumentIndex`] turns raw text into a [`DocumentRecord`] (chunk, build
//! the vocabulary, vectorize every segment) and registers it under a fresh
//! id. Records are never updated; ingesting the same text twice yields two
//! independent records.

use std::sync::Arc;

use tracing::{debug, info};

use crate::chunk::{Chunker, ParagraphChunker};
use crate::config::RagConfig;
use crate::embed::{BagOfWords, Vectorizer};
use crate::search::{rank, SearchResult};
use crate::store::{
    DocumentRecord, DocumentStore, IdGenerator, IndexedSegment, MemoryStore, UuidGenerator,
};
use crate::{Error, Result};

/// Chunking, vectorization and storage for ingested documents.
pub struct DocumentIndex<
    C: Chunker = ParagraphChunker,
    V: Vectorizer = BagOfWords,
    S: DocumentStore = MemoryStore,
> {
    chunker: C,
    vectorizer: V,
    store: S,
    ids: Box<dyn IdGenerator>,
}

impl DocumentIndex {
    /// Paragraph chunking and bag-of-words vectors sized from `config`, kept
    /// in memory under UUID ids.
    #[must_use]
    pub fn from_config(config: &RagConfig) -> Self {
        Self::new(
            ParagraphChunker::new(config.chunk_size, config.chunk_overlap),
            BagOfWords::new(config.max_vocabulary),
            MemoryStore::new(),
        )
    }
}

impl<C: Chunker, V: Vectorizer, S: DocumentStore> DocumentIndex<C, V, S> {
    /// Create an index that names records with random UUIDs.
    #[must_use]
    pub fn new(chunker: C, vectorizer: V, store: S) -> Self {
        Self {
            chunker,
            vectorizer,
            store,
            ids: Box::new(UuidGenerator),
        }
    }

    /// Replace the id generator.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Index a document's text and register the resulting record.
    ///
    /// Text that yields no segments still produces a record, with an empty
    /// segment list and vocabulary. Nothing is registered if the store
    /// rejects the record.
    pub fn ingest(&self, text: &str, page_count: usize) -> Result<Arc<DocumentRecord>> {
        let segments = self.chunker.chunk(text);

        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        let vocabulary = self.vectorizer.build_vocabulary(&texts);
        debug!(terms = vocabulary.len(), vectorizer = self.vectorizer.name(), "built vocabulary");

        let segments: Vec<IndexedSegment> = segments
            .into_iter()
            .map(|segment| {
                let vector = self.vectorizer.vectorize(&segment.text, &vocabulary);
                IndexedSegment { segment, vector }
            })
            .collect();

        let record = DocumentRecord {
            id: self.ids.next_id(),
            total_segments: segments.len(),
            segments,
            vocabulary,
            page_count,
        };
        let record = self.store.insert(record)?;

        info!(
            document = %record.id,
            segments = record.total_segments,
            pages = record.page_count,
            chunker = self.chunker.name(),
            "ingested document"
        );
        Ok(record)
    }

    /// Fetch a registered record.
    pub fn lookup(&self, id: &str) -> Result<Arc<DocumentRecord>> {
        self.store
            .get(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    /// Rank a record's segments against `question` and keep the best `k`.
    #[must_use]
    pub fn retrieve(&self, record: &DocumentRecord, question: &str, k: usize) -> Vec<SearchResult> {
        let query = self.vectorizer.vectorize(question, &record.vocabulary);
        rank(&query, &record.segments, k)
    }

    /// Returns the number of registered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing has been ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns a reference to the chunker.
    #[must_use]
    pub fn chunker(&self) -> &C {
        &self.chunker
    }

    /// Returns a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
