//! Document record storage
//!
//! A [`DocumentRecord`] is built in full at ingest time and then only ever
//! read. Stores hand records out behind [`Arc`], so concurrent readers share
//! one immutable copy and a later insert never disturbs them.
//!
//! # Storage Model
//!
//! Each record consists of:
//! - Segments: the chunked text, each paired with its term vector
//! - Vocabulary: the basis every vector in the record was built against
//!
//! # Usage
//!
//! ```ignore
//! use askdoc_lib::store::{DocumentStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let record = store.insert(record)?;
//! let found = store.get(&record.id)?;
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chunk::Segment;
use crate::embed::{TermVector, Vocabulary};
use crate::Result;

/// A segment together with its term vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedSegment {
    pub segment: Segment,
    pub vector: TermVector,
}

/// Everything retained about one ingested document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Lookup key, unique for the life of the store
    pub id: String,
    /// Indexed segments in document order
    pub segments: Vec<IndexedSegment>,
    /// Shared basis for every segment and query vector of this document
    pub vocabulary: Vocabulary,
    pub total_segments: usize,
    pub page_count: usize,
}

impl DocumentRecord {
    /// Check that every vector has one entry per vocabulary term.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.total_segments == self.segments.len()
            && self
                .segments
                .iter()
                .all(|s| s.vector.len() == self.vocabulary.len())
    }
}

/// Trait for document record backends
///
/// Implementations only need insert and lookup; records are never updated or
/// removed through this interface.
pub trait DocumentStore: Send + Sync {
    /// Register a fully built record.
    ///
    /// Fails with [`Error::Store`](crate::Error::Store) if the id is taken.
    fn insert(&self, record: DocumentRecord) -> Result<Arc<DocumentRecord>>;

    /// Look up a record by id
    fn get(&self, id: &str) -> Option<Arc<DocumentRecord>>;

    /// Get total number of stored records
    fn len(&self) -> usize;

    /// Check if store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

mod ids;
mod memory;

pub use ids::*;
pub use memory::*;
