//! Document chunking
//!
//! Extracted text is split into bounded, overlapping segments that act as the
//! retrieval unit. Segments are numbered from 0 in emission order and never
//! change once produced.
//!
//! # Implementing a Chunker
//!
//! ```ignore
//! use askdoc_lib::chunk::{Chunker, Segment};
//!
//! struct MyChunker { /* ... */ }
//!
//! impl Chunker for MyChunker {
//!     fn chunk(&self, content: &str) -> Vec<Segment> {
//!         // Your chunking logic here
//!         todo!()
//!     }
//!
//!     fn name(&self) -> &str {
//!         "mine"
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A bounded span of document text
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Segment {
    /// Position in the document's segment sequence (0-indexed, contiguous)
    pub index: usize,
    /// The text content of this segment
    pub text: String,
}

/// Trait for document chunking strategies
pub trait Chunker: Send + Sync {
    /// Split content into segments
    ///
    /// # Returns
    /// Segments in document order with indices `0..n`. Empty or
    /// whitespace-only content yields no segments.
    fn chunk(&self, content: &str) -> Vec<Segment>;

    /// Returns the name of this chunking strategy
    fn name(&self) -> &str;
}

mod paragraph;

pub use paragraph::*;
