//! askdoc - minimal retrieval-augmented question answering over one document
//!
//! # Architecture
//!
//! ```text
//! Bytes -> Extractor -> Chunker -> Vectorizer -> DocumentStore
//!                                                     |
//! Question -> Vectorizer -> rank <--------------------+
//!                             |
//!                       AnswerComposer -> Completer -> answer
//! ```
//!
//! # Example
//!
//! ```ignore
//! use askdoc_lib::{config::RagConfig, index::DocumentIndex};
//!
//! let index = DocumentIndex::from_config(&RagConfig::default());
//!
//! // Index a document
//! let record = index.ingest(&text, 1)?;
//!
//! // Search
//! let results = index.retrieve(&record, "Who won the match?", 3);
//! ```

pub mod answer;
pub mod chunk;
pub mod config;
pub mod embed;
pub mod error;
pub mod extract;
pub mod index;
pub mod search;
pub mod service;
pub mod store;

pub use error::{Error, Result};
