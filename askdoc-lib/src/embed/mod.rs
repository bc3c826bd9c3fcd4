//! Lexical vector representation
//!
//! Each document gets a capped vocabulary built once at ingest time. Segment
//! and query vectors are raw term counts against that vocabulary, so every
//! vector of a document has exactly `vocabulary.len()` entries.
//!
//! # Usage
//!
//! ```ignore
//! use askdoc_lib::embed::{BagOfWords, Vectorizer};
//!
//! let vectorizer = BagOfWords::new(500);
//! let vocabulary = vectorizer.build_vocabulary(&["Match report...", "News article..."]);
//!
//! let query_vector = vectorizer.vectorize("Who scored the winning goal?", &vocabulary);
//! assert_eq!(query_vector.len(), vocabulary.len());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-term counts, one entry per vocabulary term
pub type TermVector = Vec<f32>;

/// Ordered, deduplicated list of terms that forms a vector basis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Vocabulary {
    /// Terms in dimension order
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Dimension of the given term, if it is part of the vocabulary
    #[must_use]
    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<Vec<String>> for Vocabulary {
    /// Builds a vocabulary, keeping the first occurrence of repeated terms.
    fn from(terms: Vec<String>) -> Self {
        let mut vocabulary = Self::default();
        for term in terms {
            if !vocabulary.positions.contains_key(&term) {
                vocabulary.positions.insert(term.clone(), vocabulary.terms.len());
                vocabulary.terms.push(term);
            }
        }
        vocabulary
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

/// Trait for turning text into vectors over a document vocabulary
pub trait Vectorizer: Send + Sync {
    /// Build the vocabulary for a document from its segment texts, in order
    fn build_vocabulary(&self, texts: &[&str]) -> Vocabulary;

    /// Vectorize a segment or query against an existing vocabulary.
    ///
    /// Terms outside the vocabulary are ignored.
    fn vectorize(&self, text: &str, vocabulary: &Vocabulary) -> TermVector;

    /// Returns the vectorizer name/identifier
    fn name(&self) -> &str;
}

mod bow;
pub use bow::*;
