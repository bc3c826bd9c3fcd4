use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::embed::{TermVector, Vectorizer, Vocabulary};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern compiles"));

/// Bag-of-words vectorizer.
///
/// Terms are maximal runs of word characters (letters, digits, underscore)
/// taken after lower-casing. The vocabulary keeps terms in order of first
/// occurrence and stops at `max_terms`.
#[derive(Debug, Clone)]
pub struct BagOfWords {
    max_terms: usize,
}

impl BagOfWords {
    #[must_use]
    pub fn new(max_terms: usize) -> Self {
        Self { max_terms }
    }

    #[must_use]
    pub fn max_terms(&self) -> usize {
        self.max_terms
    }
}

impl Default for BagOfWords {
    fn default() -> Self {
        Self::new(500)
    }
}

impl Vectorizer for BagOfWords {
    fn name(&self) -> &str {
        "bag-of-words"
    }

    fn build_vocabulary(&self, texts: &[&str]) -> Vocabulary {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();

        'texts: for text in texts {
            for token in tokenize(text) {
                if terms.len() == self.max_terms {
                    break 'texts;
                }
                if seen.insert(token.clone()) {
                    terms.push(token);
                }
            }
        }

        Vocabulary::from(terms)
    }

    fn vectorize(&self, text: &str, vocabulary: &Vocabulary) -> TermVector {
        let mut vector = vec![0.0; vocabulary.len()];
        for token in tokenize(text) {
            if let Some(i) = vocabulary.position(&token) {
                vector[i] += 1.0;
            }
        }
        vector
    }
}

/// Lower-case `text` and split it into word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
