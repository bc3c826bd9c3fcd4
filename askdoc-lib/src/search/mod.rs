//! Similarity ranking
//!
//! Segments are scored against a query vector with cosine similarity and
//! returned best first. Vectors with zero norm score `0.0`, so a query that
//! shares no terms with the document still ranks deterministically.
//!
//! # Usage
//!
//! ```ignore
//! use askdoc_lib::search::rank;
//!
//! let query = vectorizer.vectorize("Who won the 2023 Ashes?", &record.vocabulary);
//! let results = rank(&query, &record.segments, 3);
//! ```

use tracing::trace;

use crate::embed::TermVector;
use crate::store::IndexedSegment;

/// A ranked segment with its similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The matched segment
    pub segment: IndexedSegment,
    /// Cosine similarity with the query, in [-1, 1]
    pub score: f32,
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 means identical direction, or `0.0`
/// when either vector has zero norm.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Rank `candidates` against `query` and keep the best `k`.
///
/// Sorting is stable: equal scores keep the candidates' original order.
#[must_use]
pub fn rank(query: &TermVector, candidates: &[IndexedSegment], k: usize) -> Vec<SearchResult> {
    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (i, cosine_similarity(query, &c.vector)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(k)
        .map(|(i, score)| {
            trace!(segment = candidates[i].segment.index, score, "ranked segment");
            SearchResult {
                segment: candidates[i].clone(),
                score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Segment;

    fn make_segment(index: usize, vector: Vec<f32>) -> IndexedSegment {
        IndexedSegment {
            segment: Segment {
                index,
                text: format!("segment {index}"),
            },
            vector,
        }
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![3.0, 1.0, 2.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        let zero = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&zero, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_rank_returns_sorted() {
        let candidates = vec![
            make_segment(0, vec![0.0, 1.0, 0.0]), // orthogonal to query
            make_segment(1, vec![1.0, 0.0, 0.0]), // identical to query
            make_segment(2, vec![1.0, 1.0, 0.0]), // somewhat similar
        ];

        let results = rank(&vec![1.0, 0.0, 0.0], &candidates, 3);

        let order: Vec<usize> = results.iter().map(|r| r.segment.segment.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_rank_ties_keep_original_order() {
        let candidates = vec![make_segment(0, vec![2.0, 0.0]), make_segment(1, vec![1.0, 0.0])];

        let results = rank(&vec![1.0, 0.0], &candidates, 2);

        assert_eq!(results[0].segment.segment.index, 0);
        assert_eq!(results[1].segment.segment.index, 1);
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_rank_zero_query_keeps_order() {
        let candidates = vec![
            make_segment(0, vec![0.0, 1.0]),
            make_segment(1, vec![1.0, 0.0]),
            make_segment(2, vec![1.0, 1.0]),
        ];

        let results = rank(&vec![0.0, 0.0], &candidates, 3);

        assert!(results.iter().all(|r| r.score == 0.0));
        let order: Vec<usize> = results.iter().map(|r| r.segment.segment.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_rank_respects_k() {
        let candidates = vec![
            make_segment(0, vec![1.0, 0.0]),
            make_segment(1, vec![0.9, 0.1]),
            make_segment(2, vec![0.8, 0.2]),
        ];

        assert_eq!(rank(&vec![1.0, 0.0], &candidates, 2).len(), 2);
        assert_eq!(rank(&vec![1.0, 0.0], &candidates, 100).len(), 3);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(&vec![1.0], &[], 5).is_empty());
    }
}
