//! In-memory vector store
//!
//! Holds one corpus of L2-normalized embeddings and answers similarity
//! searches over it:
//!
//! 1. Normalize the query
//! 2. O(n) dot-product scan in load order
//! 3. Candidate set = chunks clearing the similarity floor, with a
//!    top-(3 x top_k) fallback when nothing clears it
//! 4. MMR selection balancing relevance against redundancy
//! 5. Output re-sorted by raw relevance (not MMR pick order)
//!
//! The store is read-only after load; searches allocate their own scratch
//! state, so concurrent searches over one loaded store are safe.
//!
//! Corpora are assumed small (low thousands of chunks); no ANN structure is
//! used at this scale.

use crate::distance::{dot_product, normalized};
use crate::mmr;
use quarry_core::error::{Error, Result};
use quarry_core::search_types::{SearchHit, SearchOptions};
use quarry_core::types::{Chunk, Corpus};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Fallback width multiplier when no candidate clears the similarity floor
const FALLBACK_FACTOR: usize = 3;

/// In-memory vector store over one corpus
///
/// Owns normalized copies of the corpus embeddings; caller-supplied data is
/// never mutated in place.
#[derive(Debug, Default)]
pub struct VectorStore {
    dims: usize,
    chunks: Vec<Chunk>,
    by_id: HashMap<String, usize>,
}

impl VectorStore {
    /// Create an empty, unloaded store
    pub fn new() -> Self {
        VectorStore::default()
    }

    /// Ingest a corpus, replacing any previously loaded content
    ///
    /// Every embedding must have length equal to the corpus dimensionality;
    /// a mismatched chunk fails the whole load with
    /// [`Error::DimensionMismatch`]. Embeddings are replaced with
    /// L2-normalized copies.
    pub fn load(&mut self, corpus: Corpus) -> Result<()> {
        let dims = corpus.dims();
        if dims == 0 {
            return Err(Error::InvalidInput(
                "corpus dimensionality must be > 0".to_string(),
            ));
        }

        let mut chunks = corpus.chunks;
        for chunk in &chunks {
            if chunk.embedding.len() != dims {
                return Err(Error::DimensionMismatch {
                    expected: dims,
                    actual: chunk.embedding.len(),
                });
            }
        }
        for chunk in &mut chunks {
            chunk.embedding = normalized(&chunk.embedding);
        }

        self.by_id = chunks
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        self.dims = dims;
        self.chunks = chunks;
        Ok(())
    }

    /// Number of loaded chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if the store was never loaded or holds zero chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Loaded dimensionality (0 when unloaded)
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Look up a loaded chunk by id
    ///
    /// The returned chunk's embedding is the store's normalized copy.
    pub fn get(&self, id: &str) -> Option<&Chunk> {
        self.by_id.get(id).map(|&i| &self.chunks[i])
    }

    /// Similarity search with MMR diversification
    ///
    /// Returns at most `top_k` hits ordered by raw relevance descending.
    /// Scores are cosine similarities of unit vectors, range [-1, 1].
    ///
    /// A never-loaded or empty store yields an empty list, not an error.
    /// A query whose length differs from the loaded dimensionality is
    /// rejected with [`Error::DimensionMismatch`].
    pub fn search(&self, query: &[f32], opts: &SearchOptions) -> Result<Vec<SearchHit>> {
        if self.chunks.is_empty() || opts.top_k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dims {
            return Err(Error::DimensionMismatch {
                expected: self.dims,
                actual: query.len(),
            });
        }

        let query = normalized(query);

        // Scan in load order so equal scores keep a stable order downstream
        let mut scored: Vec<mmr::Candidate> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| mmr::Candidate::new(i, dot_product(&query, &chunk.embedding)))
            .collect();
        scored.sort_by(|a, b| Self::by_relevance(a, b));

        // Threshold, then fall back to the best 3 x top_k so a search never
        // silently returns nothing when one relevant chunk exists
        let mut candidates: Vec<mmr::Candidate> = scored
            .iter()
            .copied()
            .filter(|c| c.relevance >= opts.min_score)
            .collect();
        if candidates.is_empty() {
            tracing::debug!(
                target: "quarry::store",
                top_k = opts.top_k,
                min_score = opts.min_score,
                "No candidate cleared the similarity floor, falling back to best-effort scan"
            );
            scored.truncate(FALLBACK_FACTOR * opts.top_k);
            candidates = scored;
        }

        let mut selected = mmr::select(
            &candidates,
            |i| self.chunks[i].embedding.as_slice(),
            opts.mmr_lambda,
            opts.top_k,
        );
        // Callers see a relevance-ordered, diversity-filtered set
        selected.sort_by(|a, b| Self::by_relevance(a, b));

        Ok(selected
            .into_iter()
            .map(|c| SearchHit::new(self.chunks[c.index].id.clone(), c.relevance))
            .collect())
    }

    /// Sort key: relevance descending, load order ascending on ties
    fn by_relevance(a: &mmr::Candidate, b: &mmr::Candidate) -> Ordering {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::types::CorpusMeta;

    fn corpus(dims: usize, vectors: &[(&str, Vec<f32>)]) -> Corpus {
        let chunks = vectors
            .iter()
            .map(|(id, v)| Chunk::new(*id, format!("text {}", id), v.clone()))
            .collect();
        Corpus::new(CorpusMeta::new("test-model", dims), chunks)
    }

    fn loaded(dims: usize, vectors: &[(&str, Vec<f32>)]) -> VectorStore {
        let mut store = VectorStore::new();
        store.load(corpus(dims, vectors)).unwrap();
        store
    }

    // ========================================
    // Load Tests
    // ========================================

    #[test]
    fn test_load_normalizes_embeddings() {
        let store = loaded(2, &[("a", vec![3.0, 4.0])]);
        let chunk = store.get("a").unwrap();
        assert!((chunk.embedding[0] - 0.6).abs() < 1e-6);
        assert!((chunk.embedding[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_dimension_mismatch() {
        let mut store = VectorStore::new();
        let result = store.load(corpus(3, &[("a", vec![1.0, 0.0])]));
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_load_rejects_zero_dims() {
        let mut store = VectorStore::new();
        assert!(store.load(corpus(0, &[])).is_err());
    }

    #[test]
    fn test_load_replaces_previous_corpus() {
        let mut store = VectorStore::new();
        store.load(corpus(2, &[("a", vec![1.0, 0.0])])).unwrap();
        store.load(corpus(2, &[("b", vec![0.0, 1.0])])).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
    }

    #[test]
    fn test_load_does_not_mutate_caller_data() {
        let c = corpus(2, &[("a", vec![3.0, 4.0])]);
        let original = c.chunks[0].embedding.clone();
        let mut store = VectorStore::new();
        store.load(c.clone()).unwrap();
        assert_eq!(c.chunks[0].embedding, original);
    }

    // ========================================
    // Search Tests
    // ========================================

    #[test]
    fn test_search_unloaded_store_returns_empty() {
        let store = VectorStore::new();
        let hits = store.search(&[1.0, 0.0], &SearchOptions::default()).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_rejects_query_dimension_mismatch() {
        let store = loaded(2, &[("a", vec![1.0, 0.0])]);
        let result = store.search(&[1.0, 0.0, 0.0], &SearchOptions::default());
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_search_ranks_by_relevance() {
        let store = loaded(
            2,
            &[
                ("far", vec![0.0, 1.0]),
                ("close", vec![1.0, 0.1]),
                ("mid", vec![0.7, 0.7]),
            ],
        );
        let opts = SearchOptions::new().with_top_k(3).with_min_score(-1.0);
        let hits = store.search(&[1.0, 0.0], &opts).unwrap();
        assert_eq!(hits[0].id, "close");
        assert_eq!(hits[1].id, "mid");
        assert_eq!(hits[2].id, "far");
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_search_scores_in_cosine_range() {
        let store = loaded(
            3,
            &[
                ("a", vec![1.0, 2.0, -0.5]),
                ("b", vec![-3.0, 0.2, 0.9]),
                ("c", vec![0.1, -0.1, 4.0]),
            ],
        );
        let opts = SearchOptions::new().with_top_k(3).with_min_score(-1.0);
        let hits = store.search(&[0.4, -2.0, 1.0], &opts).unwrap();
        for hit in hits {
            assert!(hit.score >= -1.0 - 1e-6 && hit.score <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_search_cardinality_never_exceeds_top_k_or_corpus() {
        let store = loaded(2, &[("a", vec![1.0, 0.0]), ("b", vec![0.9, 0.1])]);
        let opts = SearchOptions::new().with_top_k(10).with_min_score(-1.0);
        assert_eq!(store.search(&[1.0, 0.0], &opts).unwrap().len(), 2);

        let opts = SearchOptions::new().with_top_k(1).with_min_score(-1.0);
        assert_eq!(store.search(&[1.0, 0.0], &opts).unwrap().len(), 1);
    }

    #[test]
    fn test_search_top_k_zero_returns_empty() {
        let store = loaded(2, &[("a", vec![1.0, 0.0])]);
        let opts = SearchOptions::new().with_top_k(0);
        assert!(store.search(&[1.0, 0.0], &opts).unwrap().is_empty());
    }

    #[test]
    fn test_min_score_drops_weak_candidates() {
        let store = loaded(2, &[("close", vec![1.0, 0.0]), ("far", vec![-1.0, 0.0])]);
        let opts = SearchOptions::new().with_top_k(5).with_min_score(0.5);
        let hits = store.search(&[1.0, 0.0], &opts).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "close");
    }

    #[test]
    fn test_fallback_when_nothing_clears_floor() {
        // All similarities are negative; the floor excludes everything, so
        // the search falls back to the best 3 x top_k by raw similarity.
        let store = loaded(
            2,
            &[
                ("a", vec![-1.0, 0.0]),
                ("b", vec![-0.9, -0.1]),
                ("c", vec![-0.8, 0.2]),
            ],
        );
        let opts = SearchOptions::new().with_top_k(1).with_min_score(0.9);
        let hits = store.search(&[1.0, 0.0], &opts).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_deterministic() {
        let store = loaded(
            3,
            &[
                ("a", vec![0.9, 0.1, 0.3]),
                ("b", vec![0.8, 0.3, 0.1]),
                ("c", vec![0.1, 0.9, 0.2]),
                ("d", vec![0.2, 0.2, 0.9]),
            ],
        );
        let opts = SearchOptions::new().with_top_k(3).with_min_score(-1.0);
        let first = store.search(&[1.0, 0.2, 0.1], &opts).unwrap();
        for _ in 0..5 {
            assert_eq!(store.search(&[1.0, 0.2, 0.1], &opts).unwrap(), first);
        }
    }

    #[test]
    fn test_equal_scores_break_ties_by_load_order() {
        let store = loaded(
            2,
            &[("z", vec![1.0, 0.0]), ("a", vec![1.0, 0.0]), ("m", vec![1.0, 0.0])],
        );
        let opts = SearchOptions::new()
            .with_top_k(3)
            .with_min_score(-1.0)
            .with_mmr_lambda(1.0);
        let hits = store.search(&[1.0, 0.0], &opts).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    // ========================================
    // MMR Behavior Tests
    // ========================================

    #[test]
    fn test_lambda_one_matches_plain_top_k() {
        let store = loaded(
            3,
            &[
                ("a", vec![1.0, 0.0, 0.0]),
                ("b", vec![0.9, 0.3, 0.0]),
                ("c", vec![0.7, 0.7, 0.0]),
                ("d", vec![0.0, 1.0, 0.0]),
            ],
        );
        let plain = SearchOptions::new()
            .with_top_k(4)
            .with_min_score(-1.0)
            .with_mmr_lambda(1.0);
        let hits = store.search(&[1.0, 0.1, 0.0], &plain).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_diversity_lambda_includes_distinct_vector() {
        // Three near-duplicates (pairwise cosine > 0.95) plus one distinct
        // vector with slightly lower raw similarity. With a diversity-leaning
        // lambda and top_k = 2, the distinct vector must appear even though
        // it is not 2nd-highest by raw score.
        let store = loaded(
            3,
            &[
                ("dup1", vec![1.0, 0.02, 0.0]),
                ("dup2", vec![1.0, 0.0, 0.02]),
                ("dup3", vec![1.0, -0.02, 0.0]),
                ("distinct", vec![0.6, 0.8, 0.0]),
            ],
        );
        let opts = SearchOptions::new()
            .with_top_k(2)
            .with_min_score(-1.0)
            .with_mmr_lambda(0.3);
        let hits = store.search(&[1.0, 0.01, 0.0], &opts).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(
            hits.iter().any(|h| h.id == "distinct"),
            "distinct vector missing from {:?}",
            hits
        );
    }

    #[test]
    fn test_output_sorted_by_relevance_not_pick_order() {
        // With a diversity-leaning lambda the MMR pick order diverges from
        // relevance order; the returned list must still be relevance-sorted.
        let store = loaded(
            3,
            &[
                ("dup1", vec![1.0, 0.02, 0.0]),
                ("dup2", vec![1.0, 0.0, 0.02]),
                ("distinct", vec![0.6, 0.8, 0.0]),
            ],
        );
        let opts = SearchOptions::new()
            .with_top_k(3)
            .with_min_score(-1.0)
            .with_mmr_lambda(0.2);
        let hits = store.search(&[1.0, 0.01, 0.0], &opts).unwrap();
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    // ========================================
    // Property Tests
    // ========================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_scores_stay_in_cosine_range(
                vectors in prop::collection::vec(
                    prop::collection::vec(-10.0f32..10.0, 4),
                    1..20,
                ),
                query in prop::collection::vec(-10.0f32..10.0, 4),
            ) {
                let entries: Vec<(String, Vec<f32>)> = vectors
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (format!("c{}", i), v))
                    .collect();
                let refs: Vec<(&str, Vec<f32>)> = entries
                    .iter()
                    .map(|(id, v)| (id.as_str(), v.clone()))
                    .collect();
                let store = loaded(4, &refs);
                let opts = SearchOptions::new().with_top_k(5).with_min_score(-1.0);
                let hits = store.search(&query, &opts).unwrap();
                prop_assert!(hits.len() <= 5);
                for hit in hits {
                    prop_assert!(hit.score >= -1.0 - 1e-5);
                    prop_assert!(hit.score <= 1.0 + 1e-5);
                }
            }
        }
    }
}
