//! BM25 lexical scoring over a filtered document pool
//!
//! This module provides:
//! - PoolStats: per-call corpus statistics (document frequency, average length)
//! - Bm25Scorer: standard BM25 with k1 = 1.2, b = 0.75
//!
//! Statistics are recomputed on every call against whatever pool the caller
//! passes in. After metadata filtering, document frequency and average
//! document length reflect the surviving subset, not the whole corpus.
//!
//! The score map is sparse: only chunks with nonzero scores appear. A query
//! sharing no tokens with any document yields an empty map.

use crate::tokenizer::tokenize;
use quarry_core::types::{Chunk, ChunkId};
use std::collections::HashMap;

// ============================================================================
// PoolStats
// ============================================================================

/// Corpus-level statistics for one scoring call
///
/// Built from the tokenized pool; holds what BM25 needs for IDF and length
/// normalization.
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Number of documents in the pool
    pub total_docs: usize,

    /// Document frequency per term
    pub doc_freqs: HashMap<String, usize>,

    /// Average document length in tokens
    pub avg_doc_len: f32,
}

impl PoolStats {
    /// Build statistics from tokenized documents
    pub fn build(token_lists: &[Vec<String>]) -> Self {
        let total_docs = token_lists.len();
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();
        let mut total_len = 0usize;

        for tokens in token_lists {
            total_len += tokens.len();
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freqs.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let avg_doc_len = if total_docs == 0 {
            0.0
        } else {
            total_len as f32 / total_docs as f32
        };

        PoolStats {
            total_docs,
            doc_freqs,
            avg_doc_len,
        }
    }

    /// Compute IDF for a term
    ///
    /// Standard smoothed formula: `ln((N - df + 0.5) / (df + 0.5) + 1)`
    pub fn idf(&self, term: &str) -> f32 {
        let df = self.doc_freqs.get(term).copied().unwrap_or(0) as f32;
        let n = self.total_docs as f32;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }
}

// ============================================================================
// Bm25Scorer
// ============================================================================

/// BM25 scorer over a document pool
///
/// # BM25 Formula
///
/// For each query term t:
/// `score += IDF(t) * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl/avgdl))`
///
/// Where:
/// - tf = term frequency in document
/// - dl = document length, avgdl = average length over the pool
/// - k1 = term saturation parameter (default 1.2)
/// - b = length normalization parameter (default 0.75)
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    /// k1 parameter: term frequency saturation
    k1: f32,
    /// b parameter: length normalization
    b: f32,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Bm25Scorer { k1: 1.2, b: 0.75 }
    }
}

impl Bm25Scorer {
    /// Create a scorer with custom parameters
    pub fn new(k1: f32, b: f32) -> Self {
        Bm25Scorer { k1, b }
    }

    /// Score the pool against a query
    ///
    /// Returns a sparse map of chunk id to BM25 score; chunks with no query
    /// term overlap are absent.
    pub fn score(&self, query: &str, pool: &[&Chunk]) -> HashMap<ChunkId, f32> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() || pool.is_empty() {
            return HashMap::new();
        }

        let token_lists: Vec<Vec<String>> = pool.iter().map(|c| tokenize(&c.text)).collect();
        let stats = PoolStats::build(&token_lists);

        let mut scores = HashMap::new();
        for (chunk, tokens) in pool.iter().zip(&token_lists) {
            if tokens.is_empty() {
                continue;
            }
            let doc_len = tokens.len() as f32;

            let mut term_counts: HashMap<&str, usize> = HashMap::new();
            for term in tokens {
                *term_counts.entry(term.as_str()).or_insert(0) += 1;
            }

            let mut score = 0.0;
            for term in &query_terms {
                let tf = term_counts.get(term.as_str()).copied().unwrap_or(0) as f32;
                if tf == 0.0 {
                    continue;
                }
                let avg_len = stats.avg_doc_len.max(1.0);
                let tf_component = (tf * (self.k1 + 1.0))
                    / (tf + self.k1 * (1.0 - self.b + self.b * doc_len / avg_len));
                score += stats.idf(term) * tf_component;
            }

            if score > 0.0 {
                scores.insert(chunk.id.clone(), score);
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, text: &str) -> Chunk {
        Chunk::new(id, text, vec![1.0])
    }

    // ========================================
    // PoolStats Tests
    // ========================================

    #[test]
    fn test_pool_stats_build() {
        let lists = vec![
            tokenize("coffee at acme"),
            tokenize("coffee beans"),
        ];
        let stats = PoolStats::build(&lists);
        assert_eq!(stats.total_docs, 2);
        assert_eq!(stats.doc_freqs.get("coffee"), Some(&2));
        assert_eq!(stats.doc_freqs.get("acme"), Some(&1));
        assert!((stats.avg_doc_len - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_pool_stats_idf_ordering() {
        let lists = vec![
            tokenize("common rare"),
            tokenize("common"),
            tokenize("common"),
        ];
        let stats = PoolStats::build(&lists);
        assert!(stats.idf("rare") > stats.idf("common"));
        assert!(stats.idf("missing") > stats.idf("rare"));
    }

    #[test]
    fn test_pool_stats_empty() {
        let stats = PoolStats::build(&[]);
        assert_eq!(stats.total_docs, 0);
        assert_eq!(stats.avg_doc_len, 0.0);
    }

    // ========================================
    // Bm25Scorer Tests
    // ========================================

    #[test]
    fn test_bm25_matching_doc_scores_positive() {
        let scorer = Bm25Scorer::default();
        let docs = vec![chunk("a", "coffee at acme downtown"), chunk("b", "monthly rent payment")];
        let pool: Vec<&Chunk> = docs.iter().collect();

        let scores = scorer.score("coffee acme", &pool);
        assert!(scores.get("a").copied().unwrap_or(0.0) > 0.0);
        assert!(!scores.contains_key("b"));
    }

    #[test]
    fn test_bm25_no_overlap_yields_empty_map() {
        let scorer = Bm25Scorer::default();
        let docs = vec![chunk("a", "coffee at acme"), chunk("b", "rent payment")];
        let pool: Vec<&Chunk> = docs.iter().collect();

        let scores = scorer.score("bananas", &pool);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_bm25_empty_query_yields_empty_map() {
        let scorer = Bm25Scorer::default();
        let docs = vec![chunk("a", "coffee")];
        let pool: Vec<&Chunk> = docs.iter().collect();
        assert!(scorer.score("", &pool).is_empty());
        assert!(scorer.score("!!!", &pool).is_empty());
    }

    #[test]
    fn test_bm25_empty_pool_yields_empty_map() {
        let scorer = Bm25Scorer::default();
        assert!(scorer.score("coffee", &[]).is_empty());
    }

    #[test]
    fn test_bm25_rare_term_outweighs_common_term() {
        let scorer = Bm25Scorer::default();
        let docs = vec![
            chunk("a", "payment espresso"),
            chunk("b", "payment transfer"),
            chunk("c", "payment deposit"),
        ];
        let pool: Vec<&Chunk> = docs.iter().collect();

        let scores = scorer.score("payment espresso", &pool);
        // "espresso" appears in one document, "payment" in all three; the
        // espresso document must come out on top.
        let a = scores["a"];
        for id in ["b", "c"] {
            assert!(a > scores[id]);
        }
    }

    #[test]
    fn test_bm25_length_normalization_favors_shorter_doc() {
        let scorer = Bm25Scorer::default();
        let docs = vec![
            chunk("short", "coffee"),
            chunk(
                "long",
                "coffee with a very long tail of unrelated words about other purchases entirely",
            ),
        ];
        let pool: Vec<&Chunk> = docs.iter().collect();

        let scores = scorer.score("coffee", &pool);
        assert!(scores["short"] > scores["long"]);
    }

    #[test]
    fn test_bm25_stats_follow_the_pool_not_the_corpus() {
        // The same document scores differently depending on which pool it is
        // scored in, because df/avgdl are pool-relative.
        let scorer = Bm25Scorer::default();
        let all = vec![
            chunk("a", "coffee acme"),
            chunk("b", "coffee beans"),
            chunk("c", "coffee roast"),
        ];

        let full_pool: Vec<&Chunk> = all.iter().collect();
        let narrow_pool: Vec<&Chunk> = all.iter().take(1).collect();

        let full = scorer.score("coffee", &full_pool);
        let narrow = scorer.score("coffee", &narrow_pool);
        // "coffee" is ubiquitous in the full pool (df = N) but unique in the
        // narrow pool (df = 1 of 1); the IDF differs, so the scores differ.
        assert!((full["a"] - narrow["a"]).abs() > 1e-6);
    }

    #[test]
    fn test_bm25_repeated_term_saturates() {
        let scorer = Bm25Scorer::default();
        let docs = vec![
            chunk("once", "coffee receipt"),
            chunk("thrice", "coffee coffee coffee"),
        ];
        let pool: Vec<&Chunk> = docs.iter().collect();

        let scores = scorer.score("coffee", &pool);
        // More occurrences score higher, but sublinearly
        assert!(scores["thrice"] > scores["once"]);
        assert!(scores["thrice"] < scores["once"] * 3.0);
    }

    #[test]
    fn test_bm25_deterministic() {
        let scorer = Bm25Scorer::default();
        let docs = vec![chunk("a", "coffee at acme"), chunk("b", "acme invoice")];
        let pool: Vec<&Chunk> = docs.iter().collect();

        let first = scorer.score("acme coffee", &pool);
        for _ in 0..5 {
            assert_eq!(scorer.score("acme coffee", &pool), first);
        }
    }

    #[test]
    fn test_bm25_custom_params() {
        let scorer = Bm25Scorer::new(2.0, 0.5);
        let docs = vec![chunk("a", "coffee")];
        let pool: Vec<&Chunk> = docs.iter().collect();
        assert!(scorer.score("coffee", &pool)["a"] > 0.0);
    }
}
