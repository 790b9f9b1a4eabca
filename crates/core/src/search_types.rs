//! Search option and result types
//!
//! This module defines the types flowing in and out of search operations:
//! - SearchOptions: knobs for a single vector-store search
//! - SearchHit: id + relevance score returned by the vector store
//! - RetrievedPassage: fused, provenance-tagged result item
//! - RetrieveOptions / RetrievedContext: single-corpus context retrieval
//!
//! Result items are created fresh per search call, never mutated or cached,
//! and discarded after the caller consumes them.

use crate::types::{ChunkId, CorpusKind};
use serde::{Deserialize, Serialize};

// ============================================================================
// SearchOptions
// ============================================================================

/// Options for a single vector-store search
///
/// # Default Values
///
/// - top_k: 5
/// - min_score: 0.2
/// - mmr_lambda: 0.6
///
/// The defaults are empirical tuning values, not derived optima.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum results to return
    pub top_k: usize,

    /// Similarity floor for the candidate set. Candidates below the floor are
    /// dropped unless nothing clears it, in which case the search falls back
    /// to the top 3 x top_k by raw similarity.
    pub min_score: f32,

    /// Relevance/diversity trade-off for MMR selection.
    /// 1.0 degenerates to pure relevance ranking, 0.0 to pure diversity.
    pub mmr_lambda: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            top_k: 5,
            min_score: 0.2,
            mmr_lambda: 0.6,
        }
    }
}

impl SearchOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        SearchOptions::default()
    }

    /// Builder: set top-k
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Builder: set the similarity floor
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Builder: set the MMR lambda
    pub fn with_mmr_lambda(mut self, mmr_lambda: f32) -> Self {
        self.mmr_lambda = mmr_lambda;
        self
    }
}

// ============================================================================
// SearchHit
// ============================================================================

/// A single dense search result
///
/// `score` is cosine similarity of unit vectors and lies in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Id of the matching chunk
    pub id: ChunkId,

    /// Raw relevance score (higher = more similar)
    pub score: f32,
}

impl SearchHit {
    /// Create a new SearchHit
    pub fn new(id: impl Into<ChunkId>, score: f32) -> Self {
        SearchHit {
            id: id.into(),
            score,
        }
    }
}

// ============================================================================
// RetrievedPassage
// ============================================================================

/// A fused, provenance-tagged passage returned by hybrid search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// Id of the source chunk
    pub id: ChunkId,

    /// Display text of the passage
    pub text: String,

    /// Fused score (higher = more relevant); comparable only within one response
    pub score: f32,

    /// Which corpus produced this passage
    pub source: CorpusKind,
}

impl RetrievedPassage {
    /// Create a new RetrievedPassage
    pub fn new(
        id: impl Into<ChunkId>,
        text: impl Into<String>,
        score: f32,
        source: CorpusKind,
    ) -> Self {
        RetrievedPassage {
            id: id.into(),
            text: text.into(),
            score,
            source,
        }
    }
}

// ============================================================================
// RetrieveOptions
// ============================================================================

/// Options for single-corpus context retrieval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrieveOptions {
    /// Underlying vector-store search options
    pub search: SearchOptions,

    /// Hard bound on the assembled context length, in characters.
    /// Blocks are included whole or not at all; assembly stops before the
    /// first block that would push past this bound.
    pub max_context_chars: usize,
}

impl Default for RetrieveOptions {
    fn default() -> Self {
        RetrieveOptions {
            search: SearchOptions::default(),
            max_context_chars: 4_000,
        }
    }
}

impl RetrieveOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        RetrieveOptions::default()
    }

    /// Builder: set search options
    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    /// Builder: set the context length bound
    pub fn with_max_context_chars(mut self, max: usize) -> Self {
        self.max_context_chars = max;
        self
    }
}

// ============================================================================
// RetrievedContext
// ============================================================================

/// One source block included in an assembled context
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSource {
    /// Id of the source chunk
    pub id: ChunkId,

    /// Raw relevance score of the chunk
    pub score: f32,

    /// Page number from chunk metadata, if tagged
    pub page: Option<i64>,
}

/// Assembled context string plus the sources it includes, in order
#[derive(Debug, Clone, Default)]
pub struct RetrievedContext {
    /// Concatenated, labeled source blocks
    pub context: String,

    /// Sources included in the context, in block order
    pub sources: Vec<ContextSource>,
}

impl RetrievedContext {
    /// Create an empty context (no sources)
    pub fn empty() -> Self {
        RetrievedContext::default()
    }

    /// True if no sources were included
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
