//! Two-corpus hybrid retrieval orchestration
//!
//! HybridRetriever coordinates two parallel corpora (fine-grained Records,
//! coarse-grained Summaries) through one pipeline per lane:
//!
//! ```text
//! query text ──► embed (collaborator, fail closed)
//!                    │
//!        ┌───────────┴───────────┐
//!        ▼                       ▼
//!   Records lane            Summaries lane
//!   filter chunks           filter chunks
//!   dense search ∩ pool     dense search ∩ pool
//!   BM25 over pool          BM25 over pool
//!   fuse scores             fuse scores
//!        └───────────┬───────────┘
//!                    ▼
//!        merge, sort, truncate to k
//! ```
//!
//! Metadata filtering is applied AFTER the dense scan: a dense hit outside
//! the filtered pool is dropped even if relevant, and unfiltered chunks still
//! act as MMR diversity comparators. Filtering before the scan would change
//! which chunks are eligible comparators; the post-hoc order is kept
//! deliberately.
//!
//! The orchestrator is read-only after load; it holds the two vector stores
//! plus the raw chunk lists needed for filtering and lexical scoring.

use crate::fuser::ScoreFuser;
use crate::scorer::Bm25Scorer;
use quarry_core::config::HybridConfig;
use quarry_core::error::{Error, Result};
use quarry_core::filter::MetadataFilter;
use quarry_core::search_types::{RetrievedPassage, SearchOptions};
use quarry_core::traits::{CorpusStore, Embedder};
use quarry_core::types::{Chunk, Corpus, CorpusKind};
use quarry_engine::VectorStore;
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// Lane
// ============================================================================

/// One corpus lane: a vector store plus the raw chunks for filtering and
/// lexical scoring
#[derive(Debug)]
struct Lane {
    kind: CorpusKind,
    store: VectorStore,
    chunks: Vec<Chunk>,
}

impl Lane {
    fn new(kind: CorpusKind) -> Self {
        Lane {
            kind,
            store: VectorStore::new(),
            chunks: Vec::new(),
        }
    }

    fn load(&mut self, corpus: Corpus) -> Result<()> {
        self.chunks = corpus.chunks.clone();
        self.store.load(corpus)
    }
}

// ============================================================================
// HybridRetriever
// ============================================================================

/// Coordinates dense + lexical retrieval across the Records and Summaries
/// corpora
pub struct HybridRetriever {
    embedder: Arc<dyn Embedder>,
    config: HybridConfig,
    scorer: Bm25Scorer,
    fuser: ScoreFuser,
    records: Lane,
    summaries: Lane,
}

impl HybridRetriever {
    /// Create an unloaded retriever with default configuration
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_config(embedder, HybridConfig::default())
    }

    /// Create an unloaded retriever with explicit configuration
    pub fn with_config(embedder: Arc<dyn Embedder>, config: HybridConfig) -> Self {
        HybridRetriever {
            embedder,
            config,
            scorer: Bm25Scorer::default(),
            fuser: ScoreFuser::new(config.weights),
            records: Lane::new(CorpusKind::Records),
            summaries: Lane::new(CorpusKind::Summaries),
        }
    }

    /// Ingest both corpora, replacing any previously loaded content
    pub fn load(&mut self, records: Corpus, summaries: Corpus) -> Result<()> {
        self.records.load(records)?;
        self.summaries.load(summaries)
    }

    /// Ingest both corpora from persistent stores
    ///
    /// Fails with [`Error::Storage`] when a store has no corpus.
    pub fn load_from_stores(
        &mut self,
        records: &dyn CorpusStore,
        summaries: &dyn CorpusStore,
    ) -> Result<()> {
        let records = records
            .load_corpus()?
            .ok_or_else(|| Error::Storage("records store holds no corpus".to_string()))?;
        let summaries = summaries
            .load_corpus()?
            .ok_or_else(|| Error::Storage("summaries store holds no corpus".to_string()))?;
        self.load(records, summaries)
    }

    /// Search both corpora and merge into one ranked, provenance-tagged list
    ///
    /// Embedding failure is caught here and surfaces as an empty result;
    /// callers treat it as "no context available", never as fatal. A single
    /// failed attempt is final; there is no retry.
    pub fn search(
        &self,
        query: &str,
        filter: &MetadataFilter,
        k: usize,
    ) -> Result<Vec<RetrievedPassage>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = match self.embedder.embed_one(query) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    target: "quarry::hybrid",
                    error = %e,
                    "Embedding failed, returning no context"
                );
                return Ok(Vec::new());
            }
        };

        let mut merged = self.search_lane(&self.records, query, &query_embedding, filter, k)?;
        merged.extend(self.search_lane(&self.summaries, query, &query_embedding, filter, k)?);

        merged.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        merged.truncate(k);
        Ok(merged)
    }

    /// Run the filter → dense ∩ pool → BM25 → fuse pipeline over one lane
    fn search_lane(
        &self,
        lane: &Lane,
        query: &str,
        query_embedding: &[f32],
        filter: &MetadataFilter,
        k: usize,
    ) -> Result<Vec<RetrievedPassage>> {
        if lane.store.is_empty() {
            return Ok(Vec::new());
        }

        let pool = filter.apply(&lane.chunks);
        let pool_ids: HashSet<&str> = pool.iter().map(|c| c.id.as_str()).collect();

        let opts = SearchOptions::new()
            .with_top_k(k.min(self.config.dense_top_k_cap))
            .with_min_score(self.config.dense_min_score)
            .with_mmr_lambda(self.config.mmr_lambda);
        let mut dense = lane.store.search(query_embedding, &opts)?;
        // Post-hoc intersection with the filtered pool
        dense.retain(|hit| pool_ids.contains(hit.id.as_str()));

        let lexical = self.scorer.score(query, &pool);

        tracing::debug!(
            target: "quarry::hybrid",
            lane = lane.kind.name(),
            pool = pool.len(),
            dense = dense.len(),
            lexical = lexical.len(),
            "Lane scored"
        );

        let fused = self.fuser.fuse(&dense, &lexical, k);
        Ok(fused
            .into_iter()
            .filter_map(|f| {
                lane.store
                    .get(&f.id)
                    .map(|c| RetrievedPassage::new(f.id, c.text.clone(), f.score, lane.kind))
            })
            .collect())
    }
}
