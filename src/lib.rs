//! Quarry - hybrid retrieval engine for grounding AI assistant answers
//!
//! Quarry retrieves ranked, diversified, optionally metadata-filtered
//! passages from small embedded corpora so a language model can ground its
//! answers in them. Two retrieval paths are provided:
//!
//! - [`HybridRetriever`]: dense (cosine + MMR) and lexical (BM25) search over
//!   two parallel corpora (fine-grained Records, coarse-grained Summaries),
//!   fused into one provenance-tagged ranking
//! - [`ContextRetriever`]: single-corpus retrieval that assembles a bounded
//!   context string from labeled source blocks
//!
//! # Quick Start
//!
//! ```ignore
//! use quarry::{HybridRetriever, MetadataFilter, MockEmbedder};
//! use std::sync::Arc;
//!
//! let mut retriever = HybridRetriever::new(Arc::new(MockEmbedder::new(256)));
//! retriever.load(records_corpus, summaries_corpus)?;
//!
//! let filter = MetadataFilter::new().with_year(2024).with_month(1);
//! let passages = retriever.search("coffee spending in january", &filter, 5)?;
//! ```
//!
//! # Architecture
//!
//! The engine is assembled from layered crates: `quarry-core` (types, ports,
//! configuration), `quarry-engine` (vector store), `quarry-search` (BM25,
//! fusion, orchestration), `quarry-storage` (in-memory corpus store), and
//! `quarry-embed` (embedding-service client). External collaborators (the
//! embedding service and the persistent corpus store) sit behind the
//! `Embedder` and `CorpusStore` ports and are injected at startup.

// Re-export the public API
pub use quarry_core::{
    Chunk, ChunkId, ContextSource, Corpus, CorpusKind, CorpusMeta, CorpusStore, Embedder, Error,
    FusionWeights, HybridConfig, MetaValue, Metadata, MetadataFilter, Result, RetrieveOptions,
    RetrievedContext, RetrievedPassage, SearchHit, SearchOptions,
};
pub use quarry_embed::{ApiEmbedder, EmbedConfig, FailingEmbedder, FixedEmbedder, MockEmbedder};
pub use quarry_engine::VectorStore;
pub use quarry_search::{Bm25Scorer, ContextRetriever, HybridRetriever, ScoreFuser};
pub use quarry_storage::MemoryCorpusStore;
