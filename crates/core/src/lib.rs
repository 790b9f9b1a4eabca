//! Core types and collaborator ports for Quarry
//!
//! This crate defines the foundational types used throughout the system:
//! - Chunk / Corpus / CorpusMeta: the retrieval data model
//! - CorpusKind: provenance tag for hybrid-search lanes
//! - MetadataFilter: equality filtering over chunk attributes
//! - SearchOptions / SearchHit / RetrievedPassage: search inputs and outputs
//! - FusionWeights / HybridConfig: injected tuning configuration
//! - Error: error type hierarchy
//! - CorpusStore / Embedder: collaborator ports

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod filter;
pub mod search_types;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use config::{FusionWeights, HybridConfig};
pub use error::{Error, Result};
pub use filter::MetadataFilter;
pub use search_types::{
    ContextSource, RetrieveOptions, RetrievedContext, RetrievedPassage, SearchHit, SearchOptions,
};
pub use traits::{CorpusStore, Embedder};
pub use types::{Chunk, ChunkId, Corpus, CorpusKind, CorpusMeta, MetaValue, Metadata};
