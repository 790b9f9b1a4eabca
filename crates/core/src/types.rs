//! Domain types for retrieval corpora
//!
//! This module defines the data model shared by every layer:
//! - MetaValue: scalar metadata attached to chunks
//! - Chunk: minimal retrievable unit (text + embedding + optional metadata)
//! - CorpusMeta / Corpus: an embedded corpus and its provenance
//! - CorpusKind: provenance tag distinguishing the two hybrid-search lanes
//!
//! Chunks are immutable once loaded into a vector store for the duration of
//! a search session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Chunk identifier, unique within its corpus
pub type ChunkId = String;

/// Metadata attached to a chunk: scalar attributes keyed by field name
pub type Metadata = HashMap<String, MetaValue>;

// ============================================================================
// MetaValue
// ============================================================================

/// Scalar metadata value for filtering
///
/// Only scalar values can be used in equality filters. Serialized untagged so
/// `{"year": 2024, "merchant": "acme"}` round-trips as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Integer value (years, months, page numbers)
    Int(i64),
    /// String value (categories, merchants, currencies)
    Text(String),
}

impl MetaValue {
    /// Get the integer value, if this is an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(v) => Some(*v),
            MetaValue::Text(_) => None,
        }
    }

    /// Get the string value, if this is a Text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Int(_) => None,
            MetaValue::Text(v) => Some(v),
        }
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<i32> for MetaValue {
    fn from(v: i32) -> Self {
        MetaValue::Int(v as i64)
    }
}

impl From<u32> for MetaValue {
    fn from(v: u32) -> Self {
        MetaValue::Int(v as i64)
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::Text(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Text(v.to_string())
    }
}

// ============================================================================
// Chunk
// ============================================================================

/// A minimal retrievable unit: display text plus its embedding and optional
/// structured metadata
///
/// `id` is unique within the owning corpus. The embedding is caller-supplied
/// and may be un-normalized; the vector store re-normalizes its own copy at
/// load time and never mutates this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier within the corpus
    pub id: ChunkId,

    /// Display text of the passage
    pub text: String,

    /// Precomputed embedding, length == corpus dims
    pub embedding: Vec<f32>,

    /// Optional scalar attributes (year, month, category, merchant, currency, page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Chunk {
    /// Create a new Chunk without metadata
    pub fn new(id: impl Into<ChunkId>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Chunk {
            id: id.into(),
            text: text.into(),
            embedding,
            metadata: None,
        }
    }

    /// Builder: attach metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Embedding length
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }

    /// Look up a metadata field, if present
    pub fn meta(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }
}

// ============================================================================
// CorpusMeta / Corpus
// ============================================================================

/// Corpus provenance: which model produced the embeddings, at what
/// dimensionality, and when the index was built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMeta {
    /// Embedding model identifier (e.g. "text-embedding-3-small")
    pub model: String,

    /// Embedding dimensionality shared by every chunk
    pub dims: usize,

    /// When the corpus was built
    pub created_at: DateTime<Utc>,
}

impl CorpusMeta {
    /// Create a new CorpusMeta stamped with the current time
    pub fn new(model: impl Into<String>, dims: usize) -> Self {
        CorpusMeta {
            model: model.into(),
            dims,
            created_at: Utc::now(),
        }
    }
}

/// An ordered collection of chunks sharing one embedding model and
/// dimensionality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    /// Provenance record
    pub meta: CorpusMeta,

    /// Chunks in load order
    pub chunks: Vec<Chunk>,
}

impl Corpus {
    /// Create a new Corpus
    pub fn new(meta: CorpusMeta, chunks: Vec<Chunk>) -> Self {
        Corpus { meta, chunks }
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if the corpus holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embedding dimensionality
    pub fn dims(&self) -> usize {
        self.meta.dims
    }
}

// ============================================================================
// CorpusKind
// ============================================================================

/// Which corpus produced a result
///
/// Hybrid search runs over two parallel corpora: fine-grained Records (one
/// chunk per atomic record) and coarse-grained Summaries (one chunk per
/// precomputed aggregate). Results carry this tag so callers can render
/// provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorpusKind {
    /// Fine-grained corpus: one chunk per atomic record
    Records,
    /// Coarse-grained corpus: one chunk per precomputed aggregate
    Summaries,
}

impl CorpusKind {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            CorpusKind::Records => "records",
            CorpusKind::Summaries => "summaries",
        }
    }
}
