//! Search infrastructure for Quarry
//!
//! This crate provides:
//! - Basic tokenizer for lexical scoring
//! - Bm25Scorer with per-pool statistics
//! - ScoreFuser for dense/lexical score fusion
//! - HybridRetriever for two-corpus orchestration
//! - ContextRetriever for single-corpus context assembly
//!
//! # Usage
//!
//! ```ignore
//! use quarry_search::HybridRetriever;
//!
//! let mut retriever = HybridRetriever::new(embedder);
//! retriever.load(records, summaries)?;
//! let passages = retriever.search("coffee in january", &filter, 5)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod fuser;
pub mod hybrid;
pub mod scorer;
pub mod tokenizer;

// Re-export commonly used types
pub use context::ContextRetriever;
pub use fuser::{FusedHit, ScoreFuser};
pub use hybrid::HybridRetriever;
pub use scorer::{Bm25Scorer, PoolStats};
pub use tokenizer::tokenize;
