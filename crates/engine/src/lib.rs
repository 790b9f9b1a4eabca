//! Vector store for Quarry
//!
//! This crate provides the dense half of the retrieval engine:
//! - distance: dot product, L2 norm, normalization helpers
//! - mmr: greedy Maximal Marginal Relevance selection
//! - store: the in-memory VectorStore (normalize on load, O(n) cosine scan,
//!   threshold + fallback candidate selection, MMR, relevance re-sort)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod mmr;
pub mod store;

pub use distance::{dot_product, l2_norm, normalized};
pub use mmr::Candidate;
pub use store::VectorStore;
