//! Embedding collaborator client for Quarry
//!
//! This crate provides:
//! - ApiEmbedder: HTTP client for an OpenAI-compatible embeddings endpoint,
//!   single attempt per call, credentials injected via EmbedConfig
//! - MockEmbedder / FixedEmbedder / FailingEmbedder: deterministic test
//!   embedders
//!
//! The engine only ever sees the `Embedder` port from quarry-core; which
//! implementation is wired in is the caller's choice at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod mock;

pub use api::{ApiEmbedder, EmbedConfig};
pub use mock::{FailingEmbedder, FixedEmbedder, MockEmbedder};
