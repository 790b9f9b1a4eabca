//! Single-corpus context retrieval
//!
//! The simpler retrieval path for an undifferentiated knowledge corpus: no
//! fusion, no metadata filter. Embed the query, search the vector store, then
//! assemble one bounded context string from "[Source N]"-labeled blocks in
//! result order.
//!
//! The length bound is hard: assembly stops before the first block that would
//! push the accumulated length past `max_context_chars`. A block is included
//! whole or not at all; partial inclusion would hand the language model a
//! truncated passage.

use quarry_core::error::{Error, Result};
use quarry_core::search_types::{ContextSource, RetrieveOptions, RetrievedContext};
use quarry_core::traits::{CorpusStore, Embedder};
use quarry_core::types::{Corpus, MetaValue};
use quarry_engine::VectorStore;
use std::sync::Arc;

/// Separator between context blocks
const BLOCK_SEPARATOR: &str = "\n\n";

/// Retrieves and assembles grounding context from a single corpus
pub struct ContextRetriever {
    embedder: Arc<dyn Embedder>,
    store: VectorStore,
}

impl ContextRetriever {
    /// Create an unloaded retriever
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        ContextRetriever {
            embedder,
            store: VectorStore::new(),
        }
    }

    /// Ingest the knowledge corpus, replacing any previously loaded content
    pub fn load(&mut self, corpus: Corpus) -> Result<()> {
        self.store.load(corpus)
    }

    /// Ingest the knowledge corpus from a persistent store
    pub fn load_from_store(&mut self, store: &dyn CorpusStore) -> Result<()> {
        let corpus = store
            .load_corpus()?
            .ok_or_else(|| Error::Storage("knowledge store holds no corpus".to_string()))?;
        self.load(corpus)
    }

    /// Retrieve passages and assemble a bounded context string
    ///
    /// Embedding failure is caught here and surfaces as an empty context;
    /// callers treat it as "no context available".
    pub fn retrieve(&self, query: &str, opts: &RetrieveOptions) -> Result<RetrievedContext> {
        let query_embedding = match self.embedder.embed_one(query) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    target: "quarry::context",
                    error = %e,
                    "Embedding failed, returning empty context"
                );
                return Ok(RetrievedContext::empty());
            }
        };

        let hits = self.store.search(&query_embedding, &opts.search)?;

        let mut context = String::new();
        let mut sources = Vec::new();
        for (i, hit) in hits.iter().enumerate() {
            let Some(chunk) = self.store.get(&hit.id) else {
                continue;
            };
            let page = chunk.meta("page").and_then(MetaValue::as_int);
            let block = format_block(i + 1, page, hit.score, &chunk.text);

            let separator_len = if context.is_empty() {
                0
            } else {
                BLOCK_SEPARATOR.len()
            };
            if context.len() + separator_len + block.len() > opts.max_context_chars {
                break;
            }
            if separator_len > 0 {
                context.push_str(BLOCK_SEPARATOR);
            }
            context.push_str(&block);
            sources.push(ContextSource {
                id: hit.id.clone(),
                score: hit.score,
                page,
            });
        }

        Ok(RetrievedContext { context, sources })
    }
}

/// Format one labeled context block
fn format_block(n: usize, page: Option<i64>, score: f32, text: &str) -> String {
    match page {
        Some(page) => format!("[Source {} (page {}, score {:.3})]\n{}", n, page, score, text),
        None => format!("[Source {} (score {:.3})]\n{}", n, score, text),
    }
}
