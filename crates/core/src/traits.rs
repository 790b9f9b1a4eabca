//! Collaborator ports
//!
//! The engine depends on two external collaborators, both behind narrow
//! traits so the core can be tested with in-memory implementations:
//! - CorpusStore: the persistent corpus store
//! - Embedder: the embedding service
//!
//! Neither port retries internally; a single failed call is final for the
//! current search attempt.

use crate::error::{Error, Result};
use crate::types::{Chunk, Corpus, CorpusMeta};

// ============================================================================
// CorpusStore
// ============================================================================

/// Port to the persistent corpus store
///
/// The engine is agnostic to where a corpus comes from, as long as the store
/// yields the corpus shape (meta + chunks). Implementations must be
/// Send + Sync so loaded corpora can be shared across threads.
pub trait CorpusStore: Send + Sync {
    /// Read the corpus provenance record, if one has been written
    fn get_meta(&self) -> Result<Option<CorpusMeta>>;

    /// Read all chunks in load order
    fn get_all_chunks(&self) -> Result<Vec<Chunk>>;

    /// Write the corpus provenance record
    fn put_meta(&self, meta: &CorpusMeta) -> Result<()>;

    /// Append chunks to the store
    fn put_chunks(&self, chunks: &[Chunk]) -> Result<()>;

    /// Read the whole corpus, or None if no meta record exists
    fn load_corpus(&self) -> Result<Option<Corpus>> {
        match self.get_meta()? {
            None => Ok(None),
            Some(meta) => {
                let chunks = self.get_all_chunks()?;
                Ok(Some(Corpus::new(meta, chunks)))
            }
        }
    }
}

// ============================================================================
// Embedder
// ============================================================================

/// Port to the embedding service
///
/// `embed` maps each input string to one vector of length `dims()`. On a
/// transport error or non-success response, implementations return
/// `Error::Embedding`; the current search attempt fails, the process does
/// not.
pub trait Embedder: Send + Sync {
    /// Embedding model identifier sent to the service
    fn model(&self) -> &str;

    /// Dimensionality of the vectors this embedder produces
    fn dims(&self) -> usize;

    /// Embed a batch of inputs, one vector per input
    fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single input
    fn embed_one(&self, input: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed(&[input.to_string()])?;
        if vectors.len() != 1 {
            return Err(Error::Embedding(format!(
                "expected 1 vector, got {}",
                vectors.len()
            )));
        }
        Ok(vectors.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubStore {
        meta: Option<CorpusMeta>,
        chunks: Vec<Chunk>,
    }

    impl CorpusStore for StubStore {
        fn get_meta(&self) -> Result<Option<CorpusMeta>> {
            Ok(self.meta.clone())
        }

        fn get_all_chunks(&self) -> Result<Vec<Chunk>> {
            Ok(self.chunks.clone())
        }

        fn put_meta(&self, _meta: &CorpusMeta) -> Result<()> {
            Ok(())
        }

        fn put_chunks(&self, _chunks: &[Chunk]) -> Result<()> {
            Ok(())
        }
    }

    struct StubEmbedder {
        dims: usize,
    }

    impl Embedder for StubEmbedder {
        fn model(&self) -> &str {
            "stub"
        }

        fn dims(&self) -> usize {
            self.dims
        }

        fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(inputs.iter().map(|_| vec![1.0; self.dims]).collect())
        }
    }

    #[test]
    fn test_load_corpus_without_meta_is_none() {
        let store = StubStore {
            meta: None,
            chunks: vec![Chunk::new("a", "alpha", vec![1.0])],
        };
        assert!(store.load_corpus().unwrap().is_none());
    }

    #[test]
    fn test_load_corpus_combines_meta_and_chunks() {
        let store = StubStore {
            meta: Some(CorpusMeta::new("m", 1)),
            chunks: vec![Chunk::new("a", "alpha", vec![1.0])],
        };
        let corpus = store.load_corpus().unwrap().unwrap();
        assert_eq!(corpus.meta.model, "m");
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_embed_one_unwraps_single_vector() {
        let embedder = StubEmbedder { dims: 3 };
        let v = embedder.embed_one("query").unwrap();
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_ports_are_object_safe() {
        fn assert_object_safe(_store: &dyn CorpusStore, _embedder: &dyn Embedder) {}
        let store = StubStore {
            meta: None,
            chunks: vec![],
        };
        let embedder = StubEmbedder { dims: 2 };
        assert_object_safe(&store, &embedder);
    }
}
