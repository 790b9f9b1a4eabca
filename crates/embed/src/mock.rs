//! Deterministic embedders for testing
//!
//! Three stand-ins for the real embedding collaborator:
//! - MockEmbedder: bag-of-words hash embeddings; texts sharing tokens get
//!   similar vectors, enabling end-to-end retrieval tests without a service
//! - FixedEmbedder: always returns one preset vector, for tests that pin
//!   the query embedding exactly
//! - FailingEmbedder: always errors, for fail-closed boundary tests

use quarry_core::error::{Error, Result};
use quarry_core::traits::Embedder;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// ============================================================================
// MockEmbedder
// ============================================================================

/// Deterministic bag-of-words embedder
///
/// Each whitespace token is hashed into one of `dims` buckets; the bucket
/// counts are L2-normalized. Same text always produces the same vector, and
/// texts with overlapping tokens have positive cosine similarity.
pub struct MockEmbedder {
    dims: usize,
}

impl MockEmbedder {
    /// Create a mock embedder producing vectors of the given length
    pub fn new(dims: usize) -> Self {
        MockEmbedder { dims }
    }

    /// Embed a single text (infallible helper for building test corpora)
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dims];
        for token in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() % self.dims as u64) as usize;
            vector[bucket] += 1.0;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Embedder for MockEmbedder {
    fn model(&self) -> &str {
        "mock-embedder"
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(inputs.iter().map(|text| self.embed_text(text)).collect())
    }
}

// ============================================================================
// FixedEmbedder
// ============================================================================

/// Embedder that returns one preset vector for every input
pub struct FixedEmbedder {
    vector: Vec<f32>,
}

impl FixedEmbedder {
    /// Create an embedder that always answers with `vector`
    pub fn new(vector: Vec<f32>) -> Self {
        FixedEmbedder { vector }
    }
}

impl Embedder for FixedEmbedder {
    fn model(&self) -> &str {
        "fixed-embedder"
    }

    fn dims(&self) -> usize {
        self.vector.len()
    }

    fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(inputs.iter().map(|_| self.vector.clone()).collect())
    }
}

// ============================================================================
// FailingEmbedder
// ============================================================================

/// Embedder that fails every call, simulating an unreachable service
pub struct FailingEmbedder {
    dims: usize,
}

impl FailingEmbedder {
    /// Create a failing embedder advertising the given dimensionality
    pub fn new(dims: usize) -> Self {
        FailingEmbedder { dims }
    }
}

impl Embedder for FailingEmbedder {
    fn model(&self) -> &str {
        "failing-embedder"
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn embed(&self, _inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(Error::Embedding("simulated transport failure".to_string()))
    }
}
