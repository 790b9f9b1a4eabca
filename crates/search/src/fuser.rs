//! Dense/lexical score fusion
//!
//! Blends the vector store's dense results with BM25 scores over the same
//! pool into one ranking:
//!
//! 1. Normalize dense scores by the observed maximum (epsilon guard)
//! 2. Normalize lexical scores the same way
//! 3. Every dense hit: `dense_weight * norm_dense + lexical_weight * norm_lex`
//!    (lexical term 0 when the chunk has no lexical score)
//! 4. Lexical-only chunks, up to k additional: `lexical_weight * norm_lex`
//!
//! A chunk strong in either signal is rewarded; a chunk strong in both wins.
//! Output order carries no guarantee; the orchestrator sorts after merging
//! lanes.

use quarry_core::config::FusionWeights;
use quarry_core::search_types::SearchHit;
use quarry_core::types::ChunkId;
use std::collections::HashMap;

/// Guard against division by zero when normalizing
const EPSILON: f32 = 1e-6;

// ============================================================================
// FusedHit
// ============================================================================

/// A chunk with its fused score
#[derive(Debug, Clone, PartialEq)]
pub struct FusedHit {
    /// Id of the chunk
    pub id: ChunkId,

    /// Blended score (higher = more relevant)
    pub score: f32,
}

impl FusedHit {
    /// Create a new FusedHit
    pub fn new(id: impl Into<ChunkId>, score: f32) -> Self {
        FusedHit {
            id: id.into(),
            score,
        }
    }
}

// ============================================================================
// ScoreFuser
// ============================================================================

/// Fuses dense and lexical scores with configured weights
#[derive(Debug, Clone, Default)]
pub struct ScoreFuser {
    weights: FusionWeights,
}

impl ScoreFuser {
    /// Create a fuser with the given weights
    pub fn new(weights: FusionWeights) -> Self {
        ScoreFuser { weights }
    }

    /// The configured weights
    pub fn weights(&self) -> FusionWeights {
        self.weights
    }

    /// Fuse one corpus's dense hits with its lexical score map
    ///
    /// `k` bounds only the lexical-only additions; every dense hit is kept.
    pub fn fuse(
        &self,
        dense: &[SearchHit],
        lexical: &HashMap<ChunkId, f32>,
        k: usize,
    ) -> Vec<FusedHit> {
        let max_dense = dense
            .iter()
            .map(|h| h.score)
            .fold(f32::NEG_INFINITY, f32::max)
            .max(EPSILON);
        let max_lexical = lexical
            .values()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
            .max(EPSILON);

        let mut fused: Vec<FusedHit> = Vec::with_capacity(dense.len());
        for hit in dense {
            let norm_dense = hit.score / max_dense;
            let norm_lexical = lexical.get(&hit.id).copied().unwrap_or(0.0) / max_lexical;
            fused.push(FusedHit::new(
                hit.id.clone(),
                self.weights.dense * norm_dense + self.weights.lexical * norm_lexical,
            ));
        }

        // Lexical-only tail: chunks BM25 found that the dense scan missed
        let dense_ids: std::collections::HashSet<&str> =
            dense.iter().map(|h| h.id.as_str()).collect();
        let mut lexical_only: Vec<(&ChunkId, f32)> = lexical
            .iter()
            .filter(|(id, _)| !dense_ids.contains(id.as_str()))
            .map(|(id, score)| (id, *score))
            .collect();
        lexical_only.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        for (id, score) in lexical_only.into_iter().take(k) {
            fused.push(FusedHit::new(
                id.clone(),
                self.weights.lexical * (score / max_lexical),
            ));
        }

        fused
    }
}
