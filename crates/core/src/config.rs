//! Tuning configuration for score fusion and hybrid orchestration
//!
//! This module gathers the tunable constants of the engine into injectable
//! configuration structs:
//! - FusionWeights: dense/lexical blend weights
//! - HybridConfig: per-lane dense search knobs for the hybrid orchestrator
//!
//! The default values (0.6/0.4 fusion split, MMR lambda 0.6, similarity floor
//! 0.2, dense top-k cap 6) are empirical tuning choices carried over from
//! observed behavior, not derived optima. Treat them as adjustable, not as
//! load-bearing invariants.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// FusionWeights
// ============================================================================

/// Weights for blending max-normalized dense and lexical scores
///
/// A chunk present in the dense result list scores
/// `dense * norm_dense + lexical * norm_lexical` (lexical term 0 when the
/// chunk has no lexical score); a lexical-only chunk scores
/// `lexical * norm_lexical`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    /// Weight of the normalized dense (vector) score
    pub dense: f32,

    /// Weight of the normalized lexical (BM25) score
    pub lexical: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        FusionWeights {
            dense: 0.6,
            lexical: 0.4,
        }
    }
}

impl FusionWeights {
    /// Create weights with validation
    ///
    /// Returns an error if either weight is negative or both are zero.
    pub fn new(dense: f32, lexical: f32) -> Result<Self> {
        if dense < 0.0 || lexical < 0.0 {
            return Err(Error::InvalidInput(format!(
                "fusion weights must be non-negative (got dense={}, lexical={})",
                dense, lexical
            )));
        }
        if dense == 0.0 && lexical == 0.0 {
            return Err(Error::InvalidInput(
                "at least one fusion weight must be positive".to_string(),
            ));
        }
        Ok(FusionWeights { dense, lexical })
    }
}

// ============================================================================
// HybridConfig
// ============================================================================

/// Configuration for the two-corpus hybrid orchestrator
///
/// # Default Values
///
/// - dense_top_k_cap: 6 (per-lane dense top-k is `min(k, cap)`)
/// - dense_min_score: 0.2
/// - mmr_lambda: 0.6
/// - weights: FusionWeights::default()
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridConfig {
    /// Cap on the per-lane dense top-k; the effective value is `min(k, cap)`
    pub dense_top_k_cap: usize,

    /// Similarity floor passed to the per-lane dense search
    pub dense_min_score: f32,

    /// MMR lambda passed to the per-lane dense search
    pub mmr_lambda: f32,

    /// Dense/lexical fusion weights
    pub weights: FusionWeights,
}

impl Default for HybridConfig {
    fn default() -> Self {
        HybridConfig {
            dense_top_k_cap: 6,
            dense_min_score: 0.2,
            mmr_lambda: 0.6,
            weights: FusionWeights::default(),
        }
    }
}

impl HybridConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        HybridConfig::default()
    }

    /// Builder: set the dense top-k cap
    pub fn with_dense_top_k_cap(mut self, cap: usize) -> Self {
        self.dense_top_k_cap = cap;
        self
    }

    /// Builder: set the dense similarity floor
    pub fn with_dense_min_score(mut self, min_score: f32) -> Self {
        self.dense_min_score = min_score;
        self
    }

    /// Builder: set the MMR lambda
    pub fn with_mmr_lambda(mut self, mmr_lambda: f32) -> Self {
        self.mmr_lambda = mmr_lambda;
        self
    }

    /// Builder: set the fusion weights
    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }
}
