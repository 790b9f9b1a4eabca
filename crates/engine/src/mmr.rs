//! Maximal Marginal Relevance selection
//!
//! Greedy selection balancing relevance to the query against redundancy with
//! already-selected items. At each step the unselected candidate maximizing
//!
//! `lambda * relevance - (1 - lambda) * max_similarity_to_selected`
//!
//! is picked. Ties resolve to the earliest candidate in preselection order,
//! which keeps selection deterministic.
//!
//! `lambda = 1` degenerates to pure relevance ranking; `lambda = 0` to pure
//! diversity (the first pick is still the most relevant candidate, because
//! the redundancy term is 0 against an empty selection).

use crate::distance::dot_product;

/// A preselected candidate: position in the store plus raw relevance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Index into the store's chunk list
    pub index: usize,

    /// Raw relevance score (cosine similarity to the query)
    pub relevance: f32,
}

impl Candidate {
    /// Create a new Candidate
    pub fn new(index: usize, relevance: f32) -> Self {
        Candidate { index, relevance }
    }
}

/// Greedily select up to `limit` candidates by marginal relevance
///
/// `candidates` must already be in preselection order (relevance descending);
/// ties during selection resolve to the earliest entry. `embedding_of` maps a
/// candidate's index to its unit-length embedding. Returns the selected
/// candidates in selection order; callers re-sort by raw relevance for
/// presentation.
pub fn select<'a, F>(
    candidates: &[Candidate],
    embedding_of: F,
    lambda: f32,
    limit: usize,
) -> Vec<Candidate>
where
    F: Fn(usize) -> &'a [f32],
{
    if limit == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut selected: Vec<Candidate> = Vec::with_capacity(limit.min(candidates.len()));
    let mut remaining: Vec<Candidate> = candidates.to_vec();

    while selected.len() < limit && !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_score = f32::NEG_INFINITY;

        for (pos, candidate) in remaining.iter().enumerate() {
            let redundancy = selected
                .iter()
                .map(|s| dot_product(embedding_of(candidate.index), embedding_of(s.index)))
                .fold(f32::NEG_INFINITY, f32::max);
            // Empty selection: no redundancy penalty
            let redundancy = if selected.is_empty() { 0.0 } else { redundancy };

            let marginal = lambda * candidate.relevance - (1.0 - lambda) * redundancy;
            // Strict comparison keeps the earliest candidate on ties
            if marginal > best_score {
                best_score = marginal;
                best_pos = pos;
            }
        }

        selected.push(remaining.remove(best_pos));
    }

    selected
}
