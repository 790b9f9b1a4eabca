//! Vector math for similarity computation
//!
//! The store keeps every embedding L2-normalized, so cosine similarity
//! reduces to a dot product of unit vectors. All scores are "higher = more
//! similar" and lie in [-1, 1]. Functions are single-threaded for
//! determinism.

/// Dot product (inner product)
///
/// For unit vectors this IS cosine similarity, range [-1, 1].
/// Callers must pass equal-length slices; length validation happens at the
/// store boundary.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "Dimension mismatch in similarity computation"
    );
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm (Euclidean length)
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Return an L2-normalized copy of a vector
///
/// A zero vector has no direction; it is returned as-is (all zeros) and
/// scores 0 against everything, rather than producing NaN.
pub fn normalized(v: &[f32]) -> Vec<f32> {
    let norm = l2_norm(v);
    if norm == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / norm).collect()
}
