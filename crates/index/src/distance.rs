//! Distance and similarity computation over fixed-dimension f32 vectors.
//!
//! Reported values keep each method's natural semantics: Euclidean and
//! Cosine are distances (lower = closer), DotProduct is a similarity
//! (higher = closer). Everything that needs a single comparison discipline
//! goes through [`rank_key`], which maps reported values to an ascending
//! order for all three methods.

use proxima_core::DistanceMethod;

/// L2 norm of the difference. Non-negative, 0 iff identical.
pub fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        let d = x - y;
        sum += d * d;
    }
    sum.sqrt()
}

/// Raw inner product. Unbounded, may be negative.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += x * y;
    }
    sum
}

/// 1 - cosine similarity, in [0, 2]. 0 iff identical direction.
///
/// A zero-norm operand has no direction; the pair is treated as orthogonal
/// (distance 1.0) rather than letting NaN propagate.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot_sum = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot_sum += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot_sum / (norm_a.sqrt() * norm_b.sqrt())
}

/// Compute the reported value for `method`.
pub fn evaluate(method: DistanceMethod, a: &[f32], b: &[f32]) -> f32 {
    match method {
        DistanceMethod::Euclidean => euclidean(a, b),
        DistanceMethod::DotProduct => dot(a, b),
        DistanceMethod::Cosine => cosine(a, b),
    }
}

/// Map a reported value to an ascending sort key (smaller = closer).
///
/// Identity for distances, negation for DotProduct. The mapping is an
/// involution, so [`raw_from_key`] is the same operation.
pub fn rank_key(method: DistanceMethod, reported: f32) -> f32 {
    if method.ascending() {
        reported
    } else {
        -reported
    }
}

/// Recover the reported value from a rank key.
pub fn raw_from_key(method: DistanceMethod, key: f32) -> f32 {
    rank_key(method, key)
}
