//! Edge Case and Error Discipline Tests
//!
//! Empty-index behavior, argument validation, allocation failures, and
//! the status-code table.

use crate::*;
use proximadb::{strerror, ErrorCode, VectorIndex};

// =============================================================================
// EMPTY INDEX
// =============================================================================

#[test]
fn test_search_empty_index() {
    for index in [
        flat_index(DistanceMethod::Euclidean, 2),
        nsw_index(DistanceMethod::Euclidean, 2),
        hnsw_index(DistanceMethod::Euclidean, 2),
    ] {
        let err = index.search(&[0.0, 0.0]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IndexEmpty);
        let err = index.search_n(&[0.0, 0.0], 3).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IndexEmpty);
    }
}

#[test]
fn test_single_entry_index() {
    let index = hnsw_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[5.0, 5.0]).unwrap();

    let best = index.search(&[0.0, 0.0]).unwrap();
    assert_eq!(best.label, 1);
    let results = index.search_n(&[0.0, 0.0], 10).unwrap();
    assert_eq!(results.len(), 1);
}

// =============================================================================
// ARGUMENT VALIDATION
// =============================================================================

#[test]
fn test_search_n_zero_rejected() {
    let index = flat_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[1.0, 1.0]).unwrap();
    let err = index.search_n(&[1.0, 1.0], 0).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn test_query_dims_mismatch_rejected() {
    let index = flat_index(DistanceMethod::Euclidean, 4);
    index.insert(1, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let err = index.search(&[1.0, 2.0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidDimensions);
}

#[test]
fn test_query_non_finite_rejected() {
    let index = hnsw_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[1.0, 1.0]).unwrap();
    let err = index.search(&[f32::NAN, 0.0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidVector);
}

#[test]
fn test_alloc_zero_dims_rejected() {
    let err =
        VectorIndex::new(IndexType::Flat, DistanceMethod::Euclidean, 0, None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInit);
}

#[test]
fn test_alloc_graph_without_context_rejected() {
    for ty in [IndexType::Nsw, IndexType::Hnsw] {
        let err = VectorIndex::new(ty, DistanceMethod::Euclidean, 4, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }
}

#[test]
fn test_alloc_invalid_context_rejected() {
    let bad = GraphContext::new(240, 240, 0);
    let err =
        VectorIndex::new(IndexType::Hnsw, DistanceMethod::Euclidean, 4, Some(bad)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

// =============================================================================
// DEGENERATE VECTORS
// =============================================================================

#[test]
fn test_cosine_zero_vector_is_farthest() {
    let index = flat_index(DistanceMethod::Cosine, 2);
    index.insert(1, &[0.0, 0.0]).unwrap();
    index.insert(2, &[1.0, 0.0]).unwrap();

    // A zero-norm operand pins the distance at 1.0, never NaN.
    let results = index.search_n(&[1.0, 0.0], 2).unwrap();
    assert_eq!(results[0].label, 2);
    assert_eq!(results[1].label, 1);
    assert!((results[1].distance - 1.0).abs() < 1e-6);
    assert!(!results[1].distance.is_nan());
}

#[test]
fn test_identical_vectors_under_distinct_ids() {
    let index = flat_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[1.0, 1.0]).unwrap();
    index.insert(2, &[1.0, 1.0]).unwrap();
    index.insert(3, &[1.0, 1.0]).unwrap();

    // Ties break toward the lowest id.
    let best = index.search(&[1.0, 1.0]).unwrap();
    assert_eq!(best.label, 1);
    let results = index.search_n(&[1.0, 1.0], 3).unwrap();
    assert_eq!(results.len(), 3);
}

// =============================================================================
// STATUS CODE TABLE
// =============================================================================

#[test]
fn test_error_code_raw_values() {
    assert_eq!(ErrorCode::Success.as_raw(), 0);
    assert_eq!(ErrorCode::InvalidInit.as_raw(), 1);
    assert_eq!(ErrorCode::InvalidIndex.as_raw(), 2);
    assert_eq!(ErrorCode::FileIoError.as_raw(), 15);
    assert_eq!(ErrorCode::InvalidFile.as_raw(), 17);
}

#[test]
fn test_strerror_known_and_unknown() {
    assert_eq!(strerror(ErrorCode::Success), "success");
    assert!(!strerror(ErrorCode::IndexEmpty).is_empty());
    for raw in 0..=17 {
        let code = ErrorCode::from_raw(raw).unwrap();
        assert_eq!(code.as_raw(), raw);
        assert!(!strerror(code).is_empty());
    }
    assert!(ErrorCode::from_raw(18).is_none());
    assert!(ErrorCode::from_raw(-1).is_none());
}
