//! Basic Handle Operation Tests
//!
//! Insert, delete, contains, size, and the close lifecycle.

use crate::*;
use proximadb::ErrorCode;

// =============================================================================
// INSERT / CONTAINS / SIZE
// =============================================================================

#[test]
fn test_insert_contains_size() {
    let index = flat_index(DistanceMethod::Euclidean, 4);

    assert_eq!(index.size().unwrap(), 0);
    index.insert(10, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    index.insert(20, &[4.0, 3.0, 2.0, 1.0]).unwrap();

    assert_eq!(index.size().unwrap(), 2);
    assert!(index.contains(10).unwrap());
    assert!(index.contains(20).unwrap());
    assert!(!index.contains(30).unwrap());
}

#[test]
fn test_duplicate_insert_rejected() {
    for index in [
        flat_index(DistanceMethod::Euclidean, 2),
        hnsw_index(DistanceMethod::Euclidean, 2),
    ] {
        index.insert(7, &[1.0, 1.0]).unwrap();
        let err = index.insert(7, &[2.0, 2.0]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicatedEntry);
        assert_eq!(index.size().unwrap(), 1);
    }
}

#[test]
fn test_insert_wrong_dims_rejected() {
    let index = flat_index(DistanceMethod::Euclidean, 4);
    let err = index.insert(1, &[1.0, 2.0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidDimensions);
    assert_eq!(index.size().unwrap(), 0);
}

#[test]
fn test_insert_non_finite_rejected() {
    let index = flat_index(DistanceMethod::Euclidean, 2);
    let err = index.insert(1, &[1.0, f32::NAN]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidVector);
    let err = index.insert(1, &[f32::INFINITY, 0.0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidVector);
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn test_delete_removes_entry() {
    let index = flat_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[1.0, 1.0]).unwrap();
    index.insert(2, &[2.0, 2.0]).unwrap();

    index.delete(1).unwrap();
    assert!(!index.contains(1).unwrap());
    assert_eq!(index.size().unwrap(), 1);
}

#[test]
fn test_delete_missing_id_rejected() {
    let index = flat_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[1.0, 1.0]).unwrap();
    let err = index.delete(99).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFoundId);
}

#[test]
fn test_delete_then_reinsert_same_id() {
    for index in [
        flat_index(DistanceMethod::Euclidean, 2),
        hnsw_index(DistanceMethod::Euclidean, 2),
    ] {
        index.insert(5, &[1.0, 0.0]).unwrap();
        index.delete(5).unwrap();
        index.insert(5, &[0.0, 1.0]).unwrap();

        let best = index.search(&[0.0, 1.0]).unwrap();
        assert_eq!(best.label, 5);
        assert!(best.distance < 1e-6);
    }
}

// =============================================================================
// CLOSE LIFECYCLE
// =============================================================================

#[test]
fn test_close_invalidates_handle() {
    let index = hnsw_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[1.0, 1.0]).unwrap();

    assert!(!index.is_closed());
    index.close();
    assert!(index.is_closed());

    assert_eq!(
        index.insert(2, &[0.0, 0.0]).unwrap_err().code(),
        ErrorCode::InvalidIndex
    );
    assert_eq!(index.delete(1).unwrap_err().code(), ErrorCode::InvalidIndex);
    assert_eq!(
        index.search(&[1.0, 1.0]).unwrap_err().code(),
        ErrorCode::InvalidIndex
    );
    assert_eq!(
        index.search_n(&[1.0, 1.0], 3).unwrap_err().code(),
        ErrorCode::InvalidIndex
    );
    assert_eq!(index.contains(1).unwrap_err().code(), ErrorCode::InvalidIndex);
    assert_eq!(index.size().unwrap_err().code(), ErrorCode::InvalidIndex);
    assert_eq!(index.stats().unwrap_err().code(), ErrorCode::InvalidIndex);
}

#[test]
fn test_close_is_idempotent() {
    let index = flat_index(DistanceMethod::Euclidean, 2);
    index.close();
    index.close();
    index.close();
    assert!(index.is_closed());
}

// =============================================================================
// CONTEXT UPDATES
// =============================================================================

#[test]
fn test_update_context_modes() {
    use proximadb::ContextUpdateMode;

    let index = hnsw_index(DistanceMethod::Euclidean, 2);
    let tuned = GraphContext::new(64, 128, 16);

    index
        .update_context(tuned, ContextUpdateMode::Search)
        .unwrap();
    let ctx = index.context().unwrap().unwrap();
    assert_eq!(ctx.ef_search, 64);
    assert_eq!(ctx.ef_construct, 240);
    assert_eq!(ctx.max_degree, 32);

    index
        .update_context(tuned, ContextUpdateMode::Construct)
        .unwrap();
    let ctx = index.context().unwrap().unwrap();
    assert_eq!(ctx.ef_construct, 128);
    assert_eq!(ctx.max_degree, 16);

    index.update_context(tuned, ContextUpdateMode::All).unwrap();
    assert_eq!(index.context().unwrap(), Some(tuned));
}

#[test]
fn test_update_context_rejects_zero_field() {
    use proximadb::ContextUpdateMode;

    let index = nsw_index(DistanceMethod::Euclidean, 2);
    let bad = GraphContext::new(0, 240, 32);
    let err = index
        .update_context(bad, ContextUpdateMode::Search)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn test_update_context_flat_not_implemented() {
    use proximadb::ContextUpdateMode;

    let index = flat_index(DistanceMethod::Euclidean, 2);
    let err = index
        .update_context(GraphContext::nsw(), ContextUpdateMode::All)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotImplemented);
}
