//! Index API Comprehensive Test Suite
//!
//! End-to-end tests for the `VectorIndex` handle: lifecycle, search
//! semantics across all index types and distance methods, durability,
//! error discipline, statistics, and shared-handle concurrency.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test index_api_comprehensive
//!
//! # Run search ordering tests only
//! cargo test --test index_api_comprehensive search::
//! ```

use proximadb::{DistanceMethod, GraphContext, IndexType, VectorIndex};

// Test modules
pub mod basic_ops;
pub mod edge_cases;
pub mod search;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Route engine logs through the test harness capture. Safe to call from
/// every test; only the first call installs a subscriber.
fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Allocate a FLAT index for exact-result tests.
pub fn flat_index(method: DistanceMethod, dims: u16) -> VectorIndex {
    init_logging();
    VectorIndex::new(IndexType::Flat, method, dims, None).expect("failed to allocate flat index")
}

/// Allocate an HNSW index with default tuning.
pub fn hnsw_index(method: DistanceMethod, dims: u16) -> VectorIndex {
    init_logging();
    VectorIndex::new(IndexType::Hnsw, method, dims, Some(GraphContext::hnsw()))
        .expect("failed to allocate hnsw index")
}

/// Allocate an NSW index with default tuning.
pub fn nsw_index(method: DistanceMethod, dims: u16) -> VectorIndex {
    init_logging();
    VectorIndex::new(IndexType::Nsw, method, dims, Some(GraphContext::nsw()))
        .expect("failed to allocate nsw index")
}

/// A 128-dim vector filled with the constant `i / 128`.
pub fn ramp_vector(i: u64) -> Vec<f32> {
    vec![i as f32 / 128.0; 128]
}

/// Insert `count` ramp vectors under ids `0..count`.
pub fn fill_ramp(index: &VectorIndex, count: u64) {
    for i in 0..count {
        index.insert(i, &ramp_vector(i)).expect("insert failed");
    }
}
