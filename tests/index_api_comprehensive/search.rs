//! Search Semantics Tests
//!
//! Ordering guarantees across index types and distance methods, top-k
//! behavior, and the deleted-entries-never-returned rule.

use crate::*;
use proximadb::ErrorCode;

// =============================================================================
// NEAREST-NEIGHBOR ORDERING
// =============================================================================

#[test]
fn test_single_entry_insert_search_delete_cycle() {
    let index = flat_index(DistanceMethod::Euclidean, 128);
    let v: Vec<f32> = (0..128).map(|i| i as f32 / 128.0).collect();

    index.insert(1, &v).unwrap();
    let best = index.search(&v).unwrap();
    assert_eq!(best.label, 1);
    assert_eq!(best.distance, 0.0);

    index.delete(1).unwrap();
    let err = index.search(&v).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IndexEmpty);
}

#[test]
fn test_flat_euclidean_ramp_nearest() {
    let index = flat_index(DistanceMethod::Euclidean, 128);
    fill_ramp(&index, 100);

    // Query sits exactly on entry 37's ramp value.
    let best = index.search(&ramp_vector(37)).unwrap();
    assert_eq!(best.label, 37);
    assert!(best.distance < 1e-6);

    // Off-grid query lands on the closest ramp step.
    let query = vec![37.4 / 128.0; 128];
    assert_eq!(index.search(&query).unwrap().label, 37);
    let query = vec![37.6 / 128.0; 128];
    assert_eq!(index.search(&query).unwrap().label, 38);
}

#[test]
fn test_search_n_returns_ascending_distances() {
    let index = flat_index(DistanceMethod::Euclidean, 128);
    fill_ramp(&index, 100);

    let results = index.search_n(&ramp_vector(50), 10).unwrap();
    assert_eq!(results.len(), 10);
    assert_eq!(results[0].label, 50);
    for pair in results.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
    // The 10 nearest ramp entries to 50 all lie within 5 steps.
    for r in &results {
        assert!((45..=55).contains(&r.label), "unexpected label {}", r.label);
    }
}

#[test]
fn test_search_n_caps_at_live_count() {
    let index = flat_index(DistanceMethod::Euclidean, 2);
    index.insert(1, &[0.0, 0.0]).unwrap();
    index.insert(2, &[1.0, 0.0]).unwrap();
    index.insert(3, &[2.0, 0.0]).unwrap();

    let results = index.search_n(&[0.0, 0.0], 10).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].label, 1);
}

#[test]
fn test_dot_product_orders_descending() {
    for index in [
        flat_index(DistanceMethod::DotProduct, 2),
        hnsw_index(DistanceMethod::DotProduct, 2),
    ] {
        index.insert(1, &[1.0, 0.0]).unwrap();
        index.insert(2, &[2.0, 0.0]).unwrap();
        index.insert(3, &[3.0, 0.0]).unwrap();

        // Highest similarity wins under dot product.
        let best = index.search(&[1.0, 0.0]).unwrap();
        assert_eq!(best.label, 3);
        assert!((best.distance - 3.0).abs() < 1e-6);

        let results = index.search_n(&[1.0, 0.0], 3).unwrap();
        let labels: Vec<u64> = results.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![3, 2, 1]);
        for pair in results.windows(2) {
            assert!(pair[0].distance >= pair[1].distance);
        }
    }
}

#[test]
fn test_cosine_ignores_magnitude() {
    let index = flat_index(DistanceMethod::Cosine, 2);
    index.insert(1, &[100.0, 0.0]).unwrap();
    index.insert(2, &[0.0, 0.01]).unwrap();

    let best = index.search(&[0.5, 0.0]).unwrap();
    assert_eq!(best.label, 1);
    assert!(best.distance < 1e-6);
}

// =============================================================================
// GRAPH INDEX RECALL
// =============================================================================

#[test]
fn test_hnsw_matches_flat_on_ramp() {
    let flat = flat_index(DistanceMethod::Euclidean, 128);
    let hnsw = hnsw_index(DistanceMethod::Euclidean, 128);
    fill_ramp(&flat, 200);
    fill_ramp(&hnsw, 200);

    for probe in [0u64, 1, 50, 99, 150, 199] {
        let query = ramp_vector(probe);
        let exact = flat.search(&query).unwrap();
        let approx = hnsw.search(&query).unwrap();
        assert_eq!(approx.label, exact.label, "probe {}", probe);
    }
}

#[test]
fn test_nsw_top_k_recall() {
    let flat = flat_index(DistanceMethod::Euclidean, 8);
    let nsw = nsw_index(DistanceMethod::Euclidean, 8);

    // Deterministic scattered points.
    for i in 0..150u64 {
        let v: Vec<f32> = (0..8)
            .map(|d| ((i * 31 + d * 17) % 97) as f32 / 97.0)
            .collect();
        flat.insert(i, &v).unwrap();
        nsw.insert(i, &v).unwrap();
    }

    let query = vec![0.5; 8];
    let exact: Vec<u64> = flat
        .search_n(&query, 10)
        .unwrap()
        .iter()
        .map(|r| r.label)
        .collect();
    let approx: Vec<u64> = nsw
        .search_n(&query, 10)
        .unwrap()
        .iter()
        .map(|r| r.label)
        .collect();

    // With ef_search=240 over 150 points the beam covers everything.
    let hits = approx.iter().filter(|l| exact.contains(l)).count();
    assert!(hits >= 9, "recall {}/10 too low", hits);
}

// =============================================================================
// DELETED ENTRIES
// =============================================================================

#[test]
fn test_deleted_ids_never_returned() {
    for index in [
        flat_index(DistanceMethod::Euclidean, 128),
        nsw_index(DistanceMethod::Euclidean, 128),
        hnsw_index(DistanceMethod::Euclidean, 128),
    ] {
        fill_ramp(&index, 60);
        for id in (0..60u64).step_by(2) {
            index.delete(id).unwrap();
        }

        let results = index.search_n(&ramp_vector(30), 20).unwrap();
        assert!(!results.is_empty());
        for r in &results {
            assert!(r.label % 2 == 1, "deleted id {} surfaced", r.label);
        }
    }
}

#[test]
fn test_delete_everything_then_search_empty() {
    let index = hnsw_index(DistanceMethod::Euclidean, 2);
    for i in 0..10u64 {
        index.insert(i, &[i as f32, 0.0]).unwrap();
    }
    for i in 0..10u64 {
        index.delete(i).unwrap();
    }

    assert_eq!(index.size().unwrap(), 0);
    let err = index.search(&[1.0, 0.0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IndexEmpty);
}
