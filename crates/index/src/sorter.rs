//! ResultSorter: bounded top-K selection over match candidates.
//!
//! A max-heap of size <= capacity keyed by rank (see `distance::rank_key`):
//! the root is always the current worst entry, so a better candidate
//! replaces it in O(log k). `close(true)` drains best-first.
//!
//! Shared by flat and graph `search_n`, and usable standalone to merge
//! candidate batches from multiple scans.

use crate::distance::rank_key;
use proxima_core::{DistanceMethod, Error, MatchResult, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A candidate with its precomputed rank key.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    key: f32,
    result: MatchResult,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.result.label == other.result.label
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties broken by label so ordering is total and deterministic.
        self.key
            .partial_cmp(&other.key)
            .unwrap_or(Ordering::Equal)
            .then(self.result.label.cmp(&other.result.label))
    }
}

/// Bounded top-K collector.
#[derive(Debug)]
pub struct ResultSorter {
    capacity: usize,
    method: DistanceMethod,
    heap: BinaryHeap<Ranked>,
}

impl ResultSorter {
    /// Create a collector holding at most `capacity` results.
    ///
    /// # Errors
    /// - `InvalidArgument` if `capacity` is 0
    pub fn new(capacity: usize, method: DistanceMethod) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument(
                "sorter capacity must be > 0".into(),
            ));
        }
        Ok(ResultSorter {
            capacity,
            method,
            heap: BinaryHeap::with_capacity(capacity + 1),
        })
    }

    /// Offer a batch of candidates, keeping the best `capacity` seen so far.
    pub fn update(&mut self, candidates: &[MatchResult]) {
        for candidate in candidates {
            self.offer(*candidate);
        }
    }

    /// Offer a single candidate.
    pub fn offer(&mut self, candidate: MatchResult) {
        let ranked = Ranked {
            key: rank_key(self.method, candidate.distance),
            result: candidate,
        };
        if self.heap.len() < self.capacity {
            self.heap.push(ranked);
        } else if let Some(worst) = self.heap.peek() {
            if ranked.cmp(worst) == Ordering::Less {
                self.heap.pop();
                self.heap.push(ranked);
            }
        }
    }

    /// Number of results currently held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Finish collection.
    ///
    /// With `extract`, returns the held results ranked best-first (ascending
    /// distance for Euclidean/Cosine, descending similarity for DotProduct).
    /// Without, drops the internal heap and returns an empty vec.
    pub fn close(self, extract: bool) -> Vec<MatchResult> {
        if !extract {
            return Vec::new();
        }
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|r| r.result)
            .collect()
    }
}
