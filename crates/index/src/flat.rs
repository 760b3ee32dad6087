//! FlatIndex: brute-force linear scan.
//!
//! Exact, O(N * dims) per query. This is the correctness oracle the graph
//! indexes are validated against.

use crate::backend::AnnIndex;
use crate::distance::{evaluate, rank_key};
use crate::sorter::ResultSorter;
use crate::store::{check_vector, VectorStore};
use proxima_core::{
    ContextUpdateMode, DistanceMethod, Error, GraphContext, IndexType, MatchResult, Result,
};

/// Brute-force index over the vector store.
#[derive(Debug)]
pub struct FlatIndex {
    store: VectorStore,
    method: DistanceMethod,
}

impl FlatIndex {
    /// Create an empty flat index.
    pub fn new(method: DistanceMethod, dims: u16) -> Self {
        FlatIndex {
            store: VectorStore::new(dims),
            method,
        }
    }
}

impl AnnIndex for FlatIndex {
    fn insert(&mut self, id: u64, vector: &[f32]) -> Result<()> {
        self.store.put(id, vector.to_vec())
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        self.store.remove(id).map(|_| ())
    }

    fn search(&self, query: &[f32]) -> Result<MatchResult> {
        check_vector(self.store.dims(), query)?;
        if self.store.is_empty() {
            return Err(Error::IndexEmpty);
        }
        // Ascending-id iteration makes tie-breaking deterministic: the
        // lowest id among equally distant entries wins.
        let mut best: Option<MatchResult> = None;
        let mut best_key = f32::INFINITY;
        for (id, vector) in self.store.iter() {
            let reported = evaluate(self.method, query, vector);
            let key = rank_key(self.method, reported);
            if key < best_key {
                best_key = key;
                best = Some(MatchResult::new(id, reported));
            }
        }
        // Non-empty store always yields a candidate.
        best.ok_or(Error::IndexEmpty)
    }

    fn search_n(&self, query: &[f32], n: usize) -> Result<Vec<MatchResult>> {
        check_vector(self.store.dims(), query)?;
        if n == 0 {
            return Err(Error::InvalidArgument("search_n requires n > 0".into()));
        }
        if self.store.is_empty() {
            return Err(Error::IndexEmpty);
        }
        let mut sorter = ResultSorter::new(n, self.method)?;
        for (id, vector) in self.store.iter() {
            sorter.offer(MatchResult::new(id, evaluate(self.method, query, vector)));
        }
        Ok(sorter.close(true))
    }

    fn contains(&self, id: u64) -> bool {
        self.store.contains(id)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn dims(&self) -> u16 {
        self.store.dims()
    }

    fn method(&self) -> DistanceMethod {
        self.method
    }

    fn index_type(&self) -> IndexType {
        IndexType::Flat
    }

    fn context(&self) -> Option<GraphContext> {
        None
    }

    fn update_context(&mut self, _ctx: GraphContext, _mode: ContextUpdateMode) -> Result<()> {
        Err(Error::NotImplemented(
            "flat index has no tuning context",
        ))
    }

    fn store(&self) -> &VectorStore {
        &self.store
    }
}
