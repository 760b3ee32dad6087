//! Index algorithms for the Proxima engine.
//!
//! This crate provides:
//!
//! - **VectorStore**: id-to-vector mapping with payload validation
//! - **distance**: Euclidean/DotProduct/Cosine evaluation and the shared
//!   rank-key comparison discipline
//! - **ResultSorter**: bounded top-K selection
//! - **FlatIndex**: exact brute-force scan (the correctness oracle)
//! - **GraphIndex**: NSW and HNSW proximity graphs with tombstone deletes
//! - **AnnIndex**: the object-safe backend trait plus `create_index` factory
//! - **StatsRecorder**: per-operation timing aggregation

#![warn(missing_docs)]

pub mod backend;
pub mod distance;
pub mod flat;
pub mod graph;
pub mod sorter;
pub mod stats;
pub mod store;

pub use backend::{create_index, AnnIndex};
pub use flat::FlatIndex;
pub use graph::GraphIndex;
pub use sorter::ResultSorter;
pub use stats::{OpKind, StatsRecorder};
pub use store::{check_vector, VectorStore};
