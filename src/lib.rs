//! proximadb: an embeddable approximate-nearest-neighbor vector engine.
//!
//! The engine stores dense f32 vectors under u64 ids and answers
//! nearest-neighbor queries under Euclidean, dot-product, or cosine
//! distance. Three index families are available behind one handle type:
//!
//! - FLAT: exact linear scan, the correctness oracle
//! - NSW: single-layer navigable-small-world proximity graph
//! - HNSW: hierarchical NSW with logarithmic descent
//!
//! # Quick start
//!
//! ```
//! use proximadb::{DistanceMethod, IndexType, VectorIndex};
//!
//! let index = VectorIndex::new(IndexType::Flat, DistanceMethod::Euclidean, 3, None)?;
//! index.insert(1, &[1.0, 0.0, 0.0])?;
//! index.insert(2, &[0.0, 1.0, 0.0])?;
//!
//! let best = index.search(&[0.9, 0.1, 0.0])?;
//! assert_eq!(best.label, 1);
//!
//! index.close();
//! assert!(index.is_closed());
//! # Ok::<(), proximadb::Error>(())
//! ```
//!
//! Handles are `Send + Sync`; share one across threads with
//! `Arc<VectorIndex>`. Searches run concurrently, mutations serialize.

#![warn(missing_docs)]

mod index;

pub mod prelude;

pub use index::VectorIndex;
pub use proxima_core::{
    strerror, ContextUpdateMode, DistanceMethod, Error, ErrorCode, GraphContext, IndexStats,
    IndexType, MatchResult, Result, TimeStat,
};
pub use proxima_index::{AnnIndex, FlatIndex, GraphIndex, ResultSorter};
pub use proxima_persist::{Snapshot, SnapshotEntry};
