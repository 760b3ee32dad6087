//! Core types for the Proxima index engine.
//!
//! This crate defines the shared vocabulary of the engine: index and
//! distance-method enums, graph tuning contexts, search results, timing
//! statistics, and the error/status taxonomy. Implementation logic
//! (distance calculation, indexing, persistence) lives in the other
//! workspace crates.

#![warn(missing_docs)]

pub mod error;
pub mod stats;
pub mod types;

pub use error::{strerror, Error, ErrorCode, Result};
pub use stats::{IndexStats, TimeStat};
pub use types::{ContextUpdateMode, DistanceMethod, GraphContext, IndexType, MatchResult};
