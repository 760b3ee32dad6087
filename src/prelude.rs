//! Convenience re-exports for typical usage.
//!
//! ```
//! use proximadb::prelude::*;
//! ```

pub use crate::{
    ContextUpdateMode, DistanceMethod, Error, ErrorCode, GraphContext, IndexStats, IndexType,
    MatchResult, Result, VectorIndex,
};
