//! The `AnnIndex` trait and index factory.
//!
//! Defines the interface every index type implements. The trait is
//! object-safe so the facade can hold any index behind one handle type.

use crate::flat::FlatIndex;
use crate::graph::GraphIndex;
use crate::store::VectorStore;
use proxima_core::{
    ContextUpdateMode, DistanceMethod, Error, GraphContext, IndexType, MatchResult, Result,
};

/// Interface for swappable index implementations.
///
/// Search results report distances for Euclidean/Cosine (ascending order)
/// and raw similarities for DotProduct (descending order); see
/// `distance::rank_key` for the shared comparison discipline.
pub trait AnnIndex: Send + Sync {
    /// Insert a vector under a new id.
    ///
    /// # Errors
    /// - `DuplicatedEntry` if the id is already present
    /// - `InvalidDimensions` / `InvalidVector` on a malformed payload
    fn insert(&mut self, id: u64, vector: &[f32]) -> Result<()>;

    /// Delete the entry stored under `id`.
    ///
    /// A deleted id never appears in any subsequent search result.
    ///
    /// # Errors
    /// - `NotFoundId` if the id is not present
    fn delete(&mut self, id: u64) -> Result<()>;

    /// Return the single best match for `query`.
    ///
    /// # Errors
    /// - `IndexEmpty` if the index holds no live entries
    /// - `InvalidDimensions` / `InvalidVector` on a malformed query
    fn search(&self, query: &[f32]) -> Result<MatchResult>;

    /// Return up to `n` best matches for `query`, ranked best-first.
    ///
    /// # Errors
    /// - `InvalidArgument` if `n` is 0, plus everything `search` can return
    fn search_n(&self, query: &[f32], n: usize) -> Result<Vec<MatchResult>>;

    /// Check whether `id` holds a live entry.
    fn contains(&self, id: u64) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Check if the index holds no live entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured dimensionality.
    fn dims(&self) -> u16;

    /// Configured distance method.
    fn method(&self) -> DistanceMethod;

    /// Index algorithm family.
    fn index_type(&self) -> IndexType;

    /// Current tuning context (None for FLAT).
    fn context(&self) -> Option<GraphContext>;

    /// Re-tune the index at runtime without rebuilding.
    ///
    /// # Errors
    /// - `NotImplemented` for FLAT
    /// - `InvalidArgument` if an applied field is 0
    fn update_context(&mut self, ctx: GraphContext, mode: ContextUpdateMode) -> Result<()>;

    /// The live id-to-vector mapping (for persistence and introspection).
    fn store(&self) -> &VectorStore;
}

impl std::fmt::Debug for dyn AnnIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnIndex")
            .field("index_type", &self.index_type())
            .field("method", &self.method())
            .field("dims", &self.dims())
            .field("len", &self.len())
            .finish()
    }
}

/// Allocate an index of the requested type.
///
/// The context is required and validated for graph types, ignored for FLAT.
///
/// # Errors
/// - `InvalidInit` if `dims` is 0
/// - `InvalidArgument` if a graph type is missing a context or the context
///   has a non-positive field
pub fn create_index(
    index_type: IndexType,
    method: DistanceMethod,
    dims: u16,
    context: Option<GraphContext>,
) -> Result<Box<dyn AnnIndex>> {
    if dims == 0 {
        return Err(Error::InvalidInit("dims must be > 0".into()));
    }
    match index_type {
        IndexType::Flat => Ok(Box::new(FlatIndex::new(method, dims))),
        IndexType::Nsw => {
            let ctx = context.ok_or_else(|| {
                Error::InvalidArgument("nsw index requires a graph context".into())
            })?;
            Ok(Box::new(GraphIndex::new_nsw(method, dims, ctx)?))
        }
        IndexType::Hnsw => {
            let ctx = context.ok_or_else(|| {
                Error::InvalidArgument("hnsw index requires a graph context".into())
            })?;
            Ok(Box::new(GraphIndex::new_hnsw(method, dims, ctx)?))
        }
    }
}
