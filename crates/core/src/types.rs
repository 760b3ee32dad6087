//! Core types shared by every index implementation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Index algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IndexType {
    /// Brute-force linear scan over all live entries. Exact.
    #[default]
    Flat,
    /// Navigable Small World: single-layer proximity graph. Approximate.
    Nsw,
    /// Hierarchical NSW: multi-layer proximity graph. Approximate.
    Hnsw,
}

impl IndexType {
    /// Human-readable name for display.
    pub fn name(&self) -> &'static str {
        match self {
            IndexType::Flat => "flat",
            IndexType::Nsw => "nsw",
            IndexType::Hnsw => "hnsw",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flat" | "brute_force" => Some(IndexType::Flat),
            "nsw" => Some(IndexType::Nsw),
            "hnsw" => Some(IndexType::Hnsw),
            _ => None,
        }
    }

    /// Serialization value for the dump format.
    pub fn to_byte(&self) -> u8 {
        match self {
            IndexType::Flat => 0,
            IndexType::Nsw => 1,
            IndexType::Hnsw => 2,
        }
    }

    /// Deserialization from the dump format.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(IndexType::Flat),
            1 => Some(IndexType::Nsw),
            2 => Some(IndexType::Hnsw),
            _ => None,
        }
    }

    /// Graph types require a tuning context at construction.
    pub fn requires_context(&self) -> bool {
        !matches!(self, IndexType::Flat)
    }
}

impl std::fmt::Display for IndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Distance method for similarity calculation.
///
/// Euclidean and Cosine are distances: lower = closer, identity value 0.
/// DotProduct is a similarity: higher = closer, results sort descending by
/// raw value. Internal comparisons normalize all three to one ascending
/// order via a rank key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceMethod {
    /// L2 norm of the difference. Non-negative, 0 iff identical.
    #[default]
    Euclidean,
    /// Raw inner product. Unbounded, may be negative, higher = closer.
    DotProduct,
    /// 1 - cosine similarity. Range [0, 2], 0 iff identical direction.
    Cosine,
}

impl DistanceMethod {
    /// Human-readable name for display.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMethod::Euclidean => "euclidean",
            DistanceMethod::DotProduct => "dot_product",
            DistanceMethod::Cosine => "cosine",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" => Some(DistanceMethod::Euclidean),
            "dot_product" | "dot" | "inner_product" => Some(DistanceMethod::DotProduct),
            "cosine" => Some(DistanceMethod::Cosine),
            _ => None,
        }
    }

    /// Serialization value for the dump format.
    pub fn to_byte(&self) -> u8 {
        match self {
            DistanceMethod::Euclidean => 0,
            DistanceMethod::DotProduct => 1,
            DistanceMethod::Cosine => 2,
        }
    }

    /// Deserialization from the dump format.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(DistanceMethod::Euclidean),
            1 => Some(DistanceMethod::DotProduct),
            2 => Some(DistanceMethod::Cosine),
            _ => None,
        }
    }

    /// True if results sort ascending by reported value (distances);
    /// false for DotProduct, which sorts descending (similarity).
    pub fn ascending(&self) -> bool {
        !matches!(self, DistanceMethod::DotProduct)
    }
}

impl std::fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tuning context for graph indexes. Immaterial to FLAT.
///
/// NSW interprets `max_degree` as node out-degree; HNSW interprets it as M0,
/// the layer-0 connection cap (upper layers use half).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphContext {
    /// Candidate-frontier width during search. Larger = higher recall, slower.
    pub ef_search: usize,
    /// Candidate-frontier width during construction. Larger = better graph, slower insert.
    pub ef_construct: usize,
    /// Maximum neighbor connections per node (M0 for HNSW layer 0).
    pub max_degree: usize,
}

impl GraphContext {
    /// Construct with explicit values. Validation happens at index allocation.
    pub fn new(ef_search: usize, ef_construct: usize, max_degree: usize) -> Self {
        GraphContext {
            ef_search,
            ef_construct,
            max_degree,
        }
    }

    /// Default NSW tuning.
    pub fn nsw() -> Self {
        GraphContext::new(240, 240, 32)
    }

    /// Default HNSW tuning.
    pub fn hnsw() -> Self {
        GraphContext::new(240, 240, 32)
    }

    /// All fields must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.ef_search == 0 {
            return Err(Error::InvalidArgument("ef_search must be > 0".into()));
        }
        if self.ef_construct == 0 {
            return Err(Error::InvalidArgument("ef_construct must be > 0".into()));
        }
        if self.max_degree == 0 {
            return Err(Error::InvalidArgument("max_degree must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for GraphContext {
    fn default() -> Self {
        GraphContext::new(240, 240, 32)
    }
}

/// Which context fields a runtime re-tune applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextUpdateMode {
    /// Apply `ef_search` only.
    Search,
    /// Apply `ef_construct` and `max_degree` (affects future inserts/prunes).
    Construct,
    /// Apply every field.
    All,
}

/// Single search result: the matched id and its reported distance/similarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Id of the matched entry.
    pub label: u64,
    /// Reported value: distance for Euclidean/Cosine, raw dot product for
    /// DotProduct.
    pub distance: f32,
}

impl MatchResult {
    /// Create a new MatchResult.
    pub fn new(label: u64, distance: f32) -> Self {
        MatchResult { label, distance }
    }
}
