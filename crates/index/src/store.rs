//! VectorStore: id-to-vector mapping shared by all index types.
//!
//! The store owns the raw vector payloads and enforces the two payload
//! invariants before any state changes: length must equal the configured
//! dimensionality, and every component must be finite.
//!
//! BTreeMap keeps iteration deterministic (ascending id), which makes flat
//! tie-breaking and dump ordering reproducible.

use proxima_core::{Error, Result};
use std::collections::BTreeMap;

/// Validate a vector payload against the configured dimensionality.
///
/// Length mismatch beats finiteness: a wrong-sized vector reports
/// `InvalidDimensions` even if it also contains NaN.
pub fn check_vector(dims: u16, vector: &[f32]) -> Result<()> {
    if vector.len() != dims as usize {
        return Err(Error::InvalidDimensions {
            expected: dims,
            actual: vector.len(),
        });
    }
    if let Some(pos) = vector.iter().position(|v| !v.is_finite()) {
        return Err(Error::InvalidVector(format!(
            "non-finite component at position {}",
            pos
        )));
    }
    Ok(())
}

/// Id-to-vector mapping with fixed dimensionality.
#[derive(Debug, Clone)]
pub struct VectorStore {
    dims: u16,
    entries: BTreeMap<u64, Vec<f32>>,
}

impl VectorStore {
    /// Create an empty store for `dims`-dimensional vectors.
    pub fn new(dims: u16) -> Self {
        VectorStore {
            dims,
            entries: BTreeMap::new(),
        }
    }

    /// Configured dimensionality.
    pub fn dims(&self) -> u16 {
        self.dims
    }

    /// Insert a vector under `id`.
    ///
    /// # Errors
    /// - `InvalidDimensions` / `InvalidVector` if the payload is malformed
    /// - `DuplicatedEntry` if `id` is already present
    pub fn put(&mut self, id: u64, vector: Vec<f32>) -> Result<()> {
        check_vector(self.dims, &vector)?;
        if self.entries.contains_key(&id) {
            return Err(Error::DuplicatedEntry(id));
        }
        self.entries.insert(id, vector);
        Ok(())
    }

    /// Remove the vector stored under `id`.
    ///
    /// # Errors
    /// - `NotFoundId` if `id` is not present
    pub fn remove(&mut self, id: u64) -> Result<Vec<f32>> {
        self.entries.remove(&id).ok_or(Error::NotFoundId(id))
    }

    /// Get the vector stored under `id`.
    pub fn get(&self, id: u64) -> Result<&[f32]> {
        self.entries
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(Error::NotFoundId(id))
    }

    /// Check whether `id` is present.
    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over live entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[f32])> {
        self.entries.iter().map(|(id, v)| (*id, v.as_slice()))
    }
}
