//! Portable JSON snapshot format.
//!
//! Engine-independent fallback to the native binary dump: a snapshot holds
//! the index configuration and every live (id, vector) pair as plain JSON.
//! Restoring re-runs insert for each entry against a freshly allocated
//! index, so snapshots survive format-version changes in the binary codec.

use proxima_core::{DistanceMethod, Error, GraphContext, IndexType, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Entry id.
    pub id: u64,
    /// Vector payload.
    pub vector: Vec<f32>,
}

/// Full snapshot of an index's observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Dimensionality.
    pub dims: u16,
    /// Index algorithm family.
    pub index_type: IndexType,
    /// Distance method.
    pub method: DistanceMethod,
    /// Tuning context (None for FLAT).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<GraphContext>,
    /// Live entries.
    pub entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Write the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// - `FileIo` on any write failure
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::System(format!("snapshot serialization failed: {}", e)))?;
        fs::write(path, json)?;
        debug!(path = %path.display(), entries = self.entries.len(), "snapshot saved");
        Ok(())
    }

    /// Read and validate a snapshot file.
    ///
    /// # Errors
    /// - `FileIo` if the file cannot be read
    /// - `InvalidFile` if the content is not a valid snapshot
    pub fn load(path: &Path) -> Result<Snapshot> {
        let json = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&json)
            .map_err(|e| Error::InvalidFile(format!("not a snapshot: {}", e)))?;
        if snapshot.dims == 0 {
            return Err(Error::InvalidFile("zero dims".into()));
        }
        if snapshot.index_type.requires_context() {
            let ctx = snapshot
                .context
                .ok_or_else(|| Error::InvalidFile("graph snapshot without context".into()))?;
            ctx.validate()
                .map_err(|_| Error::InvalidFile("invalid graph context".into()))?;
        }
        for entry in &snapshot.entries {
            if entry.vector.len() != snapshot.dims as usize {
                return Err(Error::InvalidFile(format!(
                    "entry {} has {} components, expected {}",
                    entry.id,
                    entry.vector.len(),
                    snapshot.dims
                )));
            }
        }
        debug!(path = %path.display(), entries = snapshot.entries.len(), "snapshot loaded");
        Ok(snapshot)
    }
}
