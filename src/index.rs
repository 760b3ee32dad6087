//! The `VectorIndex` handle.
//!
//! One handle wraps one index behind a reader-writer lock. Reads (search,
//! contains, size, stats) run concurrently; writes (insert, delete,
//! update_context) take the lock exclusively. A closed handle rejects every
//! operation with `InvalidIndex`, and closing twice is a no-op.

use parking_lot::{Mutex, RwLock};
use proxima_core::{
    ContextUpdateMode, DistanceMethod, Error, GraphContext, IndexStats, IndexType, MatchResult,
    Result,
};
use proxima_index::{create_index, AnnIndex, OpKind, StatsRecorder};
use proxima_persist::{codec, Snapshot, SnapshotEntry};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Thread-safe handle to a vector index.
///
/// `VectorIndex` is `Send + Sync`; clone-free sharing works through
/// `Arc<VectorIndex>`. All mutation goes through `&self` so a shared handle
/// can serve inserts and searches from multiple threads.
pub struct VectorIndex {
    index_type: IndexType,
    method: DistanceMethod,
    dims: u16,
    inner: RwLock<Option<Box<dyn AnnIndex>>>,
    stats: Mutex<StatsRecorder>,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("index_type", &self.index_type)
            .field("method", &self.method)
            .field("dims", &self.dims)
            .finish_non_exhaustive()
    }
}

impl VectorIndex {
    /// Allocate a fresh index.
    ///
    /// `context` is required for graph types and ignored for FLAT.
    ///
    /// # Errors
    /// - `InvalidInit` if `dims` is 0
    /// - `InvalidArgument` for a missing or invalid graph context
    pub fn new(
        index_type: IndexType,
        method: DistanceMethod,
        dims: u16,
        context: Option<GraphContext>,
    ) -> Result<VectorIndex> {
        let backend = create_index(index_type, method, dims, context)?;
        info!(%index_type, %method, dims, "index allocated");
        Ok(VectorIndex {
            index_type,
            method,
            dims,
            inner: RwLock::new(Some(backend)),
            stats: Mutex::new(StatsRecorder::new()),
        })
    }

    /// Rebuild an index from a binary dump written by [`VectorIndex::dump`].
    ///
    /// Entries are reinserted in stored order, which reproduces an
    /// equivalent graph for NSW/HNSW dumps.
    ///
    /// # Errors
    /// - `FileIo` if the file cannot be read
    /// - `InvalidFile` if the content is not a valid dump
    pub fn load(path: &Path) -> Result<VectorIndex> {
        let file = codec::read_index(path)?;
        let handle = VectorIndex::new(file.index_type, file.method, file.dims, file.context)?;
        {
            let mut guard = handle.inner.write();
            let backend = live_mut(&mut guard)?;
            for (id, vector) in &file.entries {
                backend.insert(*id, vector)?;
            }
        }
        info!(path = %path.display(), entries = file.entries.len(), "index loaded");
        Ok(handle)
    }

    /// Rebuild an index from a JSON snapshot written by
    /// [`VectorIndex::snapshot`].
    ///
    /// # Errors
    /// - `FileIo` if the file cannot be read
    /// - `InvalidFile` if the content is not a valid snapshot
    pub fn restore(path: &Path) -> Result<VectorIndex> {
        let snapshot = Snapshot::load(path)?;
        let handle = VectorIndex::new(
            snapshot.index_type,
            snapshot.method,
            snapshot.dims,
            snapshot.context,
        )?;
        {
            let mut guard = handle.inner.write();
            let backend = live_mut(&mut guard)?;
            for entry in &snapshot.entries {
                backend.insert(entry.id, &entry.vector)?;
            }
        }
        info!(path = %path.display(), entries = snapshot.entries.len(), "index restored");
        Ok(handle)
    }

    /// Index algorithm family.
    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    /// Configured distance method.
    pub fn method(&self) -> DistanceMethod {
        self.method
    }

    /// Configured dimensionality.
    pub fn dims(&self) -> u16 {
        self.dims
    }

    /// Insert a vector under a new id.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    /// - `DuplicatedEntry` if the id is already present
    /// - `InvalidDimensions` / `InvalidVector` on a malformed payload
    pub fn insert(&self, id: u64, vector: &[f32]) -> Result<()> {
        let started = Instant::now();
        let outcome = {
            let mut guard = self.inner.write();
            live_mut(&mut guard).and_then(|backend| backend.insert(id, vector))
        };
        self.stats.lock().record(OpKind::Insert, started.elapsed());
        debug!(id, ok = outcome.is_ok(), "insert");
        outcome
    }

    /// Delete the entry stored under `id`.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    /// - `NotFoundId` if the id is not present
    pub fn delete(&self, id: u64) -> Result<()> {
        let started = Instant::now();
        let outcome = {
            let mut guard = self.inner.write();
            live_mut(&mut guard).and_then(|backend| backend.delete(id))
        };
        self.stats.lock().record(OpKind::Delete, started.elapsed());
        debug!(id, ok = outcome.is_ok(), "delete");
        outcome
    }

    /// Return the single best match for `query`.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    /// - `IndexEmpty` if the index holds no live entries
    /// - `InvalidDimensions` / `InvalidVector` on a malformed query
    pub fn search(&self, query: &[f32]) -> Result<MatchResult> {
        let started = Instant::now();
        let outcome = {
            let guard = self.inner.read();
            live(&guard).and_then(|backend| backend.search(query))
        };
        self.stats.lock().record(OpKind::Search, started.elapsed());
        outcome
    }

    /// Return up to `n` best matches for `query`, ranked best-first.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    /// - `InvalidArgument` if `n` is 0, plus everything `search` can return
    pub fn search_n(&self, query: &[f32], n: usize) -> Result<Vec<MatchResult>> {
        let started = Instant::now();
        let outcome = {
            let guard = self.inner.read();
            live(&guard).and_then(|backend| backend.search_n(query, n))
        };
        self.stats.lock().record(OpKind::SearchN, started.elapsed());
        outcome
    }

    /// Check whether `id` holds a live entry.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    pub fn contains(&self, id: u64) -> Result<bool> {
        let guard = self.inner.read();
        Ok(live(&guard)?.contains(id))
    }

    /// Number of live entries.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    pub fn size(&self) -> Result<usize> {
        let guard = self.inner.read();
        Ok(live(&guard)?.len())
    }

    /// Current tuning context (None for FLAT).
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    pub fn context(&self) -> Result<Option<GraphContext>> {
        let guard = self.inner.read();
        Ok(live(&guard)?.context())
    }

    /// Per-operation timing statistics accumulated by this handle.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    pub fn stats(&self) -> Result<IndexStats> {
        {
            let guard = self.inner.read();
            live(&guard)?;
        }
        Ok(self.stats.lock().snapshot())
    }

    /// Re-tune the index at runtime without rebuilding.
    ///
    /// `mode` selects which fields of `ctx` apply: search-time, build-time,
    /// or both.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    /// - `NotImplemented` for FLAT
    /// - `InvalidArgument` if an applied field is 0
    pub fn update_context(&self, ctx: GraphContext, mode: ContextUpdateMode) -> Result<()> {
        let mut guard = self.inner.write();
        live_mut(&mut guard)?.update_context(ctx, mode)
    }

    /// Serialize the full index state to a binary dump at `path`.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    /// - `FileIo` on any write failure
    pub fn dump(&self, path: &Path) -> Result<()> {
        let started = Instant::now();
        let outcome = {
            let guard = self.inner.read();
            live(&guard).and_then(|backend| {
                codec::write_index(
                    path,
                    backend.index_type(),
                    backend.method(),
                    backend.dims(),
                    backend.context(),
                    backend.store().iter(),
                )
            })
        };
        self.stats.lock().record(OpKind::Dump, started.elapsed());
        outcome
    }

    /// Write a portable JSON snapshot of the index state to `path`.
    ///
    /// # Errors
    /// - `InvalidIndex` if the handle is closed
    /// - `FileIo` on any write failure
    pub fn snapshot(&self, path: &Path) -> Result<()> {
        let guard = self.inner.read();
        let backend = live(&guard)?;
        let snapshot = Snapshot {
            dims: backend.dims(),
            index_type: backend.index_type(),
            method: backend.method(),
            context: backend.context(),
            entries: backend
                .store()
                .iter()
                .map(|(id, vector)| SnapshotEntry {
                    id,
                    vector: vector.to_vec(),
                })
                .collect(),
        };
        snapshot.save(path)
    }

    /// Release the index. Idempotent; every later call on this handle
    /// returns `InvalidIndex`.
    pub fn close(&self) {
        let mut guard = self.inner.write();
        if guard.take().is_some() {
            info!(index_type = %self.index_type, "index closed");
        }
    }

    /// Check whether [`VectorIndex::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.inner.read().is_none()
    }
}

fn live<'a>(guard: &'a Option<Box<dyn AnnIndex>>) -> Result<&'a dyn AnnIndex> {
    guard.as_deref().ok_or(Error::InvalidIndex)
}

fn live_mut<'a>(guard: &'a mut Option<Box<dyn AnnIndex>>) -> Result<&'a mut Box<dyn AnnIndex>> {
    guard.as_mut().ok_or(Error::InvalidIndex)
}
