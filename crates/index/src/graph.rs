//! GraphIndex: navigable small-world proximity graphs (NSW and HNSW).
//!
//! One implementation covers both types. NSW is the single-layer
//! configuration: every node lives at layer 0 with `max_degree` out-edges.
//! HNSW assigns each node a random top layer with exponential decay
//! (`ml = 1 / ln(M)`), keeps `max_degree` (M0) connections at layer 0 and
//! half that above, and searches by greedy descent from the coarsest layer.
//!
//! Deletes tombstone the node: it stays traversable so its edges keep the
//! graph connected, but it is never emitted from a search. The payload copy
//! held by each node lets traversal compute distances through tombstones
//! after the id has left the vector store.

use crate::backend::AnnIndex;
use crate::distance::{evaluate, rank_key, raw_from_key};
use crate::sorter::ResultSorter;
use crate::store::{check_vector, VectorStore};
use proxima_core::{
    ContextUpdateMode, DistanceMethod, Error, GraphContext, IndexType, MatchResult, Result,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, warn};

/// Cap on HNSW layer assignment; levels beyond this add nothing at
/// realistic index sizes.
const MAX_LEVEL: usize = 16;

/// Fixed RNG seed: identical insert sequences rebuild identical graphs,
/// which keeps dump/load behavior reproducible.
const LEVEL_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

type NodeId = u32;

/// A node with its rank key relative to the current query.
#[derive(Debug, Clone, Copy)]
struct Scored {
    key: f32,
    node: NodeId,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.node == other.node
    }
}

impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .partial_cmp(&other.key)
            .unwrap_or(Ordering::Equal)
            .then(self.node.cmp(&other.node))
    }
}

#[derive(Debug)]
struct Node {
    id: u64,
    /// Payload copy; outlives the store entry so tombstones stay traversable.
    vector: Vec<f32>,
    /// Neighbor lists indexed by layer; length = node level + 1.
    neighbors: Vec<SmallVec<[NodeId; 32]>>,
    deleted: bool,
}

impl Node {
    fn level(&self) -> usize {
        self.neighbors.len() - 1
    }
}

/// Proximity-graph index (NSW or HNSW).
#[derive(Debug)]
pub struct GraphIndex {
    store: VectorStore,
    method: DistanceMethod,
    ctx: GraphContext,
    /// False = NSW (single layer), true = HNSW (hierarchical).
    layered: bool,
    nodes: Vec<Node>,
    by_id: FxHashMap<u64, NodeId>,
    entry: Option<NodeId>,
    top_level: usize,
    ml: f64,
    rng: StdRng,
}

impl GraphIndex {
    /// Create an empty NSW index.
    pub fn new_nsw(method: DistanceMethod, dims: u16, ctx: GraphContext) -> Result<Self> {
        Self::new(method, dims, ctx, false)
    }

    /// Create an empty HNSW index.
    pub fn new_hnsw(method: DistanceMethod, dims: u16, ctx: GraphContext) -> Result<Self> {
        Self::new(method, dims, ctx, true)
    }

    fn new(method: DistanceMethod, dims: u16, ctx: GraphContext, layered: bool) -> Result<Self> {
        ctx.validate()?;
        Ok(GraphIndex {
            store: VectorStore::new(dims),
            method,
            ctx,
            layered,
            nodes: Vec::new(),
            by_id: FxHashMap::default(),
            entry: None,
            top_level: 0,
            ml: 1.0 / (ctx.max_degree.max(2) as f64).ln(),
            rng: StdRng::seed_from_u64(LEVEL_SEED),
        })
    }

    /// Current tuning context.
    pub fn graph_context(&self) -> GraphContext {
        self.ctx
    }

    /// Total nodes including tombstones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn degree_for(&self, layer: usize) -> usize {
        if !self.layered || layer == 0 {
            self.ctx.max_degree
        } else {
            (self.ctx.max_degree / 2).max(1)
        }
    }

    fn random_level(&mut self) -> usize {
        if !self.layered {
            return 0;
        }
        let u: f64 = self.rng.gen::<f64>().max(f64::MIN_POSITIVE);
        ((-u.ln() * self.ml).floor() as usize).min(MAX_LEVEL)
    }

    fn scored(&self, query: &[f32], node: NodeId) -> Scored {
        let reported = evaluate(self.method, query, &self.nodes[node as usize].vector);
        Scored {
            key: rank_key(self.method, reported),
            node,
        }
    }

    /// Beam search within one layer.
    ///
    /// Candidates may pass through tombstoned nodes; the returned result set
    /// contains live nodes only, ascending by rank key.
    fn search_layer(
        &self,
        query: &[f32],
        entries: &[NodeId],
        ef: usize,
        layer: usize,
    ) -> Vec<Scored> {
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut candidates: BinaryHeap<Reverse<Scored>> = BinaryHeap::new();
        let mut results: BinaryHeap<Scored> = BinaryHeap::new();

        for &ep in entries {
            if !visited.insert(ep) {
                continue;
            }
            let scored = self.scored(query, ep);
            candidates.push(Reverse(scored));
            if !self.nodes[ep as usize].deleted {
                results.push(scored);
                if results.len() > ef {
                    results.pop();
                }
            }
        }

        while let Some(Reverse(current)) = candidates.pop() {
            if results.len() >= ef {
                if let Some(worst) = results.peek() {
                    if current.key > worst.key {
                        break;
                    }
                }
            }
            for &nb in self.nodes[current.node as usize].neighbors[layer].iter() {
                if !visited.insert(nb) {
                    continue;
                }
                let scored = self.scored(query, nb);
                let worst_key = results.peek().map(|w| w.key).unwrap_or(f32::INFINITY);
                if results.len() < ef || scored.key < worst_key {
                    candidates.push(Reverse(scored));
                    if !self.nodes[nb as usize].deleted {
                        results.push(scored);
                        if results.len() > ef {
                            results.pop();
                        }
                    }
                }
            }
        }

        let mut out = results.into_vec();
        out.sort_unstable();
        out
    }

    /// Greedy descent from the top layer down to (and excluding) `to_layer`.
    fn descend(&self, query: &[f32], entry: NodeId, to_layer: usize) -> Vec<NodeId> {
        let mut ep = vec![entry];
        let mut layer = self.top_level;
        while layer > to_layer {
            if let Some(best) = self.search_layer(query, &ep, 1, layer).first() {
                ep = vec![best.node];
            }
            layer -= 1;
        }
        ep
    }

    fn connect(&mut self, from: NodeId, to: NodeId, layer: usize) {
        if from == to {
            return;
        }
        let list = &mut self.nodes[from as usize].neighbors[layer];
        if !list.contains(&to) {
            list.push(to);
        }
    }

    /// Trim an overfull neighbor list back to the layer cap, keeping the
    /// closest edges.
    fn prune(&mut self, node: NodeId, layer: usize) {
        let cap = self.degree_for(layer);
        if self.nodes[node as usize].neighbors[layer].len() <= cap {
            return;
        }
        let base = self.nodes[node as usize].vector.clone();
        let mut scored: Vec<Scored> = self.nodes[node as usize].neighbors[layer]
            .iter()
            .map(|&nb| self.scored(&base, nb))
            .collect();
        scored.sort_unstable();
        self.nodes[node as usize].neighbors[layer] =
            scored.into_iter().take(cap).map(|s| s.node).collect();
    }

    /// Pick a new entry point after the current one was tombstoned.
    fn reassign_entry(&mut self) {
        let mut best: Option<(usize, NodeId)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.deleted {
                continue;
            }
            let level = node.level();
            if best.map_or(true, |(b, _)| level > b) {
                best = Some((level, i as NodeId));
            }
        }
        match best {
            Some((level, node)) => {
                self.entry = Some(node);
                self.top_level = level;
            }
            None => {
                self.entry = None;
                self.top_level = 0;
            }
        }
    }

    /// Layer-0 beam producing the best `k` live matches.
    fn beam(&self, query: &[f32], k: usize) -> Result<Vec<MatchResult>> {
        check_vector(self.store.dims(), query)?;
        if self.store.is_empty() {
            return Err(Error::IndexEmpty);
        }
        // A non-empty store implies a live entry point (delete reassigns it).
        let entry = self.entry.ok_or(Error::InvalidRef)?;
        let ep = self.descend(query, entry, 0);
        let ef = self.ctx.ef_search.max(k);
        let found = self.search_layer(query, &ep, ef, 0);

        let mut sorter = ResultSorter::new(k, self.method)?;
        for scored in found {
            sorter.offer(MatchResult::new(
                self.nodes[scored.node as usize].id,
                raw_from_key(self.method, scored.key),
            ));
        }
        let out = sorter.close(true);
        if !out.is_empty() {
            return Ok(out);
        }

        // Tombstones can disconnect a region; an exact scan keeps the
        // contract honest instead of reporting a false empty.
        warn!(
            live = self.store.len(),
            nodes = self.nodes.len(),
            "graph beam found no live candidates, falling back to linear scan"
        );
        let mut sorter = ResultSorter::new(k, self.method)?;
        for (id, vector) in self.store.iter() {
            sorter.offer(MatchResult::new(id, evaluate(self.method, query, vector)));
        }
        Ok(sorter.close(true))
    }
}

impl AnnIndex for GraphIndex {
    fn insert(&mut self, id: u64, vector: &[f32]) -> Result<()> {
        // Validates dims, finiteness, and id uniqueness before graph work.
        self.store.put(id, vector.to_vec())?;

        let level = self.random_level();
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(Node {
            id,
            vector: vector.to_vec(),
            neighbors: vec![SmallVec::new(); level + 1],
            deleted: false,
        });
        self.by_id.insert(id, node_id);

        let Some(entry) = self.entry else {
            self.entry = Some(node_id);
            self.top_level = level;
            return Ok(());
        };

        let query = vector;
        let mut ep = if self.top_level > level {
            self.descend(query, entry, level)
        } else {
            vec![entry]
        };

        for layer in (0..=level.min(self.top_level)).rev() {
            let candidates = self.search_layer(query, &ep, self.ctx.ef_construct, layer);
            let selected: Vec<NodeId> = candidates
                .iter()
                .take(self.degree_for(layer))
                .map(|s| s.node)
                .collect();
            for &nb in &selected {
                self.connect(node_id, nb, layer);
                self.connect(nb, node_id, layer);
                self.prune(nb, layer);
            }
            if !selected.is_empty() {
                ep = selected;
            }
        }

        // If every candidate near the insertion point was tombstoned the new
        // node would be unreachable; anchor it to the entry point.
        if self.nodes[node_id as usize].neighbors[0].is_empty() && self.store.len() > 1 {
            let anchor = self.entry.unwrap_or(node_id);
            if anchor != node_id {
                self.connect(node_id, anchor, 0);
                self.connect(anchor, node_id, 0);
                self.prune(anchor, 0);
            }
        }

        if level > self.top_level {
            self.top_level = level;
            self.entry = Some(node_id);
        }
        debug!(id, level, nodes = self.nodes.len(), "graph insert");
        Ok(())
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        self.store.remove(id)?;
        let node_id = self.by_id.remove(&id).ok_or(Error::InvalidRef)?;
        self.nodes[node_id as usize].deleted = true;
        if self.entry == Some(node_id) {
            self.reassign_entry();
        }
        let dead = self.nodes.len() - self.store.len();
        if dead > 64 && dead * 2 > self.nodes.len() {
            warn!(
                live = self.store.len(),
                dead, "tombstones dominate the graph; consider rebuilding via dump/load"
            );
        }
        Ok(())
    }

    fn search(&self, query: &[f32]) -> Result<MatchResult> {
        self.beam(query, 1)?
            .into_iter()
            .next()
            .ok_or(Error::IndexEmpty)
    }

    fn search_n(&self, query: &[f32], n: usize) -> Result<Vec<MatchResult>> {
        if n == 0 {
            return Err(Error::InvalidArgument("search_n requires n > 0".into()));
        }
        self.beam(query, n)
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
        if self.layered {
            IndexType::Hnsw
        } else {
            IndexType::Nsw
        }
    }

    fn context(&self) -> Option<GraphContext> {
        Some(self.ctx)
    }

    fn update_context(&mut self, ctx: GraphContext, mode: ContextUpdateMode) -> Result<()> {
        match mode {
            ContextUpdateMode::Search => {
                if ctx.ef_search == 0 {
                    return Err(Error::InvalidArgument("ef_search must be > 0".into()));
                }
                self.ctx.ef_search = ctx.ef_search;
            }
            ContextUpdateMode::Construct => {
                if ctx.ef_construct == 0 {
                    return Err(Error::InvalidArgument("ef_construct must be > 0".into()));
                }
                if ctx.max_degree == 0 {
                    return Err(Error::InvalidArgument("max_degree must be > 0".into()));
                }
                self.ctx.ef_construct = ctx.ef_construct;
                self.ctx.max_degree = ctx.max_degree;
            }
            ContextUpdateMode::All => {
                ctx.validate()?;
                self.ctx = ctx;
            }
        }
        debug!(
            ef_search = self.ctx.ef_search,
            ef_construct = self.ctx.ef_construct,
            max_degree = self.ctx.max_degree,
            "graph context updated"
        );
        Ok(())
    }

    fn store(&self) -> &VectorStore {
        &self.store
    }
}
