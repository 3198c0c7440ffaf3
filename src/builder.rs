//! The tree sequence builder (`spec.md` §4.4, §4.9, §4.10, §6): the
//! top-level type tying together the node table, path store, edge
//! arena, three ordered indexes, mutation table and site table.

use tracing::instrument;

use crate::arena::{Edge, EdgeArena};
use crate::compression;
use crate::edge_table::EdgeTable;
use crate::error::{BuilderError, BuilderResult};
use crate::flags::{DumpFlags, NodeFlags, PathFlags};
use crate::freeze::{self, FrozenIndexes};
use crate::index::Indexes;
use crate::mutation_table::MutationTable;
use crate::newtypes::{EdgeId, MutationId, NodeId, Position, SiteId, Time};
use crate::node_table::{NodeTable, NodeTableRow};
use crate::path_store::PathStore;
use crate::site_table::SiteTable;
use crate::table_collection::TableCollection;

/// Chunk sizes for the node and edge arenas, mirroring the C API's
/// `nodes_chunk` / `edges_chunk` parameters to `alloc` (`spec.md` §6).
#[derive(Debug, Clone, Copy)]
pub struct BuilderConfig {
    pub nodes_chunk_size: usize,
    pub edges_chunk_size: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            nodes_chunk_size: 1024,
            edges_chunk_size: 1024,
        }
    }
}

/// A single right-to-left path edge as handed to `add_path`:
/// `(left, right, parent)`.
#[derive(Debug, Clone, Copy)]
pub struct PathSegment {
    pub left: Position,
    pub right: Position,
    pub parent: NodeId,
}

/// The incremental tree sequence builder.
///
/// `add_node` and `add_path` maintain the node table, path store, edge
/// arena and the three ordered indexes in lockstep; `dump` renders the
/// current live state into a [`TableCollection`].
#[derive(Debug)]
pub struct TreeSequenceBuilder {
    config: BuilderConfig,
    nodes: NodeTable,
    paths: PathStore,
    arena: EdgeArena,
    indexes: Indexes,
    mutations: MutationTable,
    sites: SiteTable,
    frozen: Option<FrozenIndexes>,
}

impl TreeSequenceBuilder {
    /// `alloc` (`spec.md` §6): initialize a builder with `num_sites`
    /// sites and the given chunk sizes.
    pub fn alloc(num_sites: usize, config: BuilderConfig) -> Self {
        Self {
            nodes: NodeTable::with_capacity(config.nodes_chunk_size),
            paths: PathStore::with_capacity(config.nodes_chunk_size),
            arena: EdgeArena::with_capacity(config.edges_chunk_size),
            indexes: Indexes::default(),
            mutations: MutationTable::new(num_sites),
            sites: SiteTable::new(num_sites),
            frozen: None,
            config,
        }
    }

    pub fn config(&self) -> BuilderConfig {
        self.config
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&mut self, time: Time, flags: NodeFlags) -> NodeId {
        let id = self.nodes.add_row(time, flags);
        self.paths.ensure_node(id);
        id
    }

    /// `add_path` (`spec.md` §4.4): append a full path for `child`,
    /// given as `(left, right, parent)` triples in right-to-left order.
    #[instrument(level = "debug", skip(self, edges), fields(child = %child, n = edges.len()))]
    pub fn add_path(
        &mut self,
        child: NodeId,
        edges: &[PathSegment],
        flags: PathFlags,
    ) -> BuilderResult<()> {
        // 1. Validate, before any mutation.
        if !self.nodes.is_valid(child) {
            return Err(BuilderError::BadPathParent(format!(
                "child {child} is not a valid node"
            )));
        }
        let child_time = self.nodes.time(child);
        for seg in edges {
            if !self.nodes.is_valid(seg.parent) {
                return Err(BuilderError::BadPathParent(format!(
                    "parent {} is not a valid node",
                    seg.parent
                )));
            }
            if seg.left >= seg.right {
                return Err(BuilderError::BadPathParent(format!(
                    "edge [{}, {}) is empty or inverted",
                    seg.left, seg.right
                )));
            }
            if !(self.nodes.time(seg.parent) > child_time) {
                return Err(BuilderError::BadPathTime(format!(
                    "parent {} has time {} <= child {} time {}",
                    seg.parent,
                    self.nodes.time(seg.parent),
                    child,
                    child_time
                )));
            }
        }
        // Contiguity: `edges` is right-to-left, so `edges[i+1].right`
        // must meet `edges[i].left`.
        for pair in edges.windows(2) {
            if pair[1].right != pair[0].left {
                return Err(BuilderError::NonContiguousEdges(format!(
                    "gap between [{}, {}) and [{}, {})",
                    pair[1].left, pair[1].right, pair[0].left, pair[0].right
                )));
            }
        }

        // 2. Allocate and link in left-to-right order: prepending edges
        // given in right-to-left order naturally reverses them.
        let mut head = EdgeId::NULL;
        for seg in edges {
            let id = self.arena.alloc(Edge {
                left: seg.left,
                right: seg.right,
                parent: seg.parent,
                child,
                time: child_time,
                next: head,
            });
            head = id;
        }
        self.paths.set_head(child, head);

        // 4. Path compression, if requested.
        if flags.contains(PathFlags::COMPRESS_PATH) {
            compression::compress_path(
                child,
                &mut self.arena,
                &mut self.nodes,
                &mut self.paths,
                &mut self.indexes,
            )?;
        }

        // 5. Index every edge in the final path.
        for id in self.paths.iter_path(child, &self.arena).collect::<Vec<_>>() {
            let e = *self.arena.get(id);
            self.indexes.insert(id, &e);
        }

        if flags.contains(PathFlags::EXTENDED_CHECKS) {
            self.debug_check_invariants()?;
        }
        #[cfg(debug_assertions)]
        self.debug_check_invariants()?;

        Ok(())
    }

    /// `add_mutations` (`spec.md` §4.7, §6).
    #[instrument(level = "debug", skip(self, sites, derived_states))]
    pub fn add_mutations(
        &mut self,
        node: NodeId,
        sites: &[SiteId],
        derived_states: &[u8],
    ) -> BuilderResult<Vec<MutationId>> {
        if sites.len() != derived_states.len() {
            return Err(BuilderError::IndexError);
        }
        sites
            .iter()
            .zip(derived_states)
            .map(|(&site, &state)| self.mutations.add_row(site, node, state))
            .collect()
    }

    /// `freeze_indexes` (`spec.md` §4.8).
    #[instrument(level = "debug", skip(self))]
    pub fn freeze_indexes(&mut self) -> &FrozenIndexes {
        self.frozen = Some(freeze::freeze(&self.indexes, &self.arena));
        self.frozen.as_ref().expect("just set")
    }

    pub fn frozen(&self) -> Option<&FrozenIndexes> {
        self.frozen.as_ref()
    }

    /// `restore_nodes` (`spec.md` §4.10): rebuild the node table and
    /// path store from flat rows. The builder must otherwise be empty.
    pub fn restore_nodes(&mut self, rows: &[NodeTableRow]) -> BuilderResult<()> {
        for row in rows {
            let id = self.nodes.add_row(row.time, row.flags);
            self.paths.ensure_node(id);
            debug_assert_eq!(id, row.id);
        }
        Ok(())
    }

    /// `restore_edges` (`spec.md` §4.10): rows must be sorted by
    /// `(child, left)`. Calls `freeze_indexes` on success.
    pub fn restore_edges(
        &mut self,
        rows: &[(Position, Position, NodeId, NodeId)],
    ) -> BuilderResult<()> {
        let mut prev: Option<(NodeId, Position)> = None;
        for &(left, _right, _parent, child) in rows {
            if let Some((prev_child, prev_left)) = prev {
                let ordered = child > prev_child || (child == prev_child && left >= prev_left);
                if !ordered {
                    return Err(BuilderError::UnsortedEdges(format!(
                        "edge (child={child}, left={left}) out of order after (child={prev_child}, left={prev_left})"
                    )));
                }
            }
            prev = Some((child, left));
        }

        let mut tails: Vec<EdgeId> = vec![EdgeId::NULL; self.nodes.num_rows()];
        for &(left, right, parent, child) in rows {
            if !self.nodes.is_valid(child) || !self.nodes.is_valid(parent) {
                return Err(BuilderError::IndexError);
            }
            let id = self.arena.alloc(Edge {
                left,
                right,
                parent,
                child,
                time: self.nodes.time(child),
                next: EdgeId::NULL,
            });
            let idx = child.as_usize();
            let head = self.paths.head(child);
            if head.is_null() {
                self.paths.set_head(child, id);
            } else {
                self.arena.get_mut(tails[idx]).next = id;
            }
            tails[idx] = id;
        }

        for child_idx in 0..self.nodes.num_rows() {
            let child = NodeId::from(child_idx);
            for id in self.paths.iter_path(child, &self.arena).collect::<Vec<_>>() {
                let e = *self.arena.get(id);
                self.indexes.insert(id, &e);
            }
        }

        self.freeze_indexes();
        Ok(())
    }

    /// `restore_mutations` (`spec.md` §4.10).
    pub fn restore_mutations(&mut self, rows: &[(SiteId, NodeId, u8)]) -> BuilderResult<()> {
        for &(site, node, derived_state) in rows {
            self.mutations.add_row(site, node, derived_state)?;
        }
        Ok(())
    }

    /// `dump` (`spec.md` §4.9): render the live state into output
    /// tables, in (nodes by id; edges by child then path order; sites
    /// by index; mutations by site then list order) order.
    pub fn dump(&self, out: &mut TableCollection, flags: DumpFlags) {
        let mut edge_table = EdgeTable::with_capacity(self.arena.num_allocated());
        for child_idx in 0..self.nodes.num_rows() {
            let child = NodeId::from(child_idx);
            for id in self.paths.iter_path(child, &self.arena) {
                let e = self.arena.get(id);
                edge_table.add_row(e.left, e.right, e.parent, e.child);
            }
        }
        out.fill_from(
            self.sites.num_rows() as u64,
            &self.nodes,
            &edge_table,
            &self.sites,
            &self.mutations,
            flags,
        );
    }

    pub fn get_num_nodes(&self) -> usize {
        self.nodes.num_rows()
    }

    pub fn get_num_edges(&self) -> usize {
        self.arena.num_allocated()
    }

    pub fn get_num_mutations(&self) -> usize {
        self.mutations.num_rows()
    }

    /// `print_state` (`spec.md` §6): a diagnostic dump plus the
    /// built-in invariant check, run regardless of build profile since
    /// it is read-only.
    pub fn print_state(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        writeln!(
            out,
            "nodes={} edges={} mutations={} sites={}",
            self.get_num_nodes(),
            self.get_num_edges(),
            self.get_num_mutations(),
            self.sites.num_rows()
        )?;
        match self.debug_check_invariants() {
            Ok(()) => writeln!(out, "invariants: ok"),
            Err(e) => writeln!(out, "invariants: VIOLATED: {e}"),
        }
    }

    /// The six invariants in `spec.md` §8, checked in one pass.
    pub fn debug_check_invariants(&self) -> BuilderResult<()> {
        if !self.indexes.cardinalities_agree() {
            return Err(BuilderError::AssertionFailure(format!(
                "index cardinalities disagree: left={} right={} path={}",
                self.indexes.left.len(),
                self.indexes.right.len(),
                self.indexes.path.len()
            )));
        }

        let mut total_path_edges = 0usize;
        for child_idx in 0..self.nodes.num_rows() {
            let child = NodeId::from(child_idx);
            let mut prev_right: Option<Position> = None;
            for id in self.paths.iter_path(child, &self.arena) {
                let e = self.arena.get(id);
                total_path_edges += 1;
                if e.child.is_null() {
                    return Err(BuilderError::AssertionFailure(format!(
                        "edge {id} has child == NULL_NODE at rest"
                    )));
                }
                if e.child != child {
                    return Err(BuilderError::AssertionFailure(format!(
                        "edge {id} is on node {child}'s path but has child {}",
                        e.child
                    )));
                }
                if !(self.nodes.time(e.parent) > self.nodes.time(e.child)) {
                    return Err(BuilderError::AssertionFailure(format!(
                        "edge {id}: time(parent {}) does not exceed time(child {})",
                        e.parent, e.child
                    )));
                }
                if self.nodes.flags(e.child).contains(NodeFlags::IS_PC_ANCESTOR) {
                    let margin =
                        f64::from(self.nodes.time(e.parent)) - f64::from(self.nodes.time(e.child));
                    if margin < compression::PC_ANCESTOR_EPSILON {
                        return Err(BuilderError::AssertionFailure(format!(
                            "PC ancestor {} time too close to parent {}",
                            e.child, e.parent
                        )));
                    }
                }
                // Strict contiguity: `add_path` validates this at input
                // time, so a gap here would mean corruption, not merely
                // an unsquashed run. Whether a run is also squashable
                // (same parent) is a property of compression, not a
                // standing invariant: `add_path` without `COMPRESS_PATH`
                // deliberately leaves mergeable runs unmerged (`spec.md`
                // §8 scenario 2), so that is checked at the squash call
                // site, not here.
                if let Some(pr) = prev_right {
                    if pr != e.left {
                        return Err(BuilderError::AssertionFailure(format!(
                            "path for {child} is not contiguous at edge {id}"
                        )));
                    }
                }
                prev_right = Some(e.right);
            }
        }

        if total_path_edges != self.arena.num_allocated() {
            return Err(BuilderError::AssertionFailure(format!(
                "{total_path_edges} edges reachable via paths but {} allocated",
                self.arena.num_allocated()
            )));
        }
        if total_path_edges != self.indexes.len() {
            return Err(BuilderError::AssertionFailure(format!(
                "{total_path_edges} edges on paths but {} indexed",
                self.indexes.len()
            )));
        }

        Ok(())
    }
}
