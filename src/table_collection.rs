//! The output table collection: the flat, in-memory rendering of a
//! frozen builder state, emitted by
//! [`crate::builder::TreeSequenceBuilder::dump`] (`spec.md` §4.9).
//!
//! This is a plain Rust struct, not a C `tsk_table_collection_t`
//! wrapper: the builder's internal arena/index representation is not
//! itself a valid output layout (edges reference their `next` chain
//! link and cached child time, neither of which belongs in a dumped
//! table), so `dump` always re-renders into this shape.

use crate::edge_table::{EdgeTable, EdgeTableRow};
use crate::flags::DumpFlags;
use crate::mutation_table::{MutationTable, MutationTableRow};
use crate::node_table::{NodeTable, NodeTableRow};
use crate::site_table::{SiteTable, SiteTableRow};

/// A complete set of output tables, as produced by `dump` and consumed
/// by `restore_nodes` / `restore_edges` / `restore_mutations`.
///
/// `sequence_length` equals `num_sites` (`spec.md` §4.9): this builder
/// works over integer site indices rather than a continuous genomic
/// length.
#[derive(Debug, Default, Clone)]
pub struct TableCollection {
    pub sequence_length: u64,
    nodes: Vec<NodeTableRow>,
    edges: Vec<EdgeTableRow>,
    sites: Vec<SiteTableRow>,
    mutations: Vec<MutationTableRow>,
}

impl TableCollection {
    pub fn new(sequence_length: u64) -> Self {
        Self {
            sequence_length,
            ..Default::default()
        }
    }

    /// Reset to an empty collection with the given sequence length,
    /// reusing the already-allocated row vectors. Used by `dump` when
    /// called with [`DumpFlags::NO_INIT`].
    pub(crate) fn reinit(&mut self, sequence_length: u64) {
        self.sequence_length = sequence_length;
        self.nodes.clear();
        self.edges.clear();
        self.sites.clear();
        self.mutations.clear();
    }

    pub(crate) fn fill_from(
        &mut self,
        sequence_length: u64,
        nodes: &NodeTable,
        edges: &EdgeTable,
        sites: &SiteTable,
        mutations: &MutationTable,
        flags: DumpFlags,
    ) {
        if flags.contains(DumpFlags::NO_INIT) {
            self.reinit(sequence_length);
        } else {
            *self = Self::new(sequence_length);
        }
        self.nodes.extend(nodes.iter());
        self.edges.extend(edges.iter());
        self.sites.extend(sites.iter());
        self.mutations.extend(mutations.iter());
    }

    pub fn nodes(&self) -> &[NodeTableRow] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeTableRow] {
        &self.edges
    }

    pub fn sites(&self) -> &[SiteTableRow] {
        &self.sites
    }

    pub fn mutations(&self) -> &[MutationTableRow] {
        &self.mutations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collection_is_empty() {
        let t = TableCollection::new(3);
        assert_eq!(t.sequence_length, 3);
        assert!(t.nodes().is_empty());
        assert!(t.edges().is_empty());
    }
}
