//! The mutation table.
//!
//! Per site, mutations form an ordered singly-linked list (`spec.md`
//! §4.7): the head must have `derived_state = 1`, since the ancestral
//! state is always `0`. `parent_mutation` is the previous mutation on
//! the same site, or `None` for the head; [`MutationTable::iter`]
//! emits rows grouped by site ascending (`spec.md` §4.9) and recomputes
//! `parent_mutation` against the ids that ordering assigns, since
//! storage order need not already be site-grouped.

use crate::error::{BuilderError, BuilderResult};
use crate::newtypes::{MutationId, NodeId, SiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationTableRow {
    pub id: MutationId,
    pub site: SiteId,
    pub node: NodeId,
    pub parent: Option<MutationId>,
    pub derived_state: u8,
}

#[derive(Debug, Clone, Copy)]
struct MutationRecord {
    site: SiteId,
    node: NodeId,
    derived_state: u8,
    /// Previous mutation id at this site, i.e. `parent_mutation`.
    parent: Option<MutationId>,
}

#[derive(Debug, Default)]
pub struct MutationTable {
    records: Vec<MutationRecord>,
    /// Most recently appended mutation at each site, used to chain
    /// `parent_mutation` links. `None` until the site has its first
    /// mutation.
    tails: Vec<Option<MutationId>>,
}

impl MutationTable {
    pub fn new(num_sites: usize) -> Self {
        Self {
            records: Vec::new(),
            tails: vec![None; num_sites],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.records.len()
    }

    /// Append a mutation at `site` for `node` with the given derived
    /// state (`0` or `1`). The first mutation recorded at a site must
    /// have `derived_state == 1`, since the ancestral state is `0` by
    /// construction.
    pub fn add_row(&mut self, site: SiteId, node: NodeId, derived_state: u8) -> BuilderResult<MutationId> {
        if derived_state > 1 {
            return Err(BuilderError::BadPathParent(format!(
                "derived state must be 0 or 1, got {derived_state}"
            )));
        }
        let site_idx = site.to_usize().ok_or(BuilderError::IndexError)?;
        let tail = *self.tails.get(site_idx).ok_or(BuilderError::IndexError)?;
        if tail.is_none() && derived_state != 1 {
            return Err(BuilderError::AssertionFailure(format!(
                "first mutation at site {site} must have derived_state = 1"
            )));
        }
        let id = MutationId::from(self.records.len());
        self.records.push(MutationRecord {
            site,
            node,
            derived_state,
            parent: tail,
        });
        self.tails[site_idx] = Some(id);
        Ok(id)
    }

    pub fn row(&self, id: MutationId) -> Option<MutationTableRow> {
        let idx = id.to_usize()?;
        let r = self.records.get(idx)?;
        Some(MutationTableRow {
            id,
            site: r.site,
            node: r.node,
            parent: r.parent,
            derived_state: r.derived_state,
        })
    }

    /// Mutations in dump order (`spec.md` §4.9): grouped by site
    /// ascending, stable within a site so each site's own list order is
    /// preserved. `parent_mutation` is recomputed against the ids this
    /// ordering assigns, since storage order (insertion order across all
    /// sites) need not match site order when `add_mutations` visits
    /// sites out of order across calls.
    pub fn iter(&self) -> impl Iterator<Item = MutationTableRow> + '_ {
        let mut by_site: Vec<Vec<usize>> = vec![Vec::new(); self.tails.len()];
        for (i, r) in self.records.iter().enumerate() {
            by_site[r.site.as_usize()].push(i);
        }
        let order: Vec<usize> = by_site.into_iter().flatten().collect();

        let mut new_id = vec![MutationId::NULL; self.records.len()];
        for (new, &old) in order.iter().enumerate() {
            new_id[old] = MutationId::from(new);
        }

        order.into_iter().map(move |old| {
            let r = &self.records[old];
            MutationTableRow {
                id: new_id[old],
                site: r.site,
                node: r.node,
                parent: r.parent.map(|p| new_id[p.as_usize()]),
                derived_state: r.derived_state,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mutation_must_be_derived() {
        let mut t = MutationTable::new(1);
        let err = t
            .add_row(SiteId::from(0_i64), NodeId::from(0_i64), 0)
            .unwrap_err();
        assert!(matches!(err, BuilderError::AssertionFailure(_)));
    }

    #[test]
    fn chains_parent_mutation() {
        let mut t = MutationTable::new(1);
        let site = SiteId::from(0_i64);
        let m0 = t.add_row(site, NodeId::from(0_i64), 1).unwrap();
        let m1 = t.add_row(site, NodeId::from(1_i64), 0).unwrap();
        assert_eq!(t.row(m0).unwrap().parent, None);
        assert_eq!(t.row(m1).unwrap().parent, Some(m0));
    }

    #[test]
    fn dump_order_groups_by_site_despite_interleaved_insertion() {
        let mut t = MutationTable::new(2);
        let site0 = SiteId::from(0_i64);
        let site1 = SiteId::from(1_i64);
        // Insertion interleaves sites: site1 then site0 twice.
        t.add_row(site1, NodeId::from(0_i64), 1).unwrap();
        t.add_row(site0, NodeId::from(1_i64), 1).unwrap();
        t.add_row(site0, NodeId::from(2_i64), 0).unwrap();

        let rows: Vec<_> = t.iter().collect();
        assert_eq!(rows.len(), 3);
        // site 0's two rows come first, in their original relative order.
        assert_eq!(rows[0].site, site0);
        assert_eq!(rows[0].node, NodeId::from(1_i64));
        assert_eq!(rows[0].parent, None);
        assert_eq!(rows[1].site, site0);
        assert_eq!(rows[1].node, NodeId::from(2_i64));
        assert_eq!(rows[1].parent, Some(rows[0].id));
        // site 1's row comes last, with no site-0 row as its parent.
        assert_eq!(rows[2].site, site1);
        assert_eq!(rows[2].parent, None);
    }
}
