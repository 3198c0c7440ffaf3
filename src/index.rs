//! The three ordered indexes over live edges.
//!
//! Each index is a `BTreeSet` of a small `Copy` key type that embeds the
//! edge id as a final tiebreaker, so distinct edges with identical sort
//! fields never collide. `BTreeSet` realizes the "balanced BST with
//! neighbor access" contract directly: `range` gives predecessor and
//! successor lookups without hiding them behind an opaque API, as
//! required for the path-index compression scan.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::arena::Edge;
use crate::newtypes::{EdgeId, NodeId, Position, Time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LeftKey {
    left: Position,
    child_time: Time,
    child: NodeId,
    edge: EdgeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RightKey {
    right: Position,
    child_time_desc: Reverse<Time>,
    child: NodeId,
    edge: EdgeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathKey {
    left: Position,
    right: Position,
    parent: NodeId,
    child: NodeId,
    edge: EdgeId,
}

/// Everything needed to build and tear down an edge's entry in each
/// index. Squash and path compression pass this in both directions:
/// read it off a live edge before unindexing, rebuild it after a field
/// changes.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry {
    pub left: Position,
    pub right: Position,
    pub parent: NodeId,
    pub child: NodeId,
    pub child_time: Time,
    pub edge: EdgeId,
}

#[derive(Debug, Default)]
pub struct LeftIndex(BTreeSet<LeftKey>);

impl LeftIndex {
    pub fn insert(&mut self, e: IndexEntry) {
        let inserted = self.0.insert(LeftKey {
            left: e.left,
            child_time: e.child_time,
            child: e.child,
            edge: e.edge,
        });
        debug_assert!(inserted);
    }

    pub fn remove(&mut self, e: IndexEntry) {
        let removed = self.0.remove(&LeftKey {
            left: e.left,
            child_time: e.child_time,
            child: e.child,
            edge: e.edge,
        });
        debug_assert!(removed);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Edge ids in `left_index` order: `(left asc, time(child) asc, child asc)`.
    pub fn iter_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.0.iter().map(|k| k.edge)
    }
}

#[derive(Debug, Default)]
pub struct RightIndex(BTreeSet<RightKey>);

impl RightIndex {
    pub fn insert(&mut self, e: IndexEntry) {
        let inserted = self.0.insert(RightKey {
            right: e.right,
            child_time_desc: Reverse(e.child_time),
            child: e.child,
            edge: e.edge,
        });
        debug_assert!(inserted);
    }

    pub fn remove(&mut self, e: IndexEntry) {
        let removed = self.0.remove(&RightKey {
            right: e.right,
            child_time_desc: Reverse(e.child_time),
            child: e.child,
            edge: e.edge,
        });
        debug_assert!(removed);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Edge ids in `right_index` order: `(right asc, time(child) desc, child asc)`.
    pub fn iter_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.0.iter().map(|k| k.edge)
    }
}

/// The result of probing the path index near `(left, right, parent)`:
/// an exact match if one exists sharing that triple (any child), plus
/// its immediate predecessor and successor in path-index order. Path
/// compression inspects all three, per the design note that a BST
/// lookup must not hide neighbor access behind an opaque API.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCursor {
    pub exact: Option<(NodeId, EdgeId)>,
    pub predecessor: Option<(Position, Position, NodeId, NodeId, EdgeId)>,
    pub successor: Option<(Position, Position, NodeId, NodeId, EdgeId)>,
}

#[derive(Debug, Default)]
pub struct PathIndex(BTreeSet<PathKey>);

impl PathIndex {
    pub fn insert(&mut self, e: IndexEntry) {
        let inserted = self.0.insert(PathKey {
            left: e.left,
            right: e.right,
            parent: e.parent,
            child: e.child,
            edge: e.edge,
        });
        debug_assert!(inserted);
    }

    pub fn remove(&mut self, e: IndexEntry) {
        let removed = self.0.remove(&PathKey {
            left: e.left,
            right: e.right,
            parent: e.parent,
            child: e.child,
            edge: e.edge,
        });
        debug_assert!(removed);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.0.iter().map(|k| k.edge)
    }

    /// Probe for an existing edge with the given `(left, right, parent)`,
    /// using `child = 0` as the probe key since `PathKey` orders by
    /// `(left, right, parent, child)`, and report its two immediate
    /// neighbors alongside it.
    pub fn find_closest(&self, left: Position, right: Position, parent: NodeId) -> PathCursor {
        let probe = PathKey {
            left,
            right,
            parent,
            child: NodeId::from(0_i64),
            edge: EdgeId::from(0_i64),
        };

        let mut from_probe = self.0.range(probe..);
        let first_after = from_probe.next().copied();
        let second_after = from_probe.next().copied();
        let predecessor_key = self.0.range(..probe).next_back().copied();

        let is_exact = |k: &PathKey| k.left == left && k.right == right && k.parent == parent;

        let (exact, successor_key) = match first_after {
            Some(k) if is_exact(&k) => (Some((k.child, k.edge)), second_after),
            other => (None, other),
        };

        PathCursor {
            exact,
            predecessor: predecessor_key.map(|k| (k.left, k.right, k.parent, k.child, k.edge)),
            successor: successor_key.map(|k| (k.left, k.right, k.parent, k.child, k.edge)),
        }
    }
}

/// The three indexes bundled together, since every live edge must
/// appear in all three and they are always mutated in lockstep.
#[derive(Debug, Default)]
pub struct Indexes {
    pub left: LeftIndex,
    pub right: RightIndex,
    pub path: PathIndex,
}

impl Indexes {
    pub fn entry_for(id: EdgeId, e: &Edge) -> IndexEntry {
        IndexEntry {
            left: e.left,
            right: e.right,
            parent: e.parent,
            child: e.child,
            child_time: e.time,
            edge: id,
        }
    }

    /// Insert `id` into all three indexes. `e.child` must already be the
    /// real owning node (not `NodeId::NULL`).
    pub fn insert(&mut self, id: EdgeId, e: &Edge) {
        debug_assert!(!e.child.is_null());
        let entry = Self::entry_for(id, e);
        self.left.insert(entry);
        self.right.insert(entry);
        self.path.insert(entry);
    }

    /// Remove `id` from all three indexes. `e` must reflect the fields
    /// the edge had when it was inserted (in particular, `e.child` is
    /// the real owning node, read before the caller nulls it out).
    pub fn remove(&mut self, id: EdgeId, e: &Edge) {
        let entry = Self::entry_for(id, e);
        self.left.remove(entry);
        self.right.remove(entry);
        self.path.remove(entry);
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Every invariant property #2/#3 in one call: all three indexes
    /// have equal cardinality.
    pub fn cardinalities_agree(&self) -> bool {
        self.left.len() == self.right.len() && self.right.len() == self.path.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(left: u64, right: u64, parent: i64, child: i64, ctime: f64, edge: i64) -> IndexEntry {
        IndexEntry {
            left: Position::from(left),
            right: Position::from(right),
            parent: NodeId::from(parent),
            child: NodeId::from(child),
            child_time: Time::from(ctime),
            edge: EdgeId::from(edge),
        }
    }

    #[test]
    fn path_index_finds_exact_and_neighbors() {
        let mut idx = PathIndex::default();
        idx.insert(entry(0, 2, 0, 2, 1.0, 0));
        idx.insert(entry(2, 3, 1, 2, 1.0, 1));
        idx.insert(entry(5, 9, 1, 3, 1.0, 2));

        let cursor = idx.find_closest(Position::from(2_u64), Position::from(3_u64), NodeId::from(1_i64));
        assert_eq!(cursor.exact, Some((NodeId::from(2_i64), EdgeId::from(1_i64))));
        assert!(cursor.predecessor.is_some());
        assert!(cursor.successor.is_some());

        let miss = idx.find_closest(Position::from(3_u64), Position::from(4_u64), NodeId::from(9_i64));
        assert_eq!(miss.exact, None);
    }

    #[test]
    fn left_and_right_index_orderings() {
        let mut left = LeftIndex::default();
        let mut right = RightIndex::default();
        left.insert(entry(0, 2, 0, 2, 2.0, 0));
        left.insert(entry(0, 2, 0, 1, 1.0, 1));
        right.insert(entry(0, 2, 0, 2, 2.0, 0));
        right.insert(entry(0, 2, 0, 1, 1.0, 1));

        // left index: time(child) ascending for equal `left`.
        let left_order: Vec<_> = left.iter_edges().collect();
        assert_eq!(left_order, vec![EdgeId::from(1_i64), EdgeId::from(0_i64)]);

        // right index: time(child) descending for equal `right`.
        let right_order: Vec<_> = right.iter_edges().collect();
        assert_eq!(right_order, vec![EdgeId::from(0_i64), EdgeId::from(1_i64)]);
    }
}
