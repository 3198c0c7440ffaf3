//! Freeze: materialize the dynamic ordered indexes into flat,
//! cache-friendly arrays for downstream traversal (`spec.md` §4.8).
//!
//! `EdgeDifferencesIterator` drives incremental tree construction by
//! walking exactly two flat, pre-sorted edge arrays rather than
//! re-querying a live index on every step. This crate does not
//! implement that downstream traversal (out of scope, `spec.md` §1)
//! but exposes the two arrays plus a minimal streaming cursor over
//! each, built with the same `streaming-iterator` crate.

use streaming_iterator::StreamingIterator;

use crate::arena::EdgeArena;
use crate::edge_table::EdgeTableRow;
use crate::index::Indexes;
use crate::newtypes::Position;

/// A snapshot of the live edge set in both index orders. Invalidated by
/// any subsequent `add_path` / `add_mutations` call; the builder does
/// not track staleness itself, a point-in-time view the caller is
/// responsible for regenerating.
#[derive(Debug, Default, Clone)]
pub struct FrozenIndexes {
    pub left_index_edges: Vec<EdgeTableRow>,
    pub right_index_edges: Vec<EdgeTableRow>,
}

impl FrozenIndexes {
    pub fn num_edges(&self) -> usize {
        self.left_index_edges.len()
    }

    pub fn iter_left(&self) -> FrozenEdgeCursor<'_> {
        FrozenEdgeCursor::new(&self.left_index_edges)
    }

    pub fn iter_right(&self) -> FrozenEdgeCursor<'_> {
        FrozenEdgeCursor::new(&self.right_index_edges)
    }
}

pub(crate) fn freeze(indexes: &Indexes, arena: &EdgeArena) -> FrozenIndexes {
    let render = |id: crate::newtypes::EdgeId| {
        let e = arena.get(id);
        EdgeTableRow {
            id,
            left: e.left,
            right: e.right,
            parent: e.parent,
            child: e.child,
        }
    };
    FrozenIndexes {
        left_index_edges: indexes.left.iter_edges().map(render).collect(),
        right_index_edges: indexes.right.iter_edges().map(render).collect(),
    }
}

/// A `streaming-iterator` style cursor over a frozen edge array: cheaper
/// than a plain `Iterator` for the downstream matcher's usage pattern of
/// holding the current edge and the current genomic position side by
/// side without re-borrowing on every step.
pub struct FrozenEdgeCursor<'a> {
    edges: &'a [EdgeTableRow],
    pos: Option<usize>,
}

impl<'a> FrozenEdgeCursor<'a> {
    fn new(edges: &'a [EdgeTableRow]) -> Self {
        Self { edges, pos: None }
    }

    pub fn left(&self) -> Option<Position> {
        self.get().map(|e| e.left)
    }
}

impl<'a> StreamingIterator for FrozenEdgeCursor<'a> {
    type Item = EdgeTableRow;

    fn advance(&mut self) {
        self.pos = Some(self.pos.map_or(0, |p| p + 1));
    }

    fn get(&self) -> Option<&EdgeTableRow> {
        self.pos.and_then(|p| self.edges.get(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Edge;
    use crate::newtypes::{EdgeId, NodeId, Time};

    #[test]
    fn freezes_in_index_order() {
        let mut arena = EdgeArena::default();
        let mut indexes = Indexes::default();

        let e0 = arena.alloc(Edge {
            left: Position::from(2_u64),
            right: Position::from(3_u64),
            parent: NodeId::from(0_i64),
            child: NodeId::from(1_i64),
            time: Time::from(1.0),
            next: EdgeId::NULL,
        });
        let e1 = arena.alloc(Edge {
            left: Position::from(0_u64),
            right: Position::from(2_u64),
            parent: NodeId::from(0_i64),
            child: NodeId::from(1_i64),
            time: Time::from(1.0),
            next: EdgeId::NULL,
        });
        indexes.insert(e0, arena.get(e0));
        indexes.insert(e1, arena.get(e1));

        let frozen = freeze(&indexes, &arena);
        assert_eq!(frozen.num_edges(), 2);
        assert_eq!(frozen.left_index_edges[0].left, Position::from(0_u64));
        assert_eq!(frozen.left_index_edges[1].left, Position::from(2_u64));

        let mut cursor = frozen.iter_left();
        cursor.advance();
        assert_eq!(cursor.left(), Some(Position::from(0_u64)));
        cursor.advance();
        assert_eq!(cursor.left(), Some(Position::from(2_u64)));
    }
}
