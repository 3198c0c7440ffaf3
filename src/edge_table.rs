//! The output edge table: flat `(left, right, parent, child)` rows
//! emitted by [`crate::table_collection::TableCollection::dump`].
//!
//! This is distinct from [`crate::arena::Edge`], which additionally
//! carries the cached child time and `next` chain link needed while the
//! edge is live in the path store and the three ordered indexes.

use crate::newtypes::{EdgeId, NodeId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTableRow {
    pub id: EdgeId,
    pub left: Position,
    pub right: Position,
    pub parent: NodeId,
    pub child: NodeId,
}

#[derive(Debug, Default)]
pub struct EdgeTable {
    rows: Vec<EdgeTableRow>,
}

impl EdgeTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn add_row(&mut self, left: Position, right: Position, parent: NodeId, child: NodeId) -> EdgeId {
        let id = EdgeId::from(self.rows.len());
        self.rows.push(EdgeTableRow {
            id,
            left,
            right,
            parent,
            child,
        });
        id
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, id: EdgeId) -> Option<EdgeTableRow> {
        self.rows.get(id.to_usize()?).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeTableRow> + '_ {
        self.rows.iter().copied()
    }

    pub fn as_slice(&self) -> &[EdgeTableRow] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
