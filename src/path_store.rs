//! Per-child path storage.
//!
//! For each node `c`, the path store holds the head of `c`'s indexed
//! edge chain (a singly-linked, left-to-right list threaded through
//! [`crate::arena::Edge::next`]). The store itself is just the head
//! array; chain traversal goes through the shared [`EdgeArena`].

use crate::arena::EdgeArena;
use crate::newtypes::{EdgeId, NodeId};

#[derive(Debug, Default)]
pub struct PathStore {
    heads: Vec<EdgeId>,
}

impl PathStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heads: Vec::with_capacity(capacity),
        }
    }

    /// Grow the head array to cover `node`, filling new slots with an
    /// empty path. Called from `add_node` so every node has a slot
    /// before any edge can reference it as a child.
    pub fn ensure_node(&mut self, node: NodeId) {
        let idx = node.as_usize();
        if idx >= self.heads.len() {
            self.heads.resize(idx + 1, EdgeId::NULL);
        }
    }

    pub fn head(&self, child: NodeId) -> EdgeId {
        self.heads[child.as_usize()]
    }

    pub fn set_head(&mut self, child: NodeId, head: EdgeId) {
        self.heads[child.as_usize()] = head;
    }

    /// Iterate the live edges on `child`'s path, left to right.
    pub fn iter_path<'a>(
        &self,
        child: NodeId,
        arena: &'a EdgeArena,
    ) -> impl Iterator<Item = EdgeId> + 'a {
        let mut cursor = self.head(child);
        std::iter::from_fn(move || {
            if cursor.is_null() {
                None
            } else {
                let current = cursor;
                cursor = arena.get(current).next;
                Some(current)
            }
        })
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}
