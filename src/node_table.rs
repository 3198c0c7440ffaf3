//! The node table: an append-only array of `(time, flags)` per node.

use crate::flags::NodeFlags;
use crate::newtypes::{IndividualId, NodeId, PopulationId, Time};

/// A single row, as returned by iteration or [`NodeTable::row`].
///
/// `population` and `individual` are always `NULL` (`spec.md` §6:
/// `population=null, individual=null`); this crate tracks neither
/// table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTableRow {
    pub id: NodeId,
    pub time: Time,
    pub flags: NodeFlags,
    pub population: PopulationId,
    pub individual: IndividualId,
}

#[derive(Debug, Default)]
pub struct NodeTable {
    time: Vec<Time>,
    flags: Vec<NodeFlags>,
}

impl NodeTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            flags: Vec::with_capacity(capacity),
        }
    }

    /// Append a node and return its id. Nodes are never removed: ids are
    /// assigned in insertion order, `0..num_rows()`.
    pub fn add_row(&mut self, time: Time, flags: NodeFlags) -> NodeId {
        self.time.push(time);
        self.flags.push(flags);
        NodeId::from(self.time.len() - 1)
    }

    pub fn num_rows(&self) -> usize {
        self.time.len()
    }

    pub fn time(&self, node: NodeId) -> Time {
        self.time[node.as_usize()]
    }

    pub fn flags(&self, node: NodeId) -> NodeFlags {
        self.flags[node.as_usize()]
    }

    pub fn set_flags(&mut self, node: NodeId, flags: NodeFlags) {
        self.flags[node.as_usize()] = flags;
    }

    pub fn is_valid(&self, node: NodeId) -> bool {
        node.to_usize().is_some_and(|i| i < self.time.len())
    }

    pub fn row(&self, node: NodeId) -> Option<NodeTableRow> {
        let idx = node.to_usize()?;
        if idx >= self.time.len() {
            return None;
        }
        Some(NodeTableRow {
            id: node,
            time: self.time[idx],
            flags: self.flags[idx],
            population: PopulationId::NULL,
            individual: IndividualId::NULL,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeTableRow> + '_ {
        (0..self.num_rows()).map(|i| NodeTableRow {
            id: NodeId::from(i),
            time: self.time[i],
            flags: self.flags[i],
            population: PopulationId::NULL,
            individual: IndividualId::NULL,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_only_ids() {
        let mut t = NodeTable::default();
        let a = t.add_row(Time::from(1.0), NodeFlags::NONE);
        let b = t.add_row(Time::from(0.0), NodeFlags::IS_SAMPLE);
        assert_eq!(a, NodeId::from(0_i64));
        assert_eq!(b, NodeId::from(1_i64));
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.time(b), Time::from(0.0));
        assert!(t.flags(b).contains(NodeFlags::IS_SAMPLE));
    }
}
