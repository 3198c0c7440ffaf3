//! Edge squashing: coalescing contiguous same-parent edge runs on a
//! child's path (`spec.md` §4.6).

use crate::arena::EdgeArena;
use crate::index::Indexes;
use crate::newtypes::NodeId;
use crate::path_store::PathStore;

/// Squash a path that is not yet indexed. Single pass: whenever
/// `prev.right == next.left && prev.parent == next.parent`, `prev` is
/// extended and `next` is freed.
pub fn squash_unindexed(child: NodeId, arena: &mut EdgeArena, paths: &mut PathStore) {
    let mut current = paths.head(child);
    if current.is_null() {
        return;
    }
    loop {
        let next_id = arena.get(current).next;
        if next_id.is_null() {
            break;
        }
        let cur_right = arena.get(current).right;
        let cur_parent = arena.get(current).parent;
        let next = *arena.get(next_id);
        if cur_right == next.left && cur_parent == next.parent {
            arena.get_mut(current).right = next.right;
            arena.get_mut(current).next = next.next;
            arena.free(next_id);
        } else {
            current = next_id;
        }
    }
}

/// Squash a path whose edges are already indexed (membership may have
/// just been perturbed by path compression). Every edge touched by a
/// merge is first unindexed and flagged `child = NULL_NODE`; a second
/// pass restores `child` and reinserts anything still flagged.
pub fn squash_indexed(
    child: NodeId,
    arena: &mut EdgeArena,
    paths: &mut PathStore,
    indexes: &mut Indexes,
) {
    let mut current = paths.head(child);
    while !current.is_null() {
        let next_id = arena.get(current).next;
        if next_id.is_null() {
            break;
        }
        let cur = *arena.get(current);
        let next = *arena.get(next_id);
        if cur.right == next.left && cur.parent == next.parent {
            if !cur.child.is_null() {
                indexes.remove(current, &cur);
                arena.get_mut(current).child = NodeId::NULL;
            }
            if !next.child.is_null() {
                indexes.remove(next_id, &next);
            }
            arena.get_mut(current).right = next.right;
            arena.get_mut(current).next = next.next;
            arena.free(next_id);
        } else {
            current = next_id;
        }
    }

    let mut cur = paths.head(child);
    while !cur.is_null() {
        let next = arena.get(cur).next;
        if arena.get(cur).child.is_null() {
            arena.get_mut(cur).child = child;
            let e = *arena.get(cur);
            indexes.insert(cur, &e);
        }
        cur = next;
    }
}
