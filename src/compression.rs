//! Path compression (`spec.md` §4.5): detect shared prefixes across
//! haplotypes and replace the duplicated parentage with a synthesized
//! intermediate ancestor node, modifying existing edges in place while
//! preserving all three index invariants.

use crate::arena::{Edge, EdgeArena};
use crate::error::{BuilderError, BuilderResult};
use crate::flags::NodeFlags;
use crate::index::Indexes;
use crate::newtypes::{EdgeId, NodeId};
use crate::node_table::NodeTable;
use crate::path_store::PathStore;
use crate::squash;

/// `ε` in `spec.md` §4.5: a PC ancestor sits `2⁻¹⁶` below the minimum
/// parent time in its contig. A power of two so the decrement is exact
/// in floating point and there is no cumulative drift across many
/// generations of PC ancestors.
pub const PC_ANCESTOR_EPSILON: f64 = 1.0 / 65536.0;

struct Match {
    source: EdgeId,
    dest_child: NodeId,
    dest: EdgeId,
}

/// Run path compression on `child`'s freshly linked, not-yet-indexed
/// path. On return the path is squashed but still unindexed; `add_path`
/// indexes it afterward, per its contract.
pub fn compress_path(
    child: NodeId,
    arena: &mut EdgeArena,
    nodes: &mut NodeTable,
    paths: &mut PathStore,
    indexes: &mut Indexes,
) -> BuilderResult<()> {
    // 1. Scan for matches, left to right, against the (not yet including
    // this path) path index.
    let path_edges: Vec<EdgeId> = paths.iter_path(child, arena).collect();
    let mut matches: Vec<Match> = Vec::new();
    for edge_id in path_edges {
        let e = *arena.get(edge_id);
        let cursor = indexes.path.find_closest(e.left, e.right, e.parent);
        if let Some((dest_child, dest_edge)) = cursor.exact {
            matches.push(Match {
                source: edge_id,
                dest_child,
                dest: dest_edge,
            });
        }
    }

    // 2. Segment into contigs: a new contig starts whenever the match is
    // not immediately adjacent (in source coordinates) to the previous
    // match, or the matched existing child changes.
    let mut i = 0;
    while i < matches.len() {
        let mut j = i + 1;
        while j < matches.len()
            && matches[j].dest_child == matches[i].dest_child
            && arena.get(matches[j - 1].source).right == arena.get(matches[j].source).left
        {
            j += 1;
        }
        if j - i >= 2 {
            process_contig(&matches[i..j], arena, nodes, paths, indexes)?;
        }
        i = j;
    }

    // 4. Squash the new child's (still unindexed) path.
    squash::squash_unindexed(child, arena, paths);
    Ok(())
}

fn process_contig(
    contig: &[Match],
    arena: &mut EdgeArena,
    nodes: &mut NodeTable,
    paths: &mut PathStore,
    indexes: &mut Indexes,
) -> BuilderResult<()> {
    let shared_child = contig[0].dest_child;

    if nodes.flags(shared_child).contains(NodeFlags::IS_PC_ANCESTOR) {
        // Reuse: rewrite the new path's parentage, touch nothing else.
        for m in contig {
            arena.get_mut(m.source).parent = shared_child;
        }
        return Ok(());
    }

    // Synthesize a new PC ancestor.
    let min_parent_time = contig
        .iter()
        .map(|m| nodes.time(arena.get(m.source).parent))
        .min()
        .expect("contig is non-empty by construction");
    let pc_time = min_parent_time - PC_ANCESTOR_EPSILON;
    let child_time = nodes.time(shared_child);
    if !(pc_time > child_time) {
        return Err(BuilderError::AssertionFailure(format!(
            "PC ancestor time {pc_time} does not exceed existing child time {child_time}"
        )));
    }
    let p = nodes.add_row(pc_time, NodeFlags::IS_PC_ANCESTOR);
    paths.ensure_node(p);

    // Build p's own (unindexed) path: one edge per contig entry, with
    // the contig's *original* source parent.
    let mut prev = EdgeId::NULL;
    for m in contig {
        let src = *arena.get(m.source);
        let id = arena.alloc(Edge {
            left: src.left,
            right: src.right,
            parent: src.parent,
            child: p,
            time: nodes.time(p),
            next: EdgeId::NULL,
        });
        if prev.is_null() {
            paths.set_head(p, id);
        } else {
            arena.get_mut(prev).next = id;
        }
        prev = id;
    }
    squash::squash_unindexed(p, arena, paths);

    // Redirect the new path's edges (still unindexed) to p.
    for m in contig {
        arena.get_mut(m.source).parent = p;
    }

    // Detach the existing indexed edges and redirect them to p.
    for m in contig {
        let dest = *arena.get(m.dest);
        indexes.remove(m.dest, &dest);
        arena.get_mut(m.dest).parent = p;
        arena.get_mut(m.dest).child = NodeId::NULL;
    }

    // Squash the shared existing child's path: restores `child` on the
    // now-detached edges and reinserts them (merged where possible).
    squash::squash_indexed(shared_child, arena, paths, indexes);

    // Finally, index p's new path.
    let p_edges: Vec<EdgeId> = paths.iter_path(p, arena).collect();
    for edge_id in p_edges {
        let e = *arena.get(edge_id);
        indexes.insert(edge_id, &e);
    }

    Ok(())
}
