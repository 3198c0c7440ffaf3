//! The concrete numbered scenarios in `spec.md` §8, run end to end
//! through the public API.

use tsbuild::prelude::*;

fn seg(left: u64, right: u64, parent: NodeId) -> PathSegment {
    PathSegment {
        left: Position::from(left),
        right: Position::from(right),
        parent,
    }
}

#[test]
fn scenario_1_two_node_genealogy() {
    let mut b = TreeSequenceBuilder::alloc(3, BuilderConfig::default());
    let n0 = b.add_node(Time::from(2.0), NodeFlags::NONE);
    let n1 = b.add_node(Time::from(1.0), NodeFlags::NONE);

    b.add_path(n1, &[seg(0, 3, n0)], PathFlags::NONE).unwrap();

    assert_eq!(b.get_num_edges(), 1);
    let mut tables = TableCollection::new(3);
    b.dump(&mut tables, DumpFlags::NONE);
    assert_eq!(tables.nodes().len(), 2);
    assert_eq!(tables.edges().len(), 1);
    assert_eq!(tables.edges()[0].parent, n0);
    assert_eq!(tables.edges()[0].child, n1);
}

#[test]
fn scenario_5_non_contiguous_rejection() {
    let mut b = TreeSequenceBuilder::alloc(3, BuilderConfig::default());
    let n0 = b.add_node(Time::from(2.0), NodeFlags::NONE);
    let n1 = b.add_node(Time::from(1.0), NodeFlags::NONE);

    let err = b
        .add_path(n1, &[seg(2, 3, n0), seg(0, 1, n0)], PathFlags::NONE)
        .unwrap_err();
    assert!(matches!(err, BuilderError::NonContiguousEdges(_)));
    // builder state before the rejected call must be untouched.
    assert_eq!(b.get_num_edges(), 0);
}

#[test]
fn scenario_6_time_order_rejection() {
    let mut b = TreeSequenceBuilder::alloc(3, BuilderConfig::default());
    let n0 = b.add_node(Time::from(1.0), NodeFlags::NONE);
    let n1 = b.add_node(Time::from(2.0), NodeFlags::NONE);

    let err = b.add_path(n1, &[seg(0, 1, n0)], PathFlags::NONE).unwrap_err();
    assert!(matches!(err, BuilderError::BadPathTime(_)));
}

#[test]
fn scenario_3_and_4_pc_synthesis_then_reuse() {
    let mut b = TreeSequenceBuilder::alloc(3, BuilderConfig::default());
    let n0 = b.add_node(Time::from(3.0), NodeFlags::NONE);
    let n1 = b.add_node(Time::from(3.0), NodeFlags::NONE);
    let n2 = b.add_node(Time::from(1.0), NodeFlags::NONE);
    let n3 = b.add_node(Time::from(1.0), NodeFlags::NONE);

    b.add_path(n2, &[seg(2, 3, n1), seg(0, 2, n0)], PathFlags::NONE)
        .unwrap();
    b.add_path(n3, &[seg(2, 3, n1), seg(0, 2, n0)], PathFlags::COMPRESS_PATH)
        .unwrap();

    let pc = NodeId::from(4_i64);
    assert_eq!(b.get_num_nodes(), 5);

    let mut tables = TableCollection::new(3);
    b.dump(&mut tables, DumpFlags::NONE);
    assert!(tables.nodes()[pc.as_usize()].flags.contains(NodeFlags::IS_PC_ANCESTOR));
    let pc_time = f64::from(tables.nodes()[pc.as_usize()].time);
    assert!((pc_time - (3.0 - 1.0 / 65536.0)).abs() < 1e-12);

    let pc_edges: Vec<_> = tables.edges().iter().filter(|e| e.child == pc).collect();
    assert_eq!(pc_edges.len(), 2);
    let n2_edges: Vec<_> = tables.edges().iter().filter(|e| e.child == n2).collect();
    let n3_edges: Vec<_> = tables.edges().iter().filter(|e| e.child == n3).collect();
    assert_eq!(n2_edges.len(), 1);
    assert_eq!(n3_edges.len(), 1);
    assert_eq!(n2_edges[0].parent, pc);
    assert_eq!(n3_edges[0].parent, pc);

    // scenario 4: a third path reusing the same segments must reuse the
    // PC ancestor rather than creating a new one.
    let n5 = b.add_node(Time::from(1.0), NodeFlags::NONE);
    b.add_path(n5, &[seg(2, 3, n1), seg(0, 2, n0)], PathFlags::COMPRESS_PATH)
        .unwrap();
    assert_eq!(b.get_num_nodes(), 6);

    let mut tables2 = TableCollection::new(3);
    b.dump(&mut tables2, DumpFlags::NONE);
    let n5_edges: Vec<_> = tables2.edges().iter().filter(|e| e.child == n5).collect();
    assert_eq!(n5_edges.len(), 1);
    assert_eq!(n5_edges[0].parent, pc);
    assert_eq!(n5_edges[0].left, Position::from(0_u64));
    assert_eq!(n5_edges[0].right, Position::from(3_u64));
}

#[test]
fn boundary_single_edge_spans_all_sites() {
    let mut b = TreeSequenceBuilder::alloc(10, BuilderConfig::default());
    let n0 = b.add_node(Time::from(1.0), NodeFlags::NONE);
    let n1 = b.add_node(Time::from(0.0), NodeFlags::NONE);
    b.add_path(n1, &[seg(0, 10, n0)], PathFlags::COMPRESS_PATH).unwrap();
    assert_eq!(b.get_num_edges(), 1);
}

#[test]
fn mutations_chain_per_site_and_reject_bad_head() {
    let mut b = TreeSequenceBuilder::alloc(2, BuilderConfig::default());
    let n0 = b.add_node(Time::from(1.0), NodeFlags::NONE);
    let n1 = b.add_node(Time::from(0.0), NodeFlags::NONE);
    b.add_path(n1, &[seg(0, 2, n0)], PathFlags::NONE).unwrap();

    // first mutation at a site must be derived (state 1).
    let bad = b.add_mutations(n1, &[SiteId::from(0_usize)], &[0]);
    assert!(bad.is_err());

    let ids = b
        .add_mutations(n1, &[SiteId::from(0_usize), SiteId::from(0_usize)], &[1, 0])
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(b.get_num_mutations(), 2);

    let mut tables = TableCollection::new(2);
    b.dump(&mut tables, DumpFlags::NONE);
    assert_eq!(tables.mutations()[0].parent, None);
    assert_eq!(tables.mutations()[1].parent, Some(ids[0]));
}
