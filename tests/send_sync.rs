//! Pins down the builder's current auto-trait status (`SPEC_FULL.md`
//! §5): nothing requires it to be `Send`/`Sync`, but downstream code
//! may come to depend on it, so a regression here should be visible.

use std::sync::Arc;
use std::thread;

use tsbuild::prelude::*;

#[test]
fn builder_is_send_and_sync() {
    let mut b = TreeSequenceBuilder::alloc(3, BuilderConfig::default());
    let n0 = b.add_node(Time::from(1.0), NodeFlags::NONE);
    let n1 = b.add_node(Time::from(0.0), NodeFlags::NONE);
    b.add_path(
        n1,
        &[PathSegment {
            left: Position::from(0_u64),
            right: Position::from(3_u64),
            parent: n0,
        }],
        PathFlags::NONE,
    )
    .unwrap();

    let arc = Arc::new(b);
    let handle = thread::spawn({
        let arc = Arc::clone(&arc);
        move || arc.get_num_edges()
    });
    assert_eq!(handle.join().unwrap(), 1);
}
