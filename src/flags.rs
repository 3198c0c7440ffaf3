use bitflags::bitflags;

bitflags! {
    /// Per-node flags.
    ///
    /// The only bit this crate's core cares about is
    /// [`NodeFlags::IS_PC_ANCESTOR`], set on nodes synthesized by path
    /// compression ([`crate::compression`]).
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u32 {
        /// Default: an ordinary node, as added by the driver.
        const NONE = 0;
        /// Set on nodes synthesized during path compression.
        const IS_PC_ANCESTOR = 1 << 0;
        /// Conventional "is a sample" bit, carried through `dump`/`restore`
        /// but not otherwise inspected by the core.
        const IS_SAMPLE = 1 << 1;
    }
}

bitflags! {
    /// Flags controlling [`crate::builder::TreeSequenceBuilder::add_path`].
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PathFlags: u32 {
        const NONE = 0;
        /// Run path compression (§4.5) after linking the new path.
        const COMPRESS_PATH = 1 << 0;
        /// Run the (more expensive) debug invariant check at the end of
        /// the call, regardless of build profile.
        const EXTENDED_CHECKS = 1 << 1;
    }
}

bitflags! {
    /// Flags controlling [`crate::table_collection::TableCollection::dump`].
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DumpFlags: u32 {
        const NONE = 0;
        /// Clear and reuse the caller's table collection rather than
        /// allocating a fresh one.
        const NO_INIT = 1 << 0;
    }
}
