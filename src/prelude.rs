//! Common imports for callers driving the builder end to end.

pub use crate::ancestor_store::{Ancestor, AncestorStore, AncestorStoreBuilder};
pub use crate::builder::{BuilderConfig, PathSegment, TreeSequenceBuilder};
pub use crate::error::{BuilderError, BuilderResult};
pub use crate::flags::{DumpFlags, NodeFlags, PathFlags};
pub use crate::newtypes::{EdgeId, IndividualId, MutationId, NodeId, PopulationId, Position, SiteId, Time};
pub use crate::table_collection::TableCollection;
