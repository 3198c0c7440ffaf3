//! An incremental tree sequence builder for ancestral-recombination-graph
//! inference.
//!
//! The core maintains an indexed genealogy as haplotype paths arrive one
//! child at a time: [`NodeTable`] and the path store record each node's
//! ancestry, the edge [`arena`] pools allocation, three ordered indexes
//! keep the live edge set queryable, and [`compression`] opportunistically
//! deduplicates shared path segments into synthesized ancestor nodes.
//! [`TreeSequenceBuilder::dump`] renders the final state into a
//! [`TableCollection`].
//!
//! Out of scope: the Li-Stephens ancestor matcher that produces the input
//! paths, the ancestor builder, the pipeline driver, the CLI, and any
//! on-disk table-collection format.

pub mod ancestor_store;
pub mod arena;
pub mod builder;
pub mod compression;
pub mod edge_table;
pub mod error;
pub mod flags;
pub mod freeze;
pub mod index;
pub mod mutation_table;
pub mod newtypes;
pub mod node_table;
pub mod path_store;
pub mod prelude;
pub mod site_table;
pub mod squash;
pub mod table_collection;

pub use ancestor_store::{Ancestor, AncestorStore, AncestorStoreBuilder};
pub use arena::{Edge, EdgeArena};
pub use builder::{BuilderConfig, PathSegment, TreeSequenceBuilder};
pub use edge_table::{EdgeTable, EdgeTableRow};
pub use error::{BuilderError, BuilderResult};
pub use flags::{DumpFlags, NodeFlags, PathFlags};
pub use freeze::FrozenIndexes;
pub use mutation_table::{MutationTable, MutationTableRow};
pub use newtypes::{EdgeId, IndividualId, MutationId, NodeId, PopulationId, Position, SiteId, Time};
pub use node_table::{NodeTable, NodeTableRow};
pub use path_store::PathStore;
pub use site_table::{SiteTable, SiteTableRow};
pub use table_collection::TableCollection;
