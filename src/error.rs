//! Error handling.

use thiserror::Error;

/// Errors returned by the tree sequence builder.
///
/// The variants mirror the error taxonomy in the design: input
/// validation errors that are safe to hit before any mutation,
/// `NoMemory` which can in principle surface anywhere, and
/// `AssertionFailure`, which signals a bug and leaves the builder
/// unusable.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum BuilderError {
    /// `add_path` was given a `parent` that does not name an existing
    /// node, or whose time does not exceed the child's time.
    #[error("bad path parent: {0}")]
    BadPathParent(String),
    /// `add_path` was given an edge whose parent's time does not
    /// strictly exceed the child's time.
    #[error("bad path time: {0}")]
    BadPathTime(String),
    /// The edges passed to `add_path` do not tile a contiguous interval.
    #[error("noncontiguous edges: {0}")]
    NonContiguousEdges(String),
    /// `restore_edges` was given edges not sorted by `(child, left)`.
    #[error("unsorted edges: {0}")]
    UnsortedEdges(String),
    /// Resource exhaustion. The builder instance must be discarded.
    #[error("no memory: {0}")]
    NoMemory(String),
    /// An internal invariant was violated. This indicates a bug; the
    /// builder instance must be discarded.
    #[error("assertion failure: {0}")]
    AssertionFailure(String),
    /// A row id was out of range for the table it indexes.
    #[error("index out of range")]
    IndexError,
}

/// Convenience alias used throughout the crate.
pub type BuilderResult<T> = Result<T, BuilderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_nonempty() {
        let e = BuilderError::BadPathTime("parent 3 has time <= child 1".to_string());
        assert!(!format!("{e}").is_empty());
    }
}
