//! Error types shared by the instance reader and the evolutionary engine.

use crate::graph::Node;
use thiserror::Error;

/// Errors produced while loading an instance or running the search.
///
/// Parse and configuration errors are raised before the first generation;
/// the generation loop itself is purely computational and only fails when
/// an incomplete tree is rejected.
#[derive(Debug, Error)]
pub enum MlstError {
    /// Malformed instance text (non-integer token or wrong field count).
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number in the instance text.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Invalid parameter or degenerate instance.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A constructed tree does not reach every node of the instance.
    #[error("spanning tree rooted at {root} covers {covered} of {expected} nodes")]
    IncompleteTree {
        /// Root the DFS started from.
        root: Node,
        /// Nodes touched by the tree.
        covered: usize,
        /// Nodes in the instance.
        expected: usize,
    },

    /// The instance file could not be read.
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MlstError>;
