//! Error types for relaxviz-engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a graph or generating a trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The graph violates a structural invariant.
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] InvalidGraph),

    /// `dist[u] + w` does not fit in an `i64`.
    #[error("distance overflow while relaxing edge {edge}")]
    DistanceOverflow { edge: usize },
}

/// Why a graph was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGraph {
    /// A graph needs at least one vertex to hold the source.
    #[error("graph has no vertices")]
    Empty,

    /// The source vertex is not in `[0, V)`.
    #[error("source vertex {vertex} out of range for {vertex_count} vertices")]
    SourceOutOfRange { vertex: usize, vertex_count: usize },

    /// An edge endpoint is not in `[0, V)`.
    #[error("edge {index} ({from} → {to}) references a vertex outside 0..{vertex_count}")]
    EdgeOutOfRange {
        index: usize,
        from: usize,
        to: usize,
        vertex_count: usize,
    },
}
