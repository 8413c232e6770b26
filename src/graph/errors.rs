//! Graph error types

use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Graph errors. Node payloads are the `Debug` rendering of the node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge has unknown parent: {0}")]
    UnknownParent(String),

    #[error("edge has unknown child: {0}")]
    UnknownChild(String),

    #[error("directed graph has a cycle")]
    CycleDetected,

    #[error("invalid source node {0}")]
    InvalidSource(String),

    #[error("invalid destination node {0}")]
    InvalidDestination(String),

    #[error("negative distance {distance} for edge {from} -> {to}")]
    NegativeDistance {
        from: String,
        to: String,
        distance: i64,
    },
}

impl GraphError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::UnknownParent(_) => "GRAPH_UNKNOWN_PARENT",
            GraphError::UnknownChild(_) => "GRAPH_UNKNOWN_CHILD",
            GraphError::CycleDetected => "GRAPH_CYCLE_DETECTED",
            GraphError::InvalidSource(_) => "GRAPH_INVALID_SOURCE",
            GraphError::InvalidDestination(_) => "GRAPH_INVALID_DESTINATION",
            GraphError::NegativeDistance { .. } => "GRAPH_NEGATIVE_DISTANCE",
        }
    }
}
