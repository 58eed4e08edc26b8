//! Error types for circuit generation.

/// Errors that can occur while generating a circuit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// A correlator needs at least one stage.
    #[error("correlator order must be at least 1")]
    ZeroOrder,

    /// Every node needs a predecessor and self-loops are never drawn, so a
    /// random circuit needs two nodes.
    #[error("a random circuit needs at least 2 nodes, got {nodes}")]
    TooFewNodes {
        /// Requested node count.
        nodes: usize,
    },

    /// The edge count is outside what the node count allows.
    #[error("{nodes} nodes admit between {min} and {max} edges, got {edges}")]
    EdgeCount {
        /// Requested node count.
        nodes: usize,
        /// Requested edge count.
        edges: usize,
        /// One incoming edge per node.
        min: usize,
        /// One edge per ordered pair of distinct nodes.
        max: usize,
    },

    /// No acceptable circuit was drawn within the attempt budget.
    #[error("no synchronous circuit found in {attempts} attempt(s)")]
    Exhausted {
        /// Number of graphs drawn.
        attempts: usize,
    },
}
