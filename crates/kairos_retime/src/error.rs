//! Error types for the retiming engine.

use kairos_common::{Delay, InternalError, Registers};
use kairos_graph::Circuit;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

/// Errors returned by clock period analysis, W/D computation, and retiming.
///
/// An infeasible target clock period is not an error; oracles report it as
/// `None`.
#[derive(Debug, thiserror::Error)]
pub enum RetimeError {
    /// A node has a negative propagation delay.
    #[error("node `{node}` has negative delay {delay}")]
    NegativeDelay {
        /// Name of the offending node.
        node: String,
        /// Its delay.
        delay: Delay,
    },

    /// An edge has, or a retiming would give it, a negative register count.
    #[error("edge `{from}` -> `{to}` has negative register count {weight}")]
    NegativeWeight {
        /// Name of the driving node.
        from: String,
        /// Name of the driven node.
        to: String,
        /// The offending weight.
        weight: Registers,
    },

    /// The zero-register subgraph contains a cycle.
    #[error("combinational cycle through node `{node}`")]
    CombinationalCycle {
        /// A node on the cycle.
        node: String,
    },

    /// A W/D lookup on a pair of nodes with no path between them.
    #[error("no path from `{from}` to `{to}`")]
    Unreachable {
        /// Name of the source node.
        from: String,
        /// Name of the target node.
        to: String,
    },

    /// A path weight or delay no longer fits in an `i64`.
    #[error("path weight from `{from}` to `{to}` overflows")]
    Overflow {
        /// Name of the source node.
        from: String,
        /// Name of the target node.
        to: String,
    },

    /// A retiming does not assign exactly one lag per node.
    #[error("retiming has {found} entries but the circuit has {expected} nodes")]
    RetimingSize {
        /// Number of nodes in the circuit.
        expected: usize,
        /// Number of lags in the retiming.
        found: usize,
    },

    /// A bug inside Kairos.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Rejects circuits that are not synchronous.
///
/// Node delays and edge weights are checked directly. The zero-register
/// condition is checked by topologically sorting the zero-weight subgraph,
/// which is linear where exhaustive cycle enumeration is not.
pub(crate) fn ensure_synchronous(circuit: &Circuit) -> Result<(), RetimeError> {
    ensure_non_negative(circuit)?;
    zero_weight_order(circuit).map(|_| ())
}

/// Checks node delays and edge weights for negative values.
pub(crate) fn ensure_non_negative(circuit: &Circuit) -> Result<(), RetimeError> {
    if let Some(node) = circuit.nodes.iter().find(|n| n.delay < 0) {
        return Err(RetimeError::NegativeDelay {
            node: node.name.clone(),
            delay: node.delay,
        });
    }
    if let Some(edge) = circuit.edges.iter().find(|e| e.weight < 0) {
        return Err(RetimeError::NegativeWeight {
            from: circuit.node_name(edge.from).to_string(),
            to: circuit.node_name(edge.to).to_string(),
            weight: edge.weight,
        });
    }
    Ok(())
}

/// Builds G0, the subgraph of zero-weight edges over every node.
///
/// Node `i` of the returned graph is node `i` of the circuit.
pub(crate) fn zero_weight_graph(circuit: &Circuit) -> DiGraph<(), ()> {
    let mut g0 = DiGraph::with_capacity(circuit.node_count(), circuit.edge_count());
    for _ in 0..circuit.node_count() {
        g0.add_node(());
    }
    for edge in circuit.edges.iter().filter(|e| e.weight == 0) {
        g0.add_edge(
            NodeIndex::new(edge.from.index()),
            NodeIndex::new(edge.to.index()),
            (),
        );
    }
    g0
}

/// Returns the nodes of G0 in topological order.
pub(crate) fn zero_weight_order(circuit: &Circuit) -> Result<Vec<NodeIndex>, RetimeError> {
    toposort(&zero_weight_graph(circuit), None).map_err(|cycle| RetimeError::CombinationalCycle {
        node: circuit.nodes[cycle.node_id().index()].name.clone(),
    })
}
