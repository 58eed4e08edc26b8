//! Clock period computation.
//!
//! The clock period of a synchronous circuit is the largest delay
//! accumulated along any path of zero-weight edges. Because the zero-weight
//! subgraph G0 is acyclic, one pass in topological order computes, for every
//! node `v`, the worst delay ∆(v) reaching the output of `v` since the last
//! register:
//!
//! ```text
//! ∆(v) = d(v)                                  if v has no G0 predecessor
//! ∆(v) = d(v) + max { ∆(u) : u -> v in G0 }    otherwise
//! ```

use crate::error::{ensure_synchronous, zero_weight_graph, RetimeError};
use kairos_common::{Delay, InternalError, KairosResult};
use kairos_graph::{Circuit, NodeId};
use petgraph::algo::toposort;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// Per-node accumulated delays ∆, indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaMap {
    deltas: Vec<Delay>,
}

impl DeltaMap {
    /// Returns ∆ of a node.
    pub fn get(&self, node: NodeId) -> Delay {
        self.deltas[node.index()]
    }

    /// Returns the clock period, the largest ∆, or 0 for an empty circuit.
    pub fn period(&self) -> Delay {
        self.deltas.iter().copied().max().unwrap_or(0)
    }

    /// Iterates over `(node, ∆)` in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Delay)> + '_ {
        self.deltas
            .iter()
            .enumerate()
            .map(|(i, &d)| (NodeId::from_raw(i as u32), d))
    }

    /// Returns the nodes whose ∆ exceeds `period`.
    pub fn exceeding(&self, period: Delay) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(move |&(_, d)| d > period).map(|(n, _)| n)
    }

    /// Returns ∆ as a slice indexed by node.
    pub fn as_slice(&self) -> &[Delay] {
        &self.deltas
    }
}

/// Computes the clock period of a synchronous circuit.
///
/// # Errors
///
/// Fails if the circuit has a negative delay or weight, or a cycle of
/// zero-weight edges.
pub fn clock_period(circuit: &Circuit) -> Result<Delay, RetimeError> {
    Ok(delta_map(circuit)?.period())
}

/// Computes ∆ for every node of a synchronous circuit.
///
/// # Errors
///
/// Same as [`clock_period`].
pub fn delta_map(circuit: &Circuit) -> Result<DeltaMap, RetimeError> {
    ensure_synchronous(circuit)?;
    Ok(deltas_unchecked(circuit)?)
}

/// Computes ∆ without checking delays and weights.
///
/// Edges with a negative weight are treated like registered edges. Callers
/// guarantee G0 is acyclic (retiming never changes a cycle's register
/// count), so a cycle here is a bug.
pub(crate) fn deltas_unchecked(circuit: &Circuit) -> KairosResult<DeltaMap> {
    // Fully registered: every node starts a path of its own.
    if !circuit.has_combinational_edge() {
        return Ok(DeltaMap {
            deltas: circuit.nodes.iter().map(|n| n.delay).collect(),
        });
    }

    let g0 = zero_weight_graph(circuit);
    let order = toposort(&g0, None).map_err(|cycle| {
        InternalError::new(format!(
            "zero-weight cycle through `{}` after the synchrony check",
            circuit.nodes[cycle.node_id().index()].name
        ))
    })?;

    let mut deltas = vec![0; circuit.node_count()];
    for v in order {
        let worst_input = g0
            .neighbors_directed(v, Direction::Incoming)
            .map(|u| deltas[u.index()])
            .max()
            .unwrap_or(0);
        deltas[v.index()] = circuit.nodes[v.index()].delay + worst_input;
    }
    Ok(DeltaMap { deltas })
}
