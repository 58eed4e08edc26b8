//! Retimings and their application.

use crate::error::{ensure_synchronous, RetimeError};
use kairos_common::Registers;
use kairos_graph::{Circuit, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An integer lag per node, indexed by [`NodeId`].
///
/// Retiming with `r` moves `r(v)` registers from the outputs of `v` to its
/// inputs: edge `u -> v` ends up with `w + r(v) - r(u)` registers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Retiming {
    lags: Vec<Registers>,
}

impl Retiming {
    /// The identity retiming of a circuit with `node_count` nodes.
    pub fn zero(node_count: usize) -> Self {
        Self {
            lags: vec![0; node_count],
        }
    }

    /// Wraps explicit lags, one per node in ID order.
    pub fn from_lags(lags: Vec<Registers>) -> Self {
        Self { lags }
    }

    /// Returns the lag of a node.
    pub fn lag(&self, node: NodeId) -> Registers {
        self.lags[node.index()]
    }

    /// Returns all lags in node ID order.
    pub fn lags(&self) -> &[Registers] {
        &self.lags
    }

    /// Returns the number of lags.
    pub fn len(&self) -> usize {
        self.lags.len()
    }

    /// Returns `true` if there are no lags.
    pub fn is_empty(&self) -> bool {
        self.lags.is_empty()
    }

    /// Returns `true` if every lag is zero.
    pub fn is_zero(&self) -> bool {
        self.lags.iter().all(|&r| r == 0)
    }

    /// Keys the lags by node name.
    pub fn by_name(&self, circuit: &Circuit) -> BTreeMap<String, Registers> {
        circuit
            .nodes
            .iter()
            .zip(&self.lags)
            .map(|(node, &lag)| (node.name.clone(), lag))
            .collect()
    }

    pub(crate) fn increment(&mut self, node: NodeId) {
        self.lags[node.index()] += 1;
    }
}

/// Applies a retiming to a synchronous circuit, returning a new circuit.
///
/// # Errors
///
/// Fails if the circuit is not synchronous, if `r` has the wrong length, or
/// if `r` would leave an edge with a negative register count.
pub fn retime(circuit: &Circuit, r: &Retiming) -> Result<Circuit, RetimeError> {
    ensure_synchronous(circuit)?;
    if r.len() != circuit.node_count() {
        return Err(RetimeError::RetimingSize {
            expected: circuit.node_count(),
            found: r.len(),
        });
    }
    let retimed = retime_unchecked(circuit, r);
    if let Some(edge) = retimed.edges.iter().find(|e| e.weight < 0) {
        return Err(RetimeError::NegativeWeight {
            from: circuit.node_name(edge.from).to_string(),
            to: circuit.node_name(edge.to).to_string(),
            weight: edge.weight,
        });
    }
    Ok(retimed)
}

/// Applies a retiming of the right length without any checks.
pub(crate) fn retime_unchecked(circuit: &Circuit, r: &Retiming) -> Circuit {
    circuit.with_edge_weights(|e| e.weight + r.lag(e.to) - r.lag(e.from))
}
