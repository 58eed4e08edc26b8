//! Random synchronous circuits.
//!
//! Circuits are drawn as directed G(n, m) graphs: `m` distinct ordered
//! pairs of distinct nodes, chosen uniformly. Node `0` plays the host with
//! delay 0; every other node gets a delay in `1..=2` and every edge a
//! register count in `0..=2`. A draw is kept only if it is synchronous,
//! every node has a predecessor, and every node can reach the host.

use crate::error::GenerateError;
use kairos_graph::{is_synchronous, Circuit, NodeId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};
use rand::seq::index::sample;
use rand::Rng;

/// Draws a random synchronous circuit with `nodes` nodes and `edges` edges.
///
/// Nodes are named `"0"`, `"1"`, ... The same seeded `rng` always yields
/// the same circuit.
///
/// # Errors
///
/// Fails on sizes no acceptable circuit can have, or after `max_attempts`
/// rejected draws.
pub fn random_circuit<R: Rng + ?Sized>(
    rng: &mut R,
    nodes: usize,
    edges: usize,
    max_attempts: usize,
) -> Result<Circuit, GenerateError> {
    if nodes < 2 {
        return Err(GenerateError::TooFewNodes { nodes });
    }
    let max = nodes * (nodes - 1);
    if edges < nodes || edges > max {
        return Err(GenerateError::EdgeCount {
            nodes,
            edges,
            min: nodes,
            max,
        });
    }

    for _ in 0..max_attempts {
        let circuit = draw(rng, nodes, edges);
        if is_acceptable(&circuit) {
            return Ok(circuit);
        }
    }
    Err(GenerateError::Exhausted {
        attempts: max_attempts,
    })
}

fn draw<R: Rng + ?Sized>(rng: &mut R, nodes: usize, edges: usize) -> Circuit {
    let mut c = Circuit::named("random");
    for i in 0..nodes {
        let delay = if i == 0 { 0 } else { rng.gen_range(1..=2) };
        c.add_node(i.to_string(), delay);
    }

    // Pair index `k` encodes `u = k / (n - 1)` and the `k % (n - 1)`-th
    // node other than `u`.
    let mut pairs = sample(rng, nodes * (nodes - 1), edges).into_vec();
    pairs.sort_unstable();
    for k in pairs {
        let u = k / (nodes - 1);
        let mut v = k % (nodes - 1);
        if v >= u {
            v += 1;
        }
        let weight = rng.gen_range(0..=2);
        c.add_edge(NodeId::from_raw(u as u32), NodeId::from_raw(v as u32), weight);
    }
    c
}

fn is_acceptable(circuit: &Circuit) -> bool {
    let fed = circuit
        .node_ids()
        .all(|v| circuit.incoming_edges(v).next().is_some());
    fed && all_reach_host(circuit) && is_synchronous(circuit)
}

/// Returns `true` if every node has a path to node 0.
fn all_reach_host(circuit: &Circuit) -> bool {
    let mut graph = DiGraph::<(), ()>::with_capacity(circuit.node_count(), circuit.edge_count());
    for _ in 0..circuit.node_count() {
        graph.add_node(());
    }
    for edge in &circuit.edges {
        graph.add_edge(
            NodeIndex::new(edge.from.index()),
            NodeIndex::new(edge.to.index()),
            (),
        );
    }

    let reversed = Reversed(&graph);
    let mut bfs = Bfs::new(reversed, NodeIndex::new(0));
    let mut reached = 0;
    while bfs.next(reversed).is_some() {
        reached += 1;
    }
    reached == circuit.node_count()
}
