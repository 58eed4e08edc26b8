//! Circuit graph data structures.
//!
//! A [`Circuit`] is a directed multigraph whose nodes are combinational
//! elements carrying a propagation delay and whose edges are wires carrying a
//! register count. Nodes and edges live in dense vectors indexed by
//! [`NodeId`]/[`EdgeId`]; nothing is ever removed, so IDs are stable.
//!
//! When several parallel edges join the same ordered pair of nodes, every
//! computation that needs "the weight of `u -> v`" uses the minimum among
//! them; see [`Circuit::min_weight`] and [`Circuit::min_weight_adjacency`].

use crate::ids::{EdgeId, NodeId};
use kairos_common::{Delay, Registers};
use serde::{Deserialize, Serialize};

/// A synchronous circuit modeled as a weighted directed multigraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Human-readable name (the DOT graph ID, or a generator's name).
    pub name: String,
    /// All nodes, indexed by [`NodeId`].
    pub nodes: Vec<Node>,
    /// All edges, indexed by [`EdgeId`].
    pub edges: Vec<Edge>,
}

impl Circuit {
    /// Creates an empty, unnamed circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty circuit with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a node and returns its ID.
    ///
    /// Names are expected to be unique; [`find_node`](Self::find_node)
    /// returns the first node with a given name.
    pub fn add_node(&mut self, name: impl Into<String>, delay: Delay) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.into(),
            delay,
        });
        id
    }

    /// Adds a directed edge carrying `weight` registers and returns its ID.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Registers) -> EdgeId {
        let id = EdgeId::from_raw(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            from,
            to,
            weight,
        });
        id
    }

    /// Returns the node with the given ID.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the edge with the given ID.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Returns the propagation delay of a node.
    pub fn delay(&self, id: NodeId) -> Delay {
        self.node(id).delay
    }

    /// Returns the name of a node.
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    /// Looks a node up by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Iterates over node IDs in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Returns the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns all edges leaving the given node.
    pub fn outgoing_edges(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.from == node)
    }

    /// Returns all edges entering the given node.
    pub fn incoming_edges(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.to == node)
    }

    /// Returns the largest node delay, or 0 for an empty circuit.
    pub fn max_delay(&self) -> Delay {
        self.nodes.iter().map(|n| n.delay).max().unwrap_or(0)
    }

    /// Returns the sum of all edge weights.
    pub fn total_registers(&self) -> Registers {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Returns `true` if at least one edge carries no register.
    pub fn has_combinational_edge(&self) -> bool {
        self.edges.iter().any(|e| e.weight == 0)
    }

    /// Returns the minimum weight among the parallel edges `from -> to`,
    /// or `None` if there is no such edge.
    pub fn min_weight(&self, from: NodeId, to: NodeId) -> Option<Registers> {
        self.edges
            .iter()
            .filter(|e| e.from == from && e.to == to)
            .map(|e| e.weight)
            .min()
    }

    /// Collapses parallel edges into a successor list per node.
    ///
    /// Entry `u` holds one `(v, w)` per distinct successor `v`, where `w` is
    /// the minimum weight among the edges `u -> v`. Successors are sorted by
    /// ID so that traversals are deterministic.
    pub fn min_weight_adjacency(&self) -> Vec<Vec<(NodeId, Registers)>> {
        let mut adjacency: Vec<Vec<(NodeId, Registers)>> = vec![Vec::new(); self.node_count()];
        for edge in &self.edges {
            let succ = &mut adjacency[edge.from.index()];
            match succ.iter_mut().find(|(v, _)| *v == edge.to) {
                Some((_, w)) => *w = (*w).min(edge.weight),
                None => succ.push((edge.to, edge.weight)),
            }
        }
        for succ in &mut adjacency {
            succ.sort_by_key(|(v, _)| *v);
        }
        adjacency
    }

    /// Returns a copy with every edge weight replaced by `weight(edge)`.
    ///
    /// Node set, node delays, edge topology, and all IDs are preserved.
    pub fn with_edge_weights(&self, mut weight: impl FnMut(&Edge) -> Registers) -> Circuit {
        let edges = self
            .edges
            .iter()
            .map(|e| Edge {
                weight: weight(e),
                ..e.clone()
            })
            .collect();
        Circuit {
            name: self.name.clone(),
            nodes: self.nodes.clone(),
            edges,
        }
    }
}

/// A combinational element of the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The unique ID of this node.
    pub id: NodeId,
    /// Human-readable name (e.g. "h", "d0", "p2").
    pub name: String,
    /// Propagation delay through the element.
    pub delay: Delay,
}

/// A wire between two combinational elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The unique ID of this edge.
    pub id: EdgeId,
    /// The driving node.
    pub from: NodeId,
    /// The driven node.
    pub to: NodeId,
    /// Number of registers on the wire.
    pub weight: Registers,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Circuit, [NodeId; 3]) {
        let mut c = Circuit::named("triangle");
        let h = c.add_node("h", 0);
        let u = c.add_node("u", 2);
        let v = c.add_node("v", 3);
        c.add_edge(h, u, 0);
        c.add_edge(u, v, 1);
        c.add_edge(v, h, 1);
        (c, [h, u, v])
    }

    #[test]
    fn empty_circuit() {
        let c = Circuit::new();
        assert_eq!(c.node_count(), 0);
        assert_eq!(c.edge_count(), 0);
        assert_eq!(c.max_delay(), 0);
        assert!(!c.has_combinational_edge());
    }

    #[test]
    fn add_nodes_and_edges() {
        let (c, [h, u, v]) = triangle();
        assert_eq!(h.as_raw(), 0);
        assert_eq!(v.as_raw(), 2);
        assert_eq!(c.node_count(), 3);
        assert_eq!(c.edge_count(), 3);
        assert_eq!(c.delay(v), 3);
        assert_eq!(c.node_name(u), "u");
        assert_eq!(c.find_node("v"), Some(v));
        assert_eq!(c.find_node("zz"), None);
        assert_eq!(c.max_delay(), 3);
        assert_eq!(c.total_registers(), 2);
        assert!(c.has_combinational_edge());
    }

    #[test]
    fn incoming_and_outgoing() {
        let (mut c, [h, u, v]) = triangle();
        c.add_edge(h, v, 2);
        assert_eq!(c.outgoing_edges(h).count(), 2);
        assert_eq!(c.incoming_edges(v).count(), 2);
        assert_eq!(c.incoming_edges(u).count(), 1);
    }

    #[test]
    fn min_weight_over_parallel_edges() {
        let (mut c, [h, u, v]) = triangle();
        c.add_edge(u, v, 4);
        c.add_edge(u, v, 0);
        assert_eq!(c.min_weight(u, v), Some(0));
        assert_eq!(c.min_weight(h, u), Some(0));
        assert_eq!(c.min_weight(u, h), None);
    }

    #[test]
    fn adjacency_collapses_parallel_edges() {
        let (mut c, [h, u, v]) = triangle();
        c.add_edge(h, v, 3);
        c.add_edge(h, v, 2);
        let adj = c.min_weight_adjacency();
        assert_eq!(adj[h.index()], vec![(u, 0), (v, 2)]);
        assert_eq!(adj[u.index()], vec![(v, 1)]);
        assert_eq!(adj[v.index()], vec![(h, 1)]);
    }

    #[test]
    fn with_edge_weights_keeps_topology() {
        let (c, _) = triangle();
        let shifted = c.with_edge_weights(|e| e.weight + 1);
        assert_eq!(shifted.node_count(), 3);
        assert_eq!(shifted.nodes, c.nodes);
        for (a, b) in c.edges.iter().zip(&shifted.edges) {
            assert_eq!((a.id, a.from, a.to), (b.id, b.from, b.to));
            assert_eq!(a.weight + 1, b.weight);
        }
        // the source is untouched
        assert_eq!(c.total_registers(), 2);
    }

    #[test]
    fn serde_roundtrip() {
        let (c, _) = triangle();
        let json = serde_json::to_string(&c).unwrap();
        let restored: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, c);
    }
}
