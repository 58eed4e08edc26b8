//! All-pairs W and D matrices.
//!
//! For every ordered pair `(u, v)` with a path `u -> v`:
//! - `W(u, v)` is the fewest registers on any such path;
//! - `D(u, v)` is the largest total node delay (both endpoints included)
//!   among the paths that carry exactly `W(u, v)` registers.
//!
//! Both come out of one Floyd–Warshall run over [`LexPair`] weights: an edge
//! `u -> v` weighs `(w(e), -d(u))`, so a path sums to
//! `(registers, -(delay of every node but the last))`. Parallel edges are
//! collapsed to their lightest member before relaxation. Pairs with no path
//! have no entry, and looking them up is an error.

use crate::error::{ensure_synchronous, RetimeError};
use crate::lex::LexPair;
use kairos_common::{Delay, Registers};
use kairos_graph::{Circuit, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Dense W/D matrices of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WdMatrices {
    names: Vec<String>,
    /// Row-major `(W, D)` entries; `None` where there is no path.
    entries: Vec<Option<(Registers, Delay)>>,
}

impl WdMatrices {
    /// Returns the number of nodes (rows and columns).
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Returns `(W(u, v), D(u, v))`, or `None` if `v` is unreachable from `u`.
    pub fn get(&self, u: NodeId, v: NodeId) -> Option<(Registers, Delay)> {
        self.entries[u.index() * self.names.len() + v.index()]
    }

    /// Returns `W(u, v)`.
    ///
    /// # Errors
    ///
    /// [`RetimeError::Unreachable`] if there is no path from `u` to `v`.
    pub fn w(&self, u: NodeId, v: NodeId) -> Result<Registers, RetimeError> {
        self.lookup(u, v).map(|(w, _)| w)
    }

    /// Returns `D(u, v)`.
    ///
    /// # Errors
    ///
    /// [`RetimeError::Unreachable`] if there is no path from `u` to `v`.
    pub fn d(&self, u: NodeId, v: NodeId) -> Result<Delay, RetimeError> {
        self.lookup(u, v).map(|(_, d)| d)
    }

    fn lookup(&self, u: NodeId, v: NodeId) -> Result<(Registers, Delay), RetimeError> {
        self.get(u, v).ok_or_else(|| RetimeError::Unreachable {
            from: self.names[u.index()].clone(),
            to: self.names[v.index()].clone(),
        })
    }

    /// Iterates over every reachable pair as `(u, v, W, D)`, row by row.
    pub fn reachable_pairs(&self) -> impl Iterator<Item = (NodeId, NodeId, Registers, Delay)> + '_ {
        let n = self.names.len();
        self.entries.iter().enumerate().filter_map(move |(i, entry)| {
            entry.map(|(w, d)| {
                (
                    NodeId::from_raw((i / n) as u32),
                    NodeId::from_raw((i % n) as u32),
                    w,
                    d,
                )
            })
        })
    }

    /// Returns every distinct D value in increasing order.
    ///
    /// The optimal clock period of the circuit is always one of them.
    pub fn candidate_periods(&self) -> Vec<Delay> {
        let mut periods: Vec<Delay> = self.entries.iter().flatten().map(|&(_, d)| d).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }

    /// Renders W and D as two aligned tables, `XX` marking unreachable pairs.
    ///
    /// Rows are sources and columns targets, both in node ID order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("W:\n");
        self.render_table(&mut out, |(w, _)| w);
        out.push_str("\nD:\n");
        self.render_table(&mut out, |(_, d)| d);
        out
    }

    fn render_table(&self, out: &mut String, pick: impl Fn((Registers, Delay)) -> i64) {
        let n = self.names.len();
        let width = self
            .entries
            .iter()
            .map(|e| e.map_or(2, |p| pick(p).to_string().len()))
            .chain(self.names.iter().map(|s| s.len()))
            .max()
            .unwrap_or(2);
        let _ = write!(out, "{:width$}", "");
        for name in &self.names {
            let _ = write!(out, " {name:>width$}");
        }
        out.push('\n');
        for (row, name) in self.names.iter().enumerate() {
            let _ = write!(out, "{name:>width$}");
            for entry in &self.entries[row * n..(row + 1) * n] {
                match entry {
                    Some(p) => {
                        let _ = write!(out, " {:>width$}", pick(*p));
                    }
                    None => {
                        let _ = write!(out, " {:>width$}", "XX");
                    }
                }
            }
            out.push('\n');
        }
    }
}

/// Computes the W and D matrices of a synchronous circuit.
///
/// Runs in O(V³) time and O(V²) space.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn wd(circuit: &Circuit) -> Result<WdMatrices, RetimeError> {
    ensure_synchronous(circuit)?;
    wd_unchecked(circuit)
}

pub(crate) fn wd_unchecked(circuit: &Circuit) -> Result<WdMatrices, RetimeError> {
    let n = circuit.node_count();
    let mut dist: Vec<Option<LexPair>> = vec![None; n * n];

    for v in 0..n {
        dist[v * n + v] = Some(LexPair::ZERO);
    }
    for edge in &circuit.edges {
        if edge.from == edge.to {
            continue;
        }
        let pair = LexPair::new(edge.weight, -circuit.delay(edge.from));
        let slot = &mut dist[edge.from.index() * n + edge.to.index()];
        if slot.map_or(true, |cur| pair.is_less(&cur)) {
            *slot = Some(pair);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[i * n + k] else {
                continue;
            };
            for j in 0..n {
                let Some(kj) = dist[k * n + j] else {
                    continue;
                };
                let through = ik.checked_add(kj).ok_or_else(|| overflow(circuit, i, j))?;
                let slot = &mut dist[i * n + j];
                if slot.map_or(true, |cur| through.is_less(&cur)) {
                    *slot = Some(through);
                }
            }
        }
    }

    let entries = dist
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .map(|pair| {
                    let v = NodeId::from_raw((i % n) as u32);
                    circuit
                        .delay(v)
                        .checked_sub(pair.neg_delay)
                        .map(|d| (pair.registers, d))
                        .ok_or_else(|| overflow(circuit, i / n, i % n))
                })
                .transpose()
        })
        .collect::<Result<_, _>>()?;

    Ok(WdMatrices {
        names: circuit.nodes.iter().map(|node| node.name.clone()).collect(),
        entries,
    })
}

fn overflow(circuit: &Circuit, from: usize, to: usize) -> RetimeError {
    RetimeError::Overflow {
        from: circuit.nodes[from].name.clone(),
        to: circuit.nodes[to].name.clone(),
    }
}
