//! Conformance helpers for the Kairos retiming engine.
//!
//! Provides small reference circuits, seeded batches of random synchronous
//! circuits, and slow but obviously correct reference computations (simple
//! path enumeration for W/D, exhaustive retiming search for the minimum
//! clock period) that the integration tests compare the engine against.

#![warn(missing_docs)]

use std::ops::RangeInclusive;

use kairos_common::{Delay, Registers};
use kairos_gen::{random_circuit, GenerateError};
use kairos_graph::{Circuit, NodeId};
use kairos_retime::{clock_period, retime, RetimeError, Retiming};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generation attempts allowed per random circuit.
pub const MAX_ATTEMPTS: usize = 10_000;

/// The three-node ring `h -> u -> v -> h` with delays 0, 2, 3 and register
/// counts 0, 1, 1. Its clock period of 3 is already optimal.
pub fn cycle3() -> Circuit {
    let mut c = Circuit::named("cycle3");
    let h = c.add_node("h", 0);
    let u = c.add_node("u", 2);
    let v = c.add_node("v", 3);
    c.add_edge(h, u, 0);
    c.add_edge(u, v, 1);
    c.add_edge(v, h, 1);
    c
}

/// Draws `count` random synchronous circuits from a generator seeded with
/// `seed`.
///
/// Node counts are uniform in `nodes`; each circuit gets between one and a
/// half and two edges per node.
pub fn seeded_circuits(
    seed: u64,
    count: usize,
    nodes: RangeInclusive<usize>,
) -> Result<Vec<Circuit>, GenerateError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut circuits = Vec::with_capacity(count);
    for _ in 0..count {
        let n = rng.gen_range(nodes.clone());
        let max = n * n.saturating_sub(1);
        let low = (n + n / 2).min(max);
        let high = (2 * n).min(max);
        let edges = rng.gen_range(low..=high);
        circuits.push(random_circuit(&mut rng, n, edges, MAX_ATTEMPTS)?);
    }
    Ok(circuits)
}

/// W and D for the pair `(u, v)` by enumerating every simple path.
///
/// W is the least register count over the paths, and D the largest total
/// node delay among the paths that reach that count. `None` if `v` cannot
/// be reached from `u`. A node paired with itself gets `(0, delay)`.
pub fn simple_path_wd(circuit: &Circuit, u: NodeId, v: NodeId) -> Option<(Registers, Delay)> {
    if u == v {
        return Some((0, circuit.delay(u)));
    }
    let mut walk = PathWalk {
        circuit,
        target: v,
        on_path: vec![false; circuit.node_count()],
        best: None,
    };
    walk.on_path[u.index()] = true;
    walk.extend(u, 0, circuit.delay(u));
    walk.best
}

struct PathWalk<'a> {
    circuit: &'a Circuit,
    target: NodeId,
    on_path: Vec<bool>,
    best: Option<(Registers, Delay)>,
}

impl PathWalk<'_> {
    fn extend(&mut self, at: NodeId, registers: Registers, delay: Delay) {
        let circuit = self.circuit;
        for edge in circuit.outgoing_edges(at) {
            let next = edge.to;
            if self.on_path[next.index()] {
                continue;
            }
            let w = registers + edge.weight;
            let d = delay + circuit.delay(next);
            if next == self.target {
                let better = match self.best {
                    None => true,
                    Some((bw, bd)) => w < bw || (w == bw && d > bd),
                };
                if better {
                    self.best = Some((w, d));
                }
                continue;
            }
            self.on_path[next.index()] = true;
            self.extend(next, w, d);
            self.on_path[next.index()] = false;
        }
    }
}

/// The minimum clock period over every retiming with lags in `0..n`.
///
/// The relaxation oracle never moves a lag outside that range, so on a
/// synchronous circuit this is the true optimum. Exponential in the node
/// count; only meant for circuits of a handful of nodes.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn exhaustive_min_period(circuit: &Circuit) -> Result<Delay, RetimeError> {
    let n = circuit.node_count();
    let top = n as Registers - 1;
    let mut best = clock_period(circuit)?;
    let mut lags: Vec<Registers> = vec![0; n];

    'search: loop {
        let mut digit = 0;
        loop {
            if digit == n {
                break 'search;
            }
            if lags[digit] < top {
                lags[digit] += 1;
                break;
            }
            lags[digit] = 0;
            digit += 1;
        }
        match retime(circuit, &Retiming::from_lags(lags.clone())) {
            Ok(retimed) => best = best.min(clock_period(&retimed)?),
            Err(RetimeError::NegativeWeight { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(best)
}
