//! Well-formedness checks for synchronous circuits.
//!
//! A circuit is synchronous when
//! - every node delay is non-negative,
//! - every edge weight is non-negative, and
//! - every directed cycle carries at least one register.
//!
//! The cycle condition is checked by enumerating every simple cycle, which
//! is exponential in the worst case. [`CheckOptions::cycle_budget`] caps the
//! enumeration; a circuit whose cycles could not all be inspected within the
//! budget is rejected.

use crate::circuit::Circuit;
use crate::ids::NodeId;
use kairos_common::{Delay, Registers};
use kairos_diagnostics::code::{
    CYCLE_BUDGET_EXHAUSTED, NEGATIVE_DELAY, NEGATIVE_WEIGHT, ZERO_REGISTER_CYCLE,
};
use kairos_diagnostics::{Diagnostic, DiagnosticSink};
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use std::ops::ControlFlow;

/// Tuning knobs for [`find_violations`] and [`check_synchronous`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Maximum number of simple cycles to enumerate. `None` means no limit.
    pub cycle_budget: Option<usize>,
}

/// A reason why a circuit is not synchronous.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A node has a negative propagation delay.
    #[error("node `{node}` has negative delay {delay}")]
    NegativeDelay {
        /// Name of the offending node.
        node: String,
        /// Its delay.
        delay: Delay,
    },
    /// An edge has a negative register count.
    #[error("edge `{from}` -> `{to}` has negative register count {weight}")]
    NegativeWeight {
        /// Name of the driving node.
        from: String,
        /// Name of the driven node.
        to: String,
        /// The edge weight.
        weight: Registers,
    },
    /// A directed cycle whose edges carry no register.
    #[error("cycle {} carries no register", render_cycle(.cycle))]
    ZeroRegisterCycle {
        /// Node names along the cycle, starting at its lowest-ID node.
        cycle: Vec<String>,
    },
    /// The cycle budget ran out before every cycle was inspected.
    #[error("cycle enumeration stopped after {budget} cycles")]
    CycleBudgetExhausted {
        /// The budget that was exhausted.
        budget: usize,
    },
}

fn render_cycle(cycle: &[String]) -> String {
    match cycle.first() {
        Some(first) => format!("{} -> {first}", cycle.join(" -> ")),
        None => String::new(),
    }
}

/// Returns `true` if the circuit is synchronous.
///
/// Deterministic and side-effect free; enumerates all simple cycles.
pub fn is_synchronous(circuit: &Circuit) -> bool {
    find_violations(circuit, &CheckOptions::default()).is_empty()
}

/// Collects the reasons a circuit is not synchronous.
///
/// All negative delays and weights are reported. Cycles are only inspected
/// when there are none, and enumeration stops at the first cycle without a
/// register.
pub fn find_violations(circuit: &Circuit, options: &CheckOptions) -> Vec<Violation> {
    let mut violations: Vec<Violation> = circuit
        .nodes
        .iter()
        .filter(|n| n.delay < 0)
        .map(|n| Violation::NegativeDelay {
            node: n.name.clone(),
            delay: n.delay,
        })
        .collect();
    violations.extend(
        circuit
            .edges
            .iter()
            .filter(|e| e.weight < 0)
            .map(|e| Violation::NegativeWeight {
                from: circuit.node_name(e.from).to_string(),
                to: circuit.node_name(e.to).to_string(),
                weight: e.weight,
            }),
    );
    if !violations.is_empty() {
        return violations;
    }

    let mut enumerated = 0usize;
    let outcome = for_each_simple_cycle(circuit, |cycle, weights| {
        if options.cycle_budget.is_some_and(|budget| enumerated >= budget) {
            return ControlFlow::Break(Violation::CycleBudgetExhausted {
                budget: enumerated,
            });
        }
        enumerated += 1;

        // weights are non-negative here
        if weights.iter().all(|&w| w == 0) {
            ControlFlow::Break(Violation::ZeroRegisterCycle {
                cycle: cycle
                    .iter()
                    .map(|&n| circuit.node_name(n).to_string())
                    .collect(),
            })
        } else {
            ControlFlow::Continue(())
        }
    });
    if let ControlFlow::Break(violation) = outcome {
        violations.push(violation);
    }
    violations
}

/// Checks a circuit and reports every violation into `sink`.
///
/// Returns `true` if the circuit is synchronous.
pub fn check_synchronous(circuit: &Circuit, options: &CheckOptions, sink: &DiagnosticSink) -> bool {
    let violations = find_violations(circuit, options);
    for violation in &violations {
        sink.emit(violation_diagnostic(violation));
    }
    violations.is_empty()
}

fn violation_diagnostic(violation: &Violation) -> Diagnostic {
    let message = violation.to_string();
    match violation {
        Violation::NegativeDelay { .. } => Diagnostic::error(NEGATIVE_DELAY, message),
        Violation::NegativeWeight { .. } => Diagnostic::error(NEGATIVE_WEIGHT, message),
        Violation::ZeroRegisterCycle { cycle } => {
            Diagnostic::error(ZERO_REGISTER_CYCLE, message)
                .with_note(format!("the cycle visits {} node(s)", cycle.len()))
                .with_help("place a register on at least one edge of the cycle")
        }
        Violation::CycleBudgetExhausted { .. } => {
            Diagnostic::error(CYCLE_BUDGET_EXHAUSTED, message)
                .with_help("raise `validate.cycle_budget` in kairos.toml")
        }
    }
}

/// Calls `visit` once per simple directed cycle of the circuit.
///
/// Parallel edges are collapsed, so a cycle is a sequence of distinct nodes
/// `[n0, n1, ..., nk]` with an edge `ni -> ni+1` and an edge `nk -> n0`.
/// Alongside the nodes, `visit` receives the weights of those edges:
/// `weights[i]` is the minimum weight from `cycle[i]` to the next node.
/// Each cycle is reported once, rotated so that it starts at its lowest
/// [`NodeId`]. Self-loops are reported as one-node cycles. Enumeration stops
/// as soon as `visit` breaks, and the break value is returned.
pub fn for_each_simple_cycle<B>(
    circuit: &Circuit,
    mut visit: impl FnMut(&[NodeId], &[Registers]) -> ControlFlow<B>,
) -> ControlFlow<B> {
    let adjacency = circuit.min_weight_adjacency();

    for (u, succ) in adjacency.iter().enumerate() {
        let u = NodeId::from_raw(u as u32);
        if let Some(&(_, w)) = succ.iter().find(|(v, _)| *v == u) {
            visit(&[u], &[w])?;
        }
    }

    // Cycles never leave a strongly connected component.
    let mut graph = DiGraph::<(), ()>::with_capacity(circuit.node_count(), circuit.edge_count());
    for _ in 0..circuit.node_count() {
        graph.add_node(());
    }
    for (u, succ) in adjacency.iter().enumerate() {
        for (v, _) in succ {
            graph.add_edge((u as u32).into(), v.as_raw().into(), ());
        }
    }
    let mut component = vec![usize::MAX; circuit.node_count()];
    for (index, scc) in tarjan_scc(&graph).into_iter().enumerate() {
        for node in scc {
            component[node.index()] = index;
        }
    }

    let mut search = CycleSearch {
        adjacency: &adjacency,
        component: &component,
        path: Vec::new(),
        weights: Vec::new(),
        on_path: vec![false; circuit.node_count()],
    };
    for start in circuit.node_ids() {
        search.path.push(start);
        search.on_path[start.index()] = true;
        let flow = search.extend(start, start, &mut visit);
        search.on_path[start.index()] = false;
        search.path.pop();
        flow?;
    }
    ControlFlow::Continue(())
}

/// Backtracking state for [`for_each_simple_cycle`].
struct CycleSearch<'a> {
    adjacency: &'a [Vec<(NodeId, Registers)>],
    component: &'a [usize],
    path: Vec<NodeId>,
    /// `weights[i]` is the weight of the edge leaving `path[i]`.
    weights: Vec<Registers>,
    on_path: Vec<bool>,
}

impl CycleSearch<'_> {
    /// Extends the current path from `node`, only through nodes with a
    /// higher ID than `start` in the same component.
    fn extend<B, F>(&mut self, start: NodeId, node: NodeId, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&[NodeId], &[Registers]) -> ControlFlow<B>,
    {
        let adjacency = self.adjacency;
        for &(next, w) in &adjacency[node.index()] {
            if next == start {
                if node != start {
                    self.weights.push(w);
                    let flow = visit(&self.path, &self.weights);
                    self.weights.pop();
                    flow?;
                }
                continue;
            }
            if next < start
                || self.on_path[next.index()]
                || self.component[next.index()] != self.component[start.index()]
            {
                continue;
            }
            self.path.push(next);
            self.weights.push(w);
            self.on_path[next.index()] = true;
            let flow = self.extend(start, next, visit);
            self.on_path[next.index()] = false;
            self.weights.pop();
            self.path.pop();
            flow?;
        }
        ControlFlow::Continue(())
    }
}
