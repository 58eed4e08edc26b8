//! Feasibility oracles: can a retiming reach a target clock period `c`?
//!
//! Two independent oracles answer the same question:
//!
//! - [`check`] solves the difference constraints
//!   `r(u) - r(v) <= w(e)` for every edge `u -> v`, and
//!   `r(u) - r(v) <= W(u, v) - 1` for every pair with `D(u, v) > c`,
//!   by Bellman-Ford shortest paths from a synthetic root. A negative cycle
//!   means the constraints are unsatisfiable.
//! - [`feas`] starts from the zero retiming and, `|V| - 1` times, retimes
//!   the circuit and bumps the lag of every node whose ∆ exceeds `c`.
//!
//! Both return `Ok(None)` when `c` is not achievable.

use crate::cp::deltas_unchecked;
use crate::error::{ensure_synchronous, RetimeError};
use crate::retime::{retime_unchecked, Retiming};
use crate::wd::{wd_unchecked, WdMatrices};
use kairos_common::{Delay, Registers};
use kairos_graph::Circuit;

/// Knobs for the relaxation oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeasOptions {
    /// Stop as soon as a round bumps no lag. Later rounds would be no-ops,
    /// so the result is the same.
    pub early_exit: bool,
}

impl Default for FeasOptions {
    fn default() -> Self {
        Self { early_exit: true }
    }
}

/// A difference-constraint arc `from -> to` of weight `weight`, meaning
/// `dist(to) <= dist(from) + weight`.
#[derive(Debug, Clone, Copy)]
struct ConstraintArc {
    from: usize,
    to: usize,
    weight: Registers,
}

/// Shortest-path feasibility test for clock period `c`.
///
/// Returns a retiming whose circuit has clock period at most `c`, or `None`.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn check(circuit: &Circuit, c: Delay) -> Result<Option<Retiming>, RetimeError> {
    ensure_synchronous(circuit)?;
    Ok(check_with(circuit, &wd_unchecked(circuit)?, c))
}

/// [`check`] against precomputed W/D matrices of `circuit`.
pub fn check_with(circuit: &Circuit, matrices: &WdMatrices, c: Delay) -> Option<Retiming> {
    let n = circuit.node_count();
    let mut arcs: Vec<ConstraintArc> = circuit
        .edges
        .iter()
        .map(|e| ConstraintArc {
            from: e.to.index(),
            to: e.from.index(),
            weight: e.weight,
        })
        .collect();

    for (u, v, w, d) in matrices.reachable_pairs() {
        // A pair whose path already exceeds c through one endpoint alone is
        // covered by the tighter constraint on the shorter path.
        let redundant = d - circuit.delay(v) > c || d - circuit.delay(u) > c;
        if d > c && !redundant {
            arcs.push(ConstraintArc {
                from: v.index(),
                to: u.index(),
                weight: w - 1,
            });
        }
    }

    // The synthetic root has a zero arc to every node, so every distance
    // starts at zero.
    let root = n;
    arcs.extend((0..n).map(|v| ConstraintArc {
        from: root,
        to: v,
        weight: 0,
    }));

    bellman_ford(n + 1, root, &arcs).map(|mut dist| {
        dist.truncate(n);
        Retiming::from_lags(dist)
    })
}

/// Single-source shortest paths; `None` if a negative cycle is reachable.
fn bellman_ford(
    node_count: usize,
    source: usize,
    arcs: &[ConstraintArc],
) -> Option<Vec<Registers>> {
    let mut dist: Vec<Option<Registers>> = vec![None; node_count];
    dist[source] = Some(0);

    for _ in 1..node_count {
        if !relax(&mut dist, arcs) {
            break;
        }
    }
    // Still improving after |V| - 1 rounds: negative cycle.
    if relax(&mut dist, arcs) {
        return None;
    }
    Some(dist.into_iter().map(|d| d.unwrap_or(0)).collect())
}

/// One relaxation pass over every arc; returns `true` if any distance fell.
fn relax(dist: &mut [Option<Registers>], arcs: &[ConstraintArc]) -> bool {
    let mut changed = false;
    for arc in arcs {
        let Some(from) = dist[arc.from] else {
            continue;
        };
        let candidate = from + arc.weight;
        if dist[arc.to].map_or(true, |cur| candidate < cur) {
            dist[arc.to] = Some(candidate);
            changed = true;
        }
    }
    changed
}

/// Relaxation feasibility test for clock period `c`, with default options.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn feas(circuit: &Circuit, c: Delay) -> Result<Option<Retiming>, RetimeError> {
    feas_with(circuit, c, &FeasOptions::default())
}

/// Relaxation feasibility test for clock period `c`.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn feas_with(
    circuit: &Circuit,
    c: Delay,
    options: &FeasOptions,
) -> Result<Option<Retiming>, RetimeError> {
    ensure_synchronous(circuit)?;

    let mut r = Retiming::zero(circuit.node_count());
    for _ in 1..circuit.node_count() {
        // Intermediate circuits may hold negative weights; only exact zeros
        // form combinational paths.
        let deltas = deltas_unchecked(&retime_unchecked(circuit, &r))?;
        let late: Vec<_> = deltas.exceeding(c).collect();
        if late.is_empty() && options.early_exit {
            break;
        }
        for node in late {
            r.increment(node);
        }
    }

    let period = deltas_unchecked(&retime_unchecked(circuit, &r))?.period();
    Ok((period <= c).then_some(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::clock_period;
    use crate::retime::retime;
    use kairos_gen::{correlator1, correlator2};

    fn cycle3() -> Circuit {
        let mut c = Circuit::named("cycle3");
        let h = c.add_node("h", 0);
        let u = c.add_node("u", 2);
        let v = c.add_node("v", 3);
        c.add_edge(h, u, 0);
        c.add_edge(u, v, 1);
        c.add_edge(v, h, 1);
        c
    }

    #[test]
    fn feas_reaches_thirteen_on_correlator1() {
        let c = correlator1();
        let r = feas(&c, 13).unwrap().expect("13 is feasible");
        let retimed = retime(&c, &r).unwrap();
        assert_eq!(clock_period(&retimed).unwrap(), 13);
    }

    #[test]
    fn feas_rejects_twelve_on_correlator1() {
        assert_eq!(feas(&correlator1(), 12).unwrap(), None);
    }

    #[test]
    fn check_reaches_thirteen_on_correlator1() {
        let c = correlator1();
        let r = check(&c, 13).unwrap().expect("13 is feasible");
        let retimed = retime(&c, &r).unwrap();
        assert!(clock_period(&retimed).unwrap() <= 13);
    }

    #[test]
    fn check_rejects_twelve_on_correlator1() {
        assert_eq!(check(&correlator1(), 12).unwrap(), None);
    }

    #[test]
    fn period_below_a_node_delay_is_infeasible() {
        let c = cycle3();
        assert_eq!(check(&c, 2).unwrap(), None);
        assert_eq!(feas(&c, 2).unwrap(), None);
    }

    #[test]
    fn current_period_is_always_feasible() {
        for c in [correlator1(), correlator2(), cycle3()] {
            let period = clock_period(&c).unwrap();
            assert!(check(&c, period).unwrap().is_some());
            assert!(feas(&c, period).unwrap().is_some());
        }
    }

    #[test]
    fn early_exit_returns_the_same_retiming() {
        let c = correlator1();
        for period in [13, 14, 17, 24] {
            let eager = feas_with(&c, period, &FeasOptions { early_exit: true }).unwrap();
            let full = feas_with(&c, period, &FeasOptions { early_exit: false }).unwrap();
            assert_eq!(eager, full);
        }
    }

    #[test]
    fn oracles_agree_on_feasibility() {
        for c in [correlator1(), correlator2(), cycle3()] {
            let periods = crate::wd::wd(&c).unwrap().candidate_periods();
            for period in periods {
                assert_eq!(
                    check(&c, period).unwrap().is_some(),
                    feas(&c, period).unwrap().is_some(),
                    "oracles disagree on {} at {period}",
                    c.name
                );
            }
        }
    }

    #[test]
    fn bellman_ford_detects_negative_cycle() {
        let arcs = [
            ConstraintArc { from: 0, to: 1, weight: 0 },
            ConstraintArc { from: 1, to: 2, weight: 1 },
            ConstraintArc { from: 2, to: 1, weight: -2 },
        ];
        assert_eq!(bellman_ford(3, 0, &arcs), None);
    }

    #[test]
    fn bellman_ford_distances() {
        let arcs = [
            ConstraintArc { from: 0, to: 1, weight: 4 },
            ConstraintArc { from: 0, to: 2, weight: 1 },
            ConstraintArc { from: 2, to: 1, weight: -2 },
        ];
        assert_eq!(bellman_ford(3, 0, &arcs), Some(vec![0, -1, 1]));
    }

    #[test]
    fn rejects_non_synchronous_input() {
        let mut c = cycle3();
        c.edges[1].weight = 0;
        c.edges[2].weight = 0;
        assert!(check(&c, 10).is_err());
        assert!(feas(&c, 10).is_err());
    }
}
