//! Correlator circuits.
//!
//! A correlator compares a sliding window of input samples against a fixed
//! pattern. The host `h` feeds a shift register of comparators `d0..dk`
//! (delay 3) whose outputs are summed by a chain of adders `p0..p(k-1)`
//! (delay 7) flowing back to the host. Unretimed, the adder chain is purely
//! combinational and dominates the clock period.

use crate::error::GenerateError;
use kairos_graph::{Circuit, NodeId};

const HOST_DELAY: i64 = 0;
const COMPARATOR_DELAY: i64 = 3;
const ADDER_DELAY: i64 = 7;

// Node indices of the eight-node fixtures, in insertion order.
const H: usize = 0;
const D0: usize = 1;
const D1: usize = 2;
const D2: usize = 3;
const D3: usize = 4;
const P0: usize = 5;
const P1: usize = 6;
const P2: usize = 7;

/// The four-comparator correlator with registers only on the shift chain.
///
/// Clock period 24; the best retiming reaches 13.
pub fn correlator1() -> Circuit {
    fixture(
        "correlator1",
        &[
            (H, D0, 1),
            (D0, D1, 1),
            (D0, P0, 0),
            (D1, D2, 1),
            (D1, P1, 0),
            (D2, D3, 1),
            (D2, P2, 0),
            (D3, P2, 0),
            (P2, P1, 0),
            (P1, P0, 0),
            (P0, H, 0),
        ],
    )
}

/// [`correlator1`] with the register of `d1 -> d2` moved onto `p2 -> p1`.
///
/// Clock period 17.
pub fn correlator2() -> Circuit {
    fixture(
        "correlator2",
        &[
            (H, D0, 1),
            (D0, D1, 1),
            (D0, P0, 0),
            (D1, D2, 0),
            (D1, P1, 0),
            (D2, D3, 1),
            (D2, P2, 0),
            (D3, P2, 0),
            (P2, P1, 1),
            (P1, P0, 0),
            (P0, H, 0),
        ],
    )
}

fn fixture(name: &str, edges: &[(usize, usize, i64)]) -> Circuit {
    let mut c = Circuit::named(name);
    let ids: Vec<NodeId> = [
        ("h", HOST_DELAY),
        ("d0", COMPARATOR_DELAY),
        ("d1", COMPARATOR_DELAY),
        ("d2", COMPARATOR_DELAY),
        ("d3", COMPARATOR_DELAY),
        ("p0", ADDER_DELAY),
        ("p1", ADDER_DELAY),
        ("p2", ADDER_DELAY),
    ]
    .into_iter()
    .map(|(node, delay)| c.add_node(node, delay))
    .collect();
    for &(from, to, weight) in edges {
        c.add_edge(ids[from], ids[to], weight);
    }
    c
}

/// Builds the correlator of order `k`: `k + 1` comparators and `k` adders.
///
/// Nodes are added as `h, d0, p0, d1, p1, ..., dk`.
///
/// # Errors
///
/// [`GenerateError::ZeroOrder`] if `k` is 0.
pub fn correlator(k: usize) -> Result<Circuit, GenerateError> {
    if k == 0 {
        return Err(GenerateError::ZeroOrder);
    }
    let mut c = Circuit::named(format!("correlator_{k}"));
    let h = c.add_node("h", HOST_DELAY);
    let mut d = Vec::with_capacity(k + 1);
    let mut p = Vec::with_capacity(k);
    for i in 0..=k {
        d.push(c.add_node(format!("d{i}"), COMPARATOR_DELAY));
        if i < k {
            p.push(c.add_node(format!("p{i}"), ADDER_DELAY));
        }
    }

    c.add_edge(h, d[0], 1);
    for i in 0..k {
        c.add_edge(d[i], d[i + 1], 1);
    }
    for i in 0..k {
        c.add_edge(d[i], p[i], 0);
    }
    c.add_edge(d[k], p[k - 1], 0);
    for i in 0..k - 1 {
        c.add_edge(p[i + 1], p[i], 0);
    }
    c.add_edge(p[0], h, 0);
    Ok(c)
}
