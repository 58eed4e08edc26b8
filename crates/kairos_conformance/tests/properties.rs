//! Properties every synchronous circuit must satisfy, checked over seeded
//! batches of random circuits so failures reproduce.

use kairos_conformance::{exhaustive_min_period, seeded_circuits, simple_path_wd};
use kairos_diagnostics::DiagnosticSink;
use kairos_graph::{find_violations, is_synchronous, parse_dot, write_dot, CheckOptions};
use kairos_retime::{
    check, clock_period, feas, feas_with, opt1, opt2, optimize, retime, wd, FeasOptions, Method,
    RetimeOptions,
};

const SEED: u64 = 0x6b61_6972;

fn batch() -> Vec<kairos_graph::Circuit> {
    seeded_circuits(SEED, 30, 4..=8).unwrap()
}

// ---------------------------------------------------------------------------
// Validity
// ---------------------------------------------------------------------------

#[test]
fn validity_is_idempotent() {
    for c in batch() {
        let first = is_synchronous(&c);
        assert_eq!(first, is_synchronous(&c));
        assert!(first, "generator produced a circuit that is not synchronous");
        let options = CheckOptions::default();
        assert_eq!(find_violations(&c, &options), find_violations(&c, &options));
    }
}

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

#[test]
fn optimizers_never_raise_the_period() {
    for c in batch() {
        let original = clock_period(&c).unwrap();
        assert!(clock_period(&opt1(&c).unwrap()).unwrap() <= original);
        assert!(clock_period(&opt2(&c).unwrap()).unwrap() <= original);
    }
}

#[test]
fn optimizers_agree() {
    for c in batch() {
        let a = clock_period(&opt1(&c).unwrap()).unwrap();
        let b = clock_period(&opt2(&c).unwrap()).unwrap();
        assert_eq!(a, b, "{}", write_dot(&c));
    }
}

#[test]
fn optimizers_preserve_synchrony() {
    for c in batch() {
        assert!(is_synchronous(&opt1(&c).unwrap()));
        assert!(is_synchronous(&opt2(&c).unwrap()));
    }
}

#[test]
fn optimum_matches_exhaustive_search() {
    for c in seeded_circuits(SEED + 1, 12, 3..=5).unwrap() {
        let expected = exhaustive_min_period(&c).unwrap();
        for method in [Method::Opt1, Method::Opt2] {
            let outcome = optimize(&c, method, &RetimeOptions::default()).unwrap();
            assert_eq!(outcome.optimized_period, expected, "{method}\n{}", write_dot(&c));
        }
    }
}

// ---------------------------------------------------------------------------
// W/D
// ---------------------------------------------------------------------------

#[test]
fn wd_matches_simple_path_enumeration() {
    for c in batch() {
        let matrices = wd(&c).unwrap();
        for u in c.node_ids() {
            for v in c.node_ids() {
                assert_eq!(
                    matrices.get(u, v),
                    simple_path_wd(&c, u, v),
                    "{} -> {}",
                    c.node_name(u),
                    c.node_name(v)
                );
                assert_eq!(matrices.w(u, v).is_ok(), matrices.get(u, v).is_some());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Feasibility
// ---------------------------------------------------------------------------

#[test]
fn feasible_retimings_meet_the_period() {
    for c in batch() {
        let best = optimize(&c, Method::Opt2, &RetimeOptions::default())
            .unwrap()
            .optimized_period;
        for period in wd(&c).unwrap().candidate_periods() {
            let relaxed = feas(&c, period).unwrap();
            let shortest = check(&c, period).unwrap();
            assert_eq!(relaxed.is_some(), period >= best);
            assert_eq!(shortest.is_some(), period >= best);
            for r in relaxed.iter().chain(shortest.iter()) {
                let retimed = retime(&c, r).unwrap();
                assert!(clock_period(&retimed).unwrap() <= period);
                assert!(is_synchronous(&retimed));
            }
        }
    }
}

#[test]
fn early_exit_keeps_the_same_retiming() {
    let full = FeasOptions { early_exit: false };
    let fast = FeasOptions { early_exit: true };
    for c in batch() {
        for period in wd(&c).unwrap().candidate_periods() {
            assert_eq!(
                feas_with(&c, period, &full).unwrap(),
                feas_with(&c, period, &fast).unwrap()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// DOT
// ---------------------------------------------------------------------------

#[test]
fn random_circuits_survive_dot() {
    for c in batch() {
        let back = parse_dot(&write_dot(&c), &DiagnosticSink::new()).unwrap();
        assert_eq!(back, c);
    }
}
