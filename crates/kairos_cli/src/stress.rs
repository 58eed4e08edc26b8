//! `kairos stress`: randomized cross-check of both optimizers.
//!
//! Each iteration draws a random synchronous circuit, optimizes it with both
//! methods, and checks that they reach the same clock period, that neither
//! raises it, and that both results are still synchronous.

use kairos_config::StressConfig;
use kairos_gen::random_circuit;
use kairos_graph::{is_synchronous, write_dot, Circuit};
use kairos_retime::{clock_period, optimize, Method, RetimeOptions};
use rand::Rng;

use crate::pipeline::{make_rng, resolve_config, retime_options};
use crate::{GlobalArgs, StressArgs};

/// Runs the `kairos stress` command.
///
/// Returns exit code 0 if every circuit passed, 2 on the first failure.
pub fn run(args: &StressArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let iterations = args.iterations.unwrap_or(config.stress.iterations);
    let mut rng = make_rng(args.seed.or(config.random.seed));
    let options = retime_options(&config);

    if !global.quiet {
        eprintln!("   Checking {iterations} random circuit(s)");
    }
    for i in 0..iterations {
        let (nodes, edges) = draw_size(&mut rng, &config.stress);
        let circuit = random_circuit(&mut rng, nodes, edges, config.random.max_attempts)?;
        if global.verbose {
            eprintln!("  [{}/{iterations}] {nodes} nodes, {edges} edges", i + 1);
        }
        if let Err(failure) = check_circuit(&circuit, &options) {
            eprintln!("error: {failure}");
            println!("{}", write_dot(&circuit));
            return Ok(2);
        }
    }
    if !global.quiet {
        eprintln!("   Result: {iterations} circuit(s) passed");
    }
    Ok(0)
}

/// Draws a node count from the configured range, then an edge count from
/// the configured range clamped to what that node count allows.
///
/// Sparse draws are almost never accepted by the generator (with exactly
/// one edge per node, only a Hamiltonian cycle through the host passes), so
/// the edge count is kept at one and a half per node or more when
/// `max_edges` leaves room for it. `max_edges` is never exceeded.
fn draw_size(rng: &mut impl Rng, stress: &StressConfig) -> (usize, usize) {
    let nodes = rng.gen_range(stress.min_nodes..=stress.max_nodes);
    // at least `nodes`, since the loader requires max_edges >= max_nodes
    let high = stress.max_edges.min(nodes * (nodes - 1));
    let low = stress.min_edges.max(nodes + nodes / 2).min(high);
    (nodes, rng.gen_range(low..=high))
}

/// Checks agreement, non-increase, and synchrony of the results.
fn check_circuit(circuit: &Circuit, options: &RetimeOptions) -> Result<(), String> {
    let original = clock_period(circuit).map_err(|e| e.to_string())?;
    let mut periods = Vec::with_capacity(2);
    for method in [Method::Opt1, Method::Opt2] {
        let outcome = optimize(circuit, method, options).map_err(|e| e.to_string())?;
        if outcome.optimized_period > original {
            return Err(format!(
                "{method} raised the clock period from {original} to {}",
                outcome.optimized_period
            ));
        }
        if !is_synchronous(&outcome.circuit) {
            return Err(format!("{method} produced a circuit that is not synchronous"));
        }
        periods.push(outcome.optimized_period);
    }
    if periods[0] != periods[1] {
        return Err(format!(
            "opt1 reached {} but opt2 reached {}",
            periods[0], periods[1]
        ));
    }
    Ok(())
}
