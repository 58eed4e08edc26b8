//! `kairos run` and `kairos random`: minimum clock period retiming.

use std::path::{Path, PathBuf};

use kairos_config::KairosConfig;
use kairos_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use kairos_gen::random_circuit;
use kairos_graph::{is_synchronous, Circuit};
use kairos_retime::{clock_period, optimize_with_diagnostics, Method, RetimingOutcome};

use crate::pipeline::{
    load_circuit, make_rng, render_diagnostics, resolve_config, retime_options, save_circuit,
    selected_methods,
};
use crate::{GlobalArgs, OptimizeArgs, RandomArgs, ReportFormat, RunArgs};

/// Runs the `kairos run` command.
///
/// Returns exit code 0, or 2 if two methods disagree on the optimum.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let circuit = load_circuit(&args.file, &config, global)?;
    optimize_and_report(&circuit, &args.optimize, &config, global)
}

/// Runs the `kairos random` command.
pub fn random(args: &RandomArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let nodes = args.nodes.unwrap_or(config.random.nodes);
    let edges = args.edges.unwrap_or(config.random.edges);
    let seed = args.seed.or(config.random.seed);

    if !global.quiet {
        eprintln!("Generating random circuit with {nodes} nodes and {edges} edges");
    }
    let mut rng = make_rng(seed);
    let circuit = random_circuit(&mut rng, nodes, edges, config.random.max_attempts)?;

    if let Some(ref path) = args.save {
        save_circuit(&circuit, path, global)?;
    }
    optimize_and_report(&circuit, &args.optimize, &config, global)
}

fn optimize_and_report(
    circuit: &Circuit,
    args: &OptimizeArgs,
    config: &KairosConfig,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let methods = selected_methods(args.method, config);
    let options = retime_options(config);
    let sink = DiagnosticSink::new();

    let original_period = clock_period(circuit)?;
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Original clock period {original_period}");
    }

    let mut outcomes = Vec::with_capacity(methods.len());
    for method in &methods {
        if !global.quiet && args.format == ReportFormat::Text {
            eprintln!("    Running {method}");
        }
        let outcome = optimize_with_diagnostics(circuit, *method, &options, &sink)?;
        if let Some(ref base) = args.output {
            let path = output_path(base, *method, methods.len() > 1);
            save_circuit(&outcome.circuit, &path, global)?;
        }
        outcomes.push(outcome);
    }

    render_diagnostics(&shown(sink.take_all(), global.verbose), global);

    match args.format {
        ReportFormat::Text => print_text(circuit, original_period, &outcomes, global),
        ReportFormat::Json => print_json(circuit, original_period, &outcomes)?,
    }

    let agree = outcomes
        .windows(2)
        .all(|w| w[0].optimized_period == w[1].optimized_period);
    let sound = outcomes
        .iter()
        .all(|o| o.optimized_period <= original_period && is_synchronous(&o.circuit));
    if agree && sound {
        Ok(0)
    } else {
        eprintln!("error: optimizers disagree or produced an invalid circuit");
        Ok(2)
    }
}

/// Drops notes unless `verbose`. Warnings and errors are always shown.
fn shown(diagnostics: Vec<Diagnostic>, verbose: bool) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .filter(|d| verbose || d.severity > Severity::Note)
        .collect()
}

/// `out.dot` for a single method, `out.opt1.dot` / `out.opt2.dot` for several.
fn output_path(base: &Path, method: Method, several: bool) -> PathBuf {
    if !several {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}.{method}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{method}"),
    };
    base.with_file_name(name)
}

fn print_text(
    circuit: &Circuit,
    original_period: i64,
    outcomes: &[RetimingOutcome],
    global: &GlobalArgs,
) {
    println!("{}: original clock period {original_period}", circuit.name);
    for outcome in outcomes {
        println!(
            "{}: clock period {} ({} oracle call(s))",
            outcome.method, outcome.optimized_period, outcome.oracle_calls
        );
        if global.verbose {
            for (node, lag) in outcome.retiming.by_name(circuit) {
                println!("    r({node}) = {lag}");
            }
        }
    }
}

fn print_json(
    circuit: &Circuit,
    original_period: i64,
    outcomes: &[RetimingOutcome],
) -> Result<(), serde_json::Error> {
    let report = json_report(circuit, original_period, outcomes);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn json_report(
    circuit: &Circuit,
    original_period: i64,
    outcomes: &[RetimingOutcome],
) -> serde_json::Value {
    let results: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|o| {
            serde_json::json!({
                "method": o.method,
                "optimized_period": o.optimized_period,
                "oracle_calls": o.oracle_calls,
                "fallback": o.fallback,
                "retiming": o.retiming.by_name(circuit),
            })
        })
        .collect();
    serde_json::json!({
        "circuit": circuit.name,
        "nodes": circuit.node_count(),
        "edges": circuit.edge_count(),
        "original_period": original_period,
        "results": results,
    })
}
