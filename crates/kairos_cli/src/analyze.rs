//! `kairos cp`, `kairos wd`, `kairos feas`, and `kairos check`.

use kairos_diagnostics::DiagnosticSink;
use kairos_graph::{check_synchronous, load_dot};
use kairos_retime::{
    check as shortest_path_check, delta_map, feas as relaxation_check, retime, wd as wd_matrices,
};

use crate::pipeline::{
    check_options, load_circuit, render_diagnostics, resolve_config, save_circuit,
};
use crate::{CpArgs, FeasArgs, FileArgs, GlobalArgs, OracleArg};

/// Runs the `kairos cp` command.
pub fn cp(args: &CpArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let circuit = load_circuit(&args.file, &config, global)?;
    let deltas = delta_map(&circuit)?;

    println!("clock period: {}", deltas.period());
    if args.deltas {
        let width = circuit.nodes.iter().map(|n| n.name.len()).max().unwrap_or(0);
        for (node, delta) in deltas.iter() {
            println!("  {:<width$}  {delta}", circuit.node_name(node));
        }
    }
    Ok(0)
}

/// Runs the `kairos wd` command.
pub fn wd(args: &FileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let circuit = load_circuit(&args.file, &config, global)?;
    let matrices = wd_matrices(&circuit)?;
    print!("{}", matrices.render());
    if global.verbose {
        let candidates: Vec<String> = matrices
            .candidate_periods()
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("\ncandidate periods: {}", candidates.join(", "));
    }
    Ok(0)
}

/// Runs the `kairos feas` command.
///
/// Returns exit code 0 if the period is reachable, 2 if it is not.
pub fn feas(args: &FeasArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let circuit = load_circuit(&args.file, &config, global)?;

    let found = match args.oracle {
        OracleArg::Relaxation => relaxation_check(&circuit, args.period)?,
        OracleArg::ShortestPath => shortest_path_check(&circuit, args.period)?,
    };
    let Some(r) = found else {
        println!("clock period {} is infeasible", args.period);
        return Ok(2);
    };

    let retimed = retime(&circuit, &r)?;
    println!(
        "clock period {} is feasible (retimed period {})",
        args.period,
        kairos_retime::clock_period(&retimed)?
    );
    for (node, lag) in r.by_name(&circuit) {
        println!("  r({node}) = {lag}");
    }
    if let Some(ref path) = args.output {
        save_circuit(&retimed, path, global)?;
    }
    Ok(0)
}

/// Runs the `kairos check` command.
///
/// Returns exit code 0 if the circuit is synchronous, 1 otherwise.
pub fn check(args: &FileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let sink = DiagnosticSink::new();
    let circuit = load_dot(&args.file, &sink)?;
    let synchronous = check_synchronous(&circuit, &check_options(&config), &sink);

    render_diagnostics(&sink.take_all(), global);
    if !global.quiet {
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            sink.error_count(),
            sink.warning_count()
        );
    }

    if synchronous {
        println!("{}: synchronous", circuit.name);
        Ok(0)
    } else {
        println!("{}: not synchronous", circuit.name);
        Ok(1)
    }
}
