//! `kairos correlator`: benchmark circuit generation.

use kairos_gen::correlator as build_correlator;
use kairos_graph::write_dot;

use crate::pipeline::save_circuit;
use crate::{CorrelatorArgs, GlobalArgs};

/// Runs the `kairos correlator` command.
///
/// Writes DOT to the output file if given, to stdout otherwise.
pub fn correlator(
    args: &CorrelatorArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let circuit = build_correlator(args.order)?;
    match args.output {
        Some(ref path) => save_circuit(&circuit, path, global)?,
        None => print!("{}", write_dot(&circuit)),
    }
    Ok(0)
}
