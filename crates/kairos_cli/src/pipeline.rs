//! Shared helpers for CLI commands: configuration lookup, circuit loading,
//! diagnostic rendering, and method selection.

use std::path::{Path, PathBuf};

use kairos_config::{KairosConfig, MethodChoice, CONFIG_FILE_NAME};
use kairos_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use kairos_graph::{check_synchronous, load_dot, CheckOptions, Circuit};
use kairos_retime::{FeasOptions, Method, RetimeOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{GlobalArgs, MethodArg};

/// Walks up from `start` looking for the nearest directory containing
/// `kairos.toml`.
pub fn find_config_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Loads the configuration selected by the global flags.
///
/// `--config` may name the file or its directory. Without it, the nearest
/// `kairos.toml` above the current directory is used; if there is none,
/// defaults apply.
pub fn resolve_config(global: &GlobalArgs) -> Result<KairosConfig, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        let config = if p.is_dir() {
            kairos_config::load_config(&p)?
        } else {
            kairos_config::load_config_file(&p)?
        };
        return Ok(config);
    }
    match find_config_dir(&std::env::current_dir()?) {
        Some(dir) => {
            if global.verbose {
                eprintln!("     Config {}", dir.join(CONFIG_FILE_NAME).display());
            }
            Ok(kairos_config::load_config(&dir)?)
        }
        None => Ok(KairosConfig::default()),
    }
}

/// Validity-checker options from the configuration.
pub fn check_options(config: &KairosConfig) -> CheckOptions {
    CheckOptions {
        cycle_budget: config.validate.cycle_budget,
    }
}

/// Retiming options from the configuration.
pub fn retime_options(config: &KairosConfig) -> RetimeOptions {
    RetimeOptions {
        feas: FeasOptions {
            early_exit: config.retime.feas_early_exit,
        },
    }
}

/// The methods to run: the command line wins over the configuration.
pub fn selected_methods(arg: Option<MethodArg>, config: &KairosConfig) -> Vec<Method> {
    let choice = match arg {
        Some(MethodArg::Opt1) => MethodChoice::Opt1,
        Some(MethodArg::Opt2) => MethodChoice::Opt2,
        Some(MethodArg::Both) => MethodChoice::Both,
        None => config.retime.method,
    };
    match choice {
        MethodChoice::Opt1 => vec![Method::Opt1],
        MethodChoice::Opt2 => vec![Method::Opt2],
        MethodChoice::Both => vec![Method::Opt1, Method::Opt2],
    }
}

/// A seeded generator, or one seeded from entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Renders diagnostics to stderr.
pub fn render_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        eprint!("{}", renderer.render(diag));
    }
}

/// Loads a circuit from a DOT file and checks that it is synchronous.
///
/// Loader warnings and checker findings are rendered to stderr. Returns
/// an error if the file cannot be read or the circuit is not synchronous.
pub fn load_circuit(
    path: &Path,
    config: &KairosConfig,
    global: &GlobalArgs,
) -> Result<Circuit, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let circuit = load_dot(path, &sink);
    let loaded = circuit.map(|c| {
        let ok = check_synchronous(&c, &check_options(config), &sink);
        (c, ok)
    });

    let diagnostics = sink.take_all();
    if !global.quiet || sink.has_errors() {
        render_diagnostics(&diagnostics, global);
    }

    let (circuit, synchronous) = loaded?;
    if !synchronous {
        return Err(format!("`{}` is not a synchronous circuit", path.display()).into());
    }
    if !global.quiet {
        eprintln!(
            "    Loaded {} ({} nodes, {} edges)",
            circuit.name,
            circuit.node_count(),
            circuit.edge_count()
        );
    }
    Ok(circuit)
}

/// Writes a circuit as DOT, creating parent directories as needed.
pub fn save_circuit(
    circuit: &Circuit,
    path: &Path,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    kairos_graph::save_dot(circuit, path)?;
    if !global.quiet {
        eprintln!("     Wrote {}", path.display());
    }
    Ok(())
}
