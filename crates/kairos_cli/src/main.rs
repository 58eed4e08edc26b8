//! Kairos CLI: clock period analysis and optimal retiming from the shell.
//!
//! `kairos run` optimizes a circuit read from a DOT file, `kairos random`
//! does the same on a generated circuit, `kairos cp`, `kairos wd`,
//! `kairos feas` and `kairos check` expose the individual analyses,
//! `kairos correlator` writes benchmark circuits, and `kairos stress`
//! cross-checks both optimizers on many random circuits.

#![warn(missing_docs)]

mod analyze;
mod generate;
mod optimize;
mod pipeline;
mod stress;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Kairos: minimum clock period retiming of synchronous circuits.
#[derive(Parser, Debug)]
#[command(name = "kairos", version, about = "Kairos retiming toolkit")]
pub struct Cli {
    /// Suppress all output except results and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print retimings and per-step details.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `kairos.toml` file or the directory holding it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Retime a circuit loaded from a DOT file to its minimum clock period.
    Run(RunArgs),
    /// Retime a randomly generated synchronous circuit.
    Random(RandomArgs),
    /// Print the clock period of a circuit.
    Cp(CpArgs),
    /// Print the W and D matrices of a circuit.
    Wd(FileArgs),
    /// Test whether a retiming reaches a target clock period.
    Feas(FeasArgs),
    /// Check that a circuit is synchronous.
    Check(FileArgs),
    /// Write the correlator circuit of a given order.
    Correlator(CorrelatorArgs),
    /// Cross-check both optimizers on random circuits.
    Stress(StressArgs),
}

/// A single circuit file argument.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// DOT file holding the circuit.
    pub file: PathBuf,
}

/// Options shared by the commands that optimize a circuit.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Search method; defaults to `retime.method` from `kairos.toml`.
    #[arg(short, long, value_enum)]
    pub method: Option<MethodArg>,

    /// Write the retimed circuit to this DOT file. With both methods, the
    /// method name is inserted before the extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `kairos run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// DOT file holding the circuit.
    pub file: PathBuf,

    /// Optimization options.
    #[command(flatten)]
    pub optimize: OptimizeArgs,
}

/// Arguments for the `kairos random` subcommand.
#[derive(Args, Debug)]
pub struct RandomArgs {
    /// Number of nodes; defaults to `random.nodes`.
    #[arg(short, long)]
    pub nodes: Option<usize>,

    /// Number of edges; defaults to `random.edges`.
    #[arg(short, long)]
    pub edges: Option<usize>,

    /// Seed for reproducible generation; defaults to `random.seed`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the generated circuit to this DOT file.
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Optimization options.
    #[command(flatten)]
    pub optimize: OptimizeArgs,
}

/// Arguments for the `kairos cp` subcommand.
#[derive(Args, Debug)]
pub struct CpArgs {
    /// DOT file holding the circuit.
    pub file: PathBuf,

    /// Also print the accumulated delay of every node.
    #[arg(long)]
    pub deltas: bool,
}

/// Arguments for the `kairos feas` subcommand.
#[derive(Args, Debug)]
pub struct FeasArgs {
    /// DOT file holding the circuit.
    pub file: PathBuf,

    /// Target clock period.
    #[arg(short, long)]
    pub period: i64,

    /// Feasibility oracle to ask.
    #[arg(long, value_enum, default_value_t = OracleArg::Relaxation)]
    pub oracle: OracleArg,

    /// Write the retimed circuit to this DOT file when feasible.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `kairos correlator` subcommand.
#[derive(Args, Debug)]
pub struct CorrelatorArgs {
    /// Order of the correlator (number of adders).
    pub order: usize,

    /// Write to this DOT file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `kairos stress` subcommand.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Number of circuits; defaults to `stress.iterations`.
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Seed for reproducible runs; defaults to `random.seed`.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Optimal retiming search selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Binary search with the shortest-path oracle.
    Opt1,
    /// Binary search with the relaxation oracle.
    Opt2,
    /// Run both and compare.
    Both,
}

/// Feasibility oracle selection for `kairos feas`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OracleArg {
    /// Iterative relaxation (FEAS).
    Relaxation,
    /// Shortest paths over the W/D constraint graph.
    #[value(name = "shortest-path")]
    ShortestPath,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress progress output.
    pub quiet: bool,
    /// Whether to print details.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok_and(|t| t != "dumb"),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => optimize::run(args, &global),
        Command::Random(ref args) => optimize::random(args, &global),
        Command::Cp(ref args) => analyze::cp(args, &global),
        Command::Wd(ref args) => analyze::wd(args, &global),
        Command::Feas(ref args) => analyze::feas(args, &global),
        Command::Check(ref args) => analyze::check(args, &global),
        Command::Correlator(ref args) => generate::correlator(args, &global),
        Command::Stress(ref args) => stress::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_default() {
        let cli = Cli::parse_from(["kairos", "run", "c.dot"]);
        match cli.command {
            Command::Run(ref args) => {
                assert_eq!(args.file, PathBuf::from("c.dot"));
                assert!(args.optimize.method.is_none());
                assert!(args.optimize.output.is_none());
                assert_eq!(args.optimize.format, ReportFormat::Text);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_with_args() {
        let cli = Cli::parse_from([
            "kairos", "run", "c.dot", "--method", "opt2", "-o", "out.dot", "--format", "json",
        ]);
        match cli.command {
            Command::Run(ref args) => {
                assert_eq!(args.optimize.method, Some(MethodArg::Opt2));
                assert_eq!(args.optimize.output, Some(PathBuf::from("out.dot")));
                assert_eq!(args.optimize.format, ReportFormat::Json);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_random() {
        let cli = Cli::parse_from(["kairos", "random", "-n", "12", "-e", "20", "--seed", "5"]);
        match cli.command {
            Command::Random(ref args) => {
                assert_eq!(args.nodes, Some(12));
                assert_eq!(args.edges, Some(20));
                assert_eq!(args.seed, Some(5));
                assert!(args.save.is_none());
            }
            _ => panic!("expected Random command"),
        }
    }

    #[test]
    fn parse_random_defaults() {
        let cli = Cli::parse_from(["kairos", "random"]);
        match cli.command {
            Command::Random(ref args) => {
                assert!(args.nodes.is_none());
                assert!(args.edges.is_none());
                assert!(args.seed.is_none());
            }
            _ => panic!("expected Random command"),
        }
    }

    #[test]
    fn parse_cp_deltas() {
        let cli = Cli::parse_from(["kairos", "cp", "c.dot", "--deltas"]);
        match cli.command {
            Command::Cp(ref args) => assert!(args.deltas),
            _ => panic!("expected Cp command"),
        }
    }

    #[test]
    fn parse_feas() {
        let cli = Cli::parse_from(["kairos", "feas", "c.dot", "--period", "13"]);
        match cli.command {
            Command::Feas(ref args) => {
                assert_eq!(args.period, 13);
                assert_eq!(args.oracle, OracleArg::Relaxation);
            }
            _ => panic!("expected Feas command"),
        }
    }

    #[test]
    fn parse_feas_shortest_path() {
        let cli = Cli::parse_from([
            "kairos",
            "feas",
            "c.dot",
            "-p",
            "13",
            "--oracle",
            "shortest-path",
        ]);
        match cli.command {
            Command::Feas(ref args) => assert_eq!(args.oracle, OracleArg::ShortestPath),
            _ => panic!("expected Feas command"),
        }
    }

    #[test]
    fn feas_requires_period() {
        assert!(Cli::try_parse_from(["kairos", "feas", "c.dot"]).is_err());
    }

    #[test]
    fn parse_correlator() {
        let cli = Cli::parse_from(["kairos", "correlator", "4", "-o", "c4.dot"]);
        match cli.command {
            Command::Correlator(ref args) => {
                assert_eq!(args.order, 4);
                assert_eq!(args.output, Some(PathBuf::from("c4.dot")));
            }
            _ => panic!("expected Correlator command"),
        }
    }

    #[test]
    fn parse_stress() {
        let cli = Cli::parse_from(["kairos", "stress", "-n", "10", "--seed", "1"]);
        match cli.command {
            Command::Stress(ref args) => {
                assert_eq!(args.iterations, Some(10));
                assert_eq!(args.seed, Some(1));
            }
            _ => panic!("expected Stress command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["kairos", "--quiet", "--color", "never", "check", "c.dot"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["kairos", "wd", "c.dot", "--config", "/tmp/kairos.toml"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/kairos.toml"));
    }

    #[test]
    fn unknown_method_rejected() {
        assert!(Cli::try_parse_from(["kairos", "run", "c.dot", "--method", "opt3"]).is_err());
    }
}
