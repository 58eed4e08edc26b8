//! Configuration types deserialized from `kairos.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `kairos.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct KairosConfig {
    /// Optimal-retiming settings.
    #[serde(default)]
    pub retime: RetimeConfig,
    /// Validity-checker settings.
    #[serde(default)]
    pub validate: ValidateConfig,
    /// Random circuit generation settings.
    #[serde(default)]
    pub random: RandomConfig,
    /// Randomized property-check settings.
    #[serde(default)]
    pub stress: StressConfig,
}

/// Which optimal-retiming search to run.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MethodChoice {
    /// Binary search validated by the shortest-path oracle.
    Opt1,
    /// Binary search validated by the FEAS relaxation oracle.
    Opt2,
    /// Run both and report each.
    #[default]
    Both,
}

/// `[retime]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RetimeConfig {
    /// The search method used when the command line does not pick one.
    pub method: MethodChoice,
    /// Stop FEAS as soon as a full round increments no lag.
    pub feas_early_exit: bool,
}

impl Default for RetimeConfig {
    fn default() -> Self {
        Self {
            method: MethodChoice::Both,
            feas_early_exit: true,
        }
    }
}

/// `[validate]` section.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateConfig {
    /// Maximum number of simple cycles the validity checker enumerates
    /// before giving up. `None` enumerates all of them.
    pub cycle_budget: Option<usize>,
}

/// `[random]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Number of nodes of a generated circuit.
    pub nodes: usize,
    /// Number of edges of a generated circuit.
    pub edges: usize,
    /// Seed for reproducible generation; entropy when absent.
    pub seed: Option<u64>,
    /// Number of candidate graphs drawn before generation fails.
    pub max_attempts: usize,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            nodes: 8,
            edges: 11,
            seed: None,
            max_attempts: 10_000,
        }
    }
}

/// `[stress]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Number of random circuits to check.
    pub iterations: usize,
    /// Smallest node count drawn.
    pub min_nodes: usize,
    /// Largest node count drawn.
    pub max_nodes: usize,
    /// Smallest edge count drawn.
    pub min_edges: usize,
    /// Largest edge count drawn.
    pub max_edges: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            min_nodes: 5,
            max_nodes: 12,
            min_edges: 10,
            max_edges: 30,
        }
    }
}
