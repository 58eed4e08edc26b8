//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::KairosConfig;
use std::path::Path;

/// The file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "kairos.toml";

/// Loads and validates `<dir>/kairos.toml`.
pub fn load_config(dir: &Path) -> Result<KairosConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates the configuration file at `path`.
pub fn load_config_file(path: &Path) -> Result<KairosConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<KairosConfig, ConfigError> {
    let config: KairosConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks value ranges that serde cannot express.
fn validate_config(config: &KairosConfig) -> Result<(), ConfigError> {
    let random = &config.random;
    if random.nodes < 2 {
        return Err(ConfigError::invalid("random.nodes", "must be at least 2"));
    }
    // Every node needs a predecessor; self-loops and parallel edges are
    // never drawn.
    let max_edges = random.nodes * (random.nodes - 1);
    if random.edges < random.nodes || random.edges > max_edges {
        return Err(ConfigError::invalid(
            "random.edges",
            format!(
                "must be within {}..={} for {} nodes, got {}",
                random.nodes, max_edges, random.nodes, random.edges
            ),
        ));
    }
    if random.max_attempts == 0 {
        return Err(ConfigError::invalid("random.max_attempts", "must be at least 1"));
    }

    let stress = &config.stress;
    if stress.min_nodes < 2 || stress.min_nodes > stress.max_nodes {
        return Err(ConfigError::invalid(
            "stress.min_nodes",
            format!(
                "must be at least 2 and at most stress.max_nodes ({})",
                stress.max_nodes
            ),
        ));
    }
    if stress.min_edges > stress.max_edges {
        return Err(ConfigError::invalid(
            "stress.min_edges",
            format!("must not exceed stress.max_edges ({})", stress.max_edges),
        ));
    }
    if stress.max_edges < stress.max_nodes {
        return Err(ConfigError::invalid(
            "stress.max_edges",
            format!(
                "must be at least stress.max_nodes ({}), got {}",
                stress.max_nodes, stress.max_edges
            ),
        ));
    }

    if config.validate.cycle_budget == Some(0) {
        return Err(ConfigError::invalid("validate.cycle_budget", "must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MethodChoice;

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.retime.method, MethodChoice::Both);
        assert!(config.retime.feas_early_exit);
        assert!(config.validate.cycle_budget.is_none());
        assert_eq!(config.random.nodes, 8);
        assert_eq!(config.random.edges, 11);
        assert_eq!(config.stress.iterations, 100);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[retime]
method = "opt2"
feas_early_exit = false

[validate]
cycle_budget = 5000

[random]
nodes = 12
edges = 20
seed = 7
max_attempts = 50

[stress]
iterations = 3
min_nodes = 4
max_nodes = 6
min_edges = 4
max_edges = 9
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.retime.method, MethodChoice::Opt2);
        assert!(!config.retime.feas_early_exit);
        assert_eq!(config.validate.cycle_budget, Some(5000));
        assert_eq!(config.random.seed, Some(7));
        assert_eq!(config.random.max_attempts, 50);
        assert_eq!(config.stress.max_edges, 9);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = load_config_from_str("[random]\nseed = 1\n").unwrap();
        assert_eq!(config.random.seed, Some(1));
        assert_eq!(config.random.nodes, 8);
    }

    #[test]
    fn unknown_method_is_parse_error() {
        let err = load_config_from_str("[retime]\nmethod = \"opt3\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn too_many_edges_rejected() {
        let err = load_config_from_str("[random]\nnodes = 3\nedges = 7\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "random.edges", .. }));
    }

    #[test]
    fn too_few_edges_rejected() {
        let err = load_config_from_str("[random]\nnodes = 5\nedges = 4\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "`random.edges` must be within 5..=20 for 5 nodes, got 4"
        );
    }

    #[test]
    fn zero_budget_rejected() {
        let err = load_config_from_str("[validate]\ncycle_budget = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "validate.cycle_budget", .. }));
    }

    #[test]
    fn inverted_stress_range_rejected() {
        let err =
            load_config_from_str("[stress]\nmin_nodes = 9\nmax_nodes = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "stress.min_nodes", .. }));
    }

    #[test]
    fn stress_edges_below_node_count_rejected() {
        let err = load_config_from_str("[stress]\nmax_nodes = 8\nmin_edges = 4\nmax_edges = 6\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "`stress.max_edges` must be at least stress.max_nodes (8), got 6"
        );
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[retime]\nmethod = \"opt1\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.retime.method, MethodChoice::Opt1);
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/dir/kairos.toml"));
    }
}
