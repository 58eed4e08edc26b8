//! Errors from reading `kairos.toml`.

use std::path::PathBuf;

/// Why a configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        /// The file that was opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML, or a value has the wrong type.
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is well-typed but out of range.
    #[error("`{key}` {problem}")]
    Invalid {
        /// Dotted key of the offending setting, e.g. `random.edges`.
        key: &'static str,
        /// What is wrong with it.
        problem: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, problem: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            problem: problem.into(),
        }
    }
}
