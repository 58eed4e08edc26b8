//! Parsing and validation of `kairos.toml` configuration files.
//!
//! Every section is optional; a missing file and an empty file both yield
//! [`KairosConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
