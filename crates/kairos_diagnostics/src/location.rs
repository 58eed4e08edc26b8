//! Source positions attached to diagnostics about textual inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line/column position, optionally qualified by a file name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// The file the position refers to, if known.
    pub file: Option<String>,
    /// The 1-based line number.
    pub line: u32,
    /// The 1-based column number, counted in characters.
    pub column: u32,
}

impl SourceLocation {
    /// Creates a location without a file name.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Returns this location qualified by `file`.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}
