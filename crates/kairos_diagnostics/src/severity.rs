//! How serious a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity. Later variants compare greater.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A finding with nothing to fix, such as the period an optimization
    /// reached.
    Note,
    /// Input that was accepted but deserves a look.
    Warning,
    /// Input that was rejected.
    Error,
}

impl Severity {
    /// The lowercase word used in rendered headers.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_rank_highest() {
        assert!(Severity::Note < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
