//! Error types for loading circuits from DOT files.

/// Errors that can occur while reading a circuit from DOT text.
///
/// Line and column numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum DotError {
    /// The file could not be read or written.
    #[error("failed to access DOT file: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not in the supported DOT subset.
    #[error("{line}:{column}: {message}")]
    Syntax {
        /// Line of the offending token.
        line: u32,
        /// Column of the offending token.
        column: u32,
        /// What was expected or found.
        message: String,
    },

    /// A node or edge has no `weight` attribute.
    #[error("{line}:{column}: {kind} `{name}` has no `weight` attribute")]
    MissingWeight {
        /// Line where the element was first mentioned.
        line: u32,
        /// Column where the element was first mentioned.
        column: u32,
        /// `"node"` or `"edge"`.
        kind: &'static str,
        /// The node name, or `from -> to` for edges.
        name: String,
    },

    /// A `weight` attribute is not an integer.
    #[error("{line}:{column}: weight `{value}` is not an integer")]
    InvalidWeight {
        /// Line of the attribute value.
        line: u32,
        /// Column of the attribute value.
        column: u32,
        /// The value as written.
        value: String,
    },

    /// A `weight` attribute is larger in magnitude than
    /// [`MAX_MAGNITUDE`](kairos_common::MAX_MAGNITUDE).
    #[error("{line}:{column}: weight {value} exceeds the supported magnitude {limit}",
        limit = kairos_common::MAX_MAGNITUDE)]
    WeightOutOfRange {
        /// Line of the attribute value.
        line: u32,
        /// Column of the attribute value.
        column: u32,
        /// The parsed value.
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_syntax() {
        let err = DotError::Syntax {
            line: 2,
            column: 7,
            message: "expected `{`".to_string(),
        };
        assert_eq!(format!("{err}"), "2:7: expected `{`");
    }

    #[test]
    fn display_missing_weight() {
        let err = DotError::MissingWeight {
            line: 5,
            column: 1,
            kind: "node",
            name: "p0".to_string(),
        };
        assert_eq!(format!("{err}"), "5:1: node `p0` has no `weight` attribute");
    }

    #[test]
    fn display_invalid_weight() {
        let err = DotError::InvalidWeight {
            line: 1,
            column: 20,
            value: "2.5".to_string(),
        };
        assert_eq!(format!("{err}"), "1:20: weight `2.5` is not an integer");
    }

    #[test]
    fn display_out_of_range() {
        let err = DotError::WeightOutOfRange {
            line: 3,
            column: 9,
            value: -(1 << 41),
        };
        assert_eq!(
            format!("{err}"),
            "3:9: weight -2199023255552 exceeds the supported magnitude 1099511627776"
        );
    }
}
