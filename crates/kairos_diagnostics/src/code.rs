//! Diagnostic codes and the codes Kairos emits.
//!
//! A code is a category letter plus a three-digit number. The hundreds
//! digit names the stage that raised it: `1xx` the DOT loader, `2xx` the
//! validity checker, `3xx` the optimizer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, which fixes its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Rejected input (`E`).
    Error,
    /// Tolerated input (`W`).
    Warning,
    /// Clock period and retiming findings (`T`).
    Timing,
}

impl Category {
    /// The prefix letter.
    pub const fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Timing => 'T',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'E' => Some(Category::Error),
            'W' => Some(Category::Warning),
            'T' => Some(Category::Timing),
            _ => None,
        }
    }
}

/// A category and a number, displayed as e.g. `E203`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category.
    pub category: Category,
    /// The number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// Parses the displayed form, e.g. `"W101"`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let category = Category::from_prefix(chars.next()?)?;
        let digits = chars.as_str();
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::new(category, digits.parse().ok()?))
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// `W101`: a DOT statement that carries no circuit data was skipped.
pub const IGNORED_STATEMENT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);

/// `E201`: a node has a negative delay.
pub const NEGATIVE_DELAY: DiagnosticCode = DiagnosticCode::new(Category::Error, 201);

/// `E202`: an edge has a negative register count.
pub const NEGATIVE_WEIGHT: DiagnosticCode = DiagnosticCode::new(Category::Error, 202);

/// `E203`: a cycle carries no register.
pub const ZERO_REGISTER_CYCLE: DiagnosticCode = DiagnosticCode::new(Category::Error, 203);

/// `E204`: cycle enumeration stopped before every cycle was inspected.
pub const CYCLE_BUDGET_EXHAUSTED: DiagnosticCode = DiagnosticCode::new(Category::Error, 204);

/// `T301`: the clock period before and after optimization.
pub const PERIOD_OPTIMIZED: DiagnosticCode = DiagnosticCode::new(Category::Timing, 301);

/// `T302`: no candidate period was feasible and the circuit was kept as is.
pub const IDENTITY_FALLBACK: DiagnosticCode = DiagnosticCode::new(Category::Timing, 302);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_to_three_digits() {
        assert_eq!(ZERO_REGISTER_CYCLE.to_string(), "E203");
        assert_eq!(DiagnosticCode::new(Category::Timing, 1).to_string(), "T001");
    }

    #[test]
    fn parse_accepts_displayed_codes() {
        for code in [
            IGNORED_STATEMENT,
            NEGATIVE_DELAY,
            NEGATIVE_WEIGHT,
            ZERO_REGISTER_CYCLE,
            CYCLE_BUDGET_EXHAUSTED,
            PERIOD_OPTIMIZED,
            IDENTITY_FALLBACK,
        ] {
            assert_eq!(DiagnosticCode::parse(&code.to_string()), Some(code));
        }
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        assert_eq!(DiagnosticCode::parse(""), None);
        assert_eq!(DiagnosticCode::parse("X101"), None);
        assert_eq!(DiagnosticCode::parse("E20"), None);
        assert_eq!(DiagnosticCode::parse("E2034"), None);
        assert_eq!(DiagnosticCode::parse("E2a3"), None);
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&PERIOD_OPTIMIZED).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PERIOD_OPTIMIZED);
    }
}
