//! Diagnostic rendering for human-readable terminal output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// error[E203]: cycle without registers
///   --> correlator.dot:4:3
///    = note: d0 -> p0 -> h -> d0
///    = help: place a register on one edge of the cycle
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes for the severity header.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return head;
        }
        let ansi = match diag.severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{head}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        if let Some(location) = &diag.location {
            out.push_str(&format!("  --> {location}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{CYCLE_BUDGET_EXHAUSTED, IGNORED_STATEMENT, PERIOD_OPTIMIZED};
    use crate::location::SourceLocation;

    #[test]
    fn render_warning_with_location() {
        let diag = Diagnostic::warning(IGNORED_STATEMENT, "ignored `rankdir = LR`")
            .with_location(SourceLocation::new(4, 17).in_file("c.dot"));
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.starts_with("warning[W101]: ignored `rankdir = LR`\n"));
        assert!(output.contains("  --> c.dot:4:17"));
    }

    #[test]
    fn render_error_with_notes() {
        let diag = Diagnostic::error(CYCLE_BUDGET_EXHAUSTED, "budget hit")
            .with_note("enumerated 10 cycles")
            .with_help("raise validate.cycle_budget");
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.contains("error[E204]: budget hit"));
        assert!(output.contains("= note: enumerated 10 cycles"));
        assert!(output.contains("= help: raise validate.cycle_budget"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn render_with_color_wraps_header() {
        let diag = Diagnostic::note(PERIOD_OPTIMIZED, "done");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;36mnote[T301]\x1b[0m: done"));
    }
}
