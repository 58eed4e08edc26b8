//! Structured diagnostics for the Kairos retiming toolkit.
//!
//! Library crates never print. Findings meant for the user (a zero-register
//! cycle, an ignored DOT attribute, the outcome of an optimization) are built
//! as [`Diagnostic`] values and emitted into a thread-safe [`DiagnosticSink`].
//! Front ends drain the sink and format it with a [`DiagnosticRenderer`] such
//! as [`TerminalRenderer`], or serialize it as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod location;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use location::SourceLocation;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
