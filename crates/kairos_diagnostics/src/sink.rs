//! Shared collection point for diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Collects diagnostics from the loader, the checker and the optimizer.
///
/// `emit` takes `&self`, so one sink can be handed to code running on
/// several threads. Error and warning counts are kept outside the lock and
/// survive [`take_all`](Self::take_all).
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    collected: Mutex<Vec<Diagnostic>>,
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        match diag.severity {
            Severity::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
            Severity::Warning => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
            }
            Severity::Note => {}
        }
        self.lock().push(diag);
    }

    /// `true` once any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Drains the collected diagnostics in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Copies the collected diagnostics without draining them.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    // A panic while pushing leaves the Vec intact, so a poisoned lock is
    // still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.collected.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{IGNORED_STATEMENT, PERIOD_OPTIMIZED, ZERO_REGISTER_CYCLE};

    fn cycle_error() -> Diagnostic {
        Diagnostic::error(ZERO_REGISTER_CYCLE, "cycle a -> b -> a carries no register")
    }

    #[test]
    fn counts_by_severity() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        sink.emit(Diagnostic::warning(IGNORED_STATEMENT, "ignored `rankdir = LR`"));
        sink.emit(Diagnostic::note(PERIOD_OPTIMIZED, "24 -> 13"));
        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 1);

        sink.emit(cycle_error());
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics().len(), 3);
    }

    #[test]
    fn take_all_drains_in_order_and_keeps_counts() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(IGNORED_STATEMENT, "first"));
        sink.emit(cycle_error());
        let drained = sink.take_all();
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].code, ZERO_REGISTER_CYCLE);
        assert!(sink.take_all().is_empty());
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn shared_across_threads() {
        let sink = DiagnosticSink::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..25 {
                        sink.emit(cycle_error());
                    }
                });
            }
        });
        assert_eq!(sink.error_count(), 100);
        assert_eq!(sink.take_all().len(), 100);
    }
}
