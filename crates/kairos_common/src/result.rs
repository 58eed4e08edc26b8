//! The error type for broken internal invariants.

/// Result of an operation that can only fail through a bug in Kairos.
///
/// Malformed circuits, unreadable files and infeasible clock periods are
/// reported through the error types of the crates that detect them.
pub type KairosResult<T> = Result<T, InternalError>;

/// An invariant inside Kairos did not hold, such as a combinational cycle
/// turning up in a circuit that already passed the synchrony check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
