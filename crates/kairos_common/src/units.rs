//! Numeric units of a synchronous circuit.
//!
//! Both quantities are plain signed integers so that intermediate values of
//! the retiming algorithms (negated delays, negative lags, `W - 1` constraint
//! weights) need no conversions. Non-integer delays are expressed by scaling
//! every delay of a circuit to a common integer time unit before loading.

/// Combinational propagation delay of a node, and any sum of such delays
/// (path delays, clock periods).
pub type Delay = i64;

/// Number of registers (clocked delay elements) placed on an edge, and any
/// sum of such counts along a path. Retiming lags use the same unit.
pub type Registers = i64;

/// Largest delay or register count, in absolute value, that a circuit loaded
/// from a file may carry.
///
/// Path sums over fewer than 2²² nodes then stay far inside `i64`, so the
/// retiming algorithms can add delays and register counts freely.
pub const MAX_MAGNITUDE: i64 = 1 << 40;
