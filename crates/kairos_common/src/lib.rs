//! Shared foundational types used across the Kairos retiming toolkit.
//!
//! This crate provides the numeric units every circuit quantity is expressed
//! in (propagation delays and register counts) and the internal error type
//! used to report bugs rather than user input problems.

#![warn(missing_docs)]

pub mod result;
pub mod units;

pub use result::{InternalError, KairosResult};
pub use units::{Delay, Registers, MAX_MAGNITUDE};
