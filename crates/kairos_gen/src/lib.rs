//! Circuit generators for Kairos.
//!
//! Provides the correlator circuits used as retiming benchmarks and seeded
//! random synchronous circuits for randomized testing.

#![warn(missing_docs)]

pub mod correlator;
pub mod error;
pub mod random;

pub use correlator::{correlator, correlator1, correlator2};
pub use error::GenerateError;
pub use random::random_circuit;
