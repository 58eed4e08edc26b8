//! Synchronous circuit model for the Kairos retiming toolkit.
//!
//! A circuit is a directed multigraph: nodes are combinational elements with
//! a propagation delay, edges are wires with a register count. This crate
//! owns the [`Circuit`] arena, the synchronous-circuit validity checker, and
//! DOT reading and writing. The retiming algorithms live in `kairos_retime`.

#![warn(missing_docs)]

pub mod circuit;
pub mod dot;
pub mod error;
pub mod ids;
pub mod validate;

pub use circuit::{Circuit, Edge, Node};
pub use dot::{load_dot, parse_dot, save_dot, write_dot};
pub use error::DotError;
pub use ids::{EdgeId, NodeId};
pub use validate::{
    check_synchronous, find_violations, for_each_simple_cycle, is_synchronous, CheckOptions,
    Violation,
};
