//! Retiming engine for synchronous circuits.
//!
//! Given a [`Circuit`](kairos_graph::Circuit) whose nodes carry delays and
//! whose edges carry register counts, this crate computes
//!
//! - the clock period and per-node accumulated delays ([`clock_period`],
//!   [`delta_map`]);
//! - the all-pairs W/D matrices ([`wd`]);
//! - retimed circuits ([`retime`]);
//! - whether a target period is reachable ([`check`], [`feas`]);
//! - a minimum clock period retiming ([`opt1`], [`opt2`], [`optimize`]).
//!
//! Every public entry point rejects circuits that are not synchronous with
//! a [`RetimeError`]. None of them mutate their input.

#![warn(missing_docs)]

pub mod cp;
pub mod error;
pub mod feasibility;
pub mod lex;
pub mod opt;
pub mod retime;
pub mod wd;

pub use cp::{clock_period, delta_map, DeltaMap};
pub use error::RetimeError;
pub use feasibility::{check, check_with, feas, feas_with, FeasOptions};
pub use lex::LexPair;
pub use opt::{
    opt1, opt2, optimize, optimize_with_diagnostics, Method, RetimeOptions, RetimingOutcome,
};
pub use retime::{retime, Retiming};
pub use wd::{wd, WdMatrices};
