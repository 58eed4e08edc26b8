//! Minimum clock period retiming.
//!
//! Both methods binary-search the sorted distinct D values for the smallest
//! period some retiming achieves, then apply the retiming found for it.
//! [`Method::Opt1`] asks the shortest-path oracle, [`Method::Opt2`] the
//! relaxation oracle. They reach the same period but may return different
//! retimings.

use crate::cp::clock_period;
use crate::error::{ensure_synchronous, RetimeError};
use crate::feasibility::{check_with, feas_with, FeasOptions};
use crate::retime::{retime, Retiming};
use crate::wd::wd_unchecked;
use kairos_common::Delay;
use kairos_diagnostics::code::{IDENTITY_FALLBACK, PERIOD_OPTIMIZED};
use kairos_diagnostics::{Diagnostic, DiagnosticSink};
use kairos_graph::Circuit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which feasibility oracle drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Shortest-path constraint solving over the W/D matrices.
    Opt1,
    /// Iterative relaxation.
    Opt2,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Opt1 => write!(f, "opt1"),
            Method::Opt2 => write!(f, "opt2"),
        }
    }
}

/// Options for [`optimize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetimeOptions {
    /// Options for the relaxation oracle used by [`Method::Opt2`].
    pub feas: FeasOptions,
}

/// The result of optimizing one circuit with one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetimingOutcome {
    /// The method used.
    pub method: Method,
    /// Clock period before retiming.
    pub original_period: Delay,
    /// Clock period after retiming.
    pub optimized_period: Delay,
    /// The applied retiming.
    pub retiming: Retiming,
    /// The retimed circuit.
    pub circuit: Circuit,
    /// Number of oracle queries made by the binary search.
    pub oracle_calls: usize,
    /// `true` if no candidate period was feasible and the identity
    /// retiming was kept.
    pub fallback: bool,
}

impl RetimingOutcome {
    /// Returns `true` if retiming lowered the clock period.
    pub fn improved(&self) -> bool {
        self.optimized_period < self.original_period
    }
}

/// Retimes a circuit to its minimum clock period using the shortest-path
/// oracle.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn opt1(circuit: &Circuit) -> Result<Circuit, RetimeError> {
    Ok(optimize(circuit, Method::Opt1, &RetimeOptions::default())?.circuit)
}

/// Retimes a circuit to its minimum clock period using the relaxation
/// oracle.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn opt2(circuit: &Circuit) -> Result<Circuit, RetimeError> {
    Ok(optimize(circuit, Method::Opt2, &RetimeOptions::default())?.circuit)
}

/// Retimes a circuit to its minimum clock period and reports how.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn optimize(
    circuit: &Circuit,
    method: Method,
    options: &RetimeOptions,
) -> Result<RetimingOutcome, RetimeError> {
    ensure_synchronous(circuit)?;
    let original_period = clock_period(circuit)?;

    let matrices = wd_unchecked(circuit)?;
    let candidates = matrices.candidate_periods();
    let search = match method {
        Method::Opt1 => smallest_feasible(&candidates, |c| Ok(check_with(circuit, &matrices, c)))?,
        Method::Opt2 => smallest_feasible(&candidates, |c| feas_with(circuit, c, &options.feas))?,
    };

    let fallback = search.best.is_none();
    let retiming = search
        .best
        .map(|(_, r)| r)
        .unwrap_or_else(|| Retiming::zero(circuit.node_count()));
    let retimed = retime(circuit, &retiming)?;
    let optimized_period = clock_period(&retimed)?;

    Ok(RetimingOutcome {
        method,
        original_period,
        optimized_period,
        retiming,
        circuit: retimed,
        oracle_calls: search.calls,
        fallback,
    })
}

/// [`optimize`], reporting the outcome into `sink`.
///
/// Emits `T301` with the periods before and after, and `T302` if the search
/// found no feasible candidate.
///
/// # Errors
///
/// Fails if the circuit is not synchronous.
pub fn optimize_with_diagnostics(
    circuit: &Circuit,
    method: Method,
    options: &RetimeOptions,
    sink: &DiagnosticSink,
) -> Result<RetimingOutcome, RetimeError> {
    let outcome = optimize(circuit, method, options)?;

    let mut note = Diagnostic::note(
        PERIOD_OPTIMIZED,
        format!(
            "{method}: clock period of `{}` {} -> {}",
            circuit.name, outcome.original_period, outcome.optimized_period
        ),
    )
    .with_note(format!("{} oracle call(s)", outcome.oracle_calls));
    if !outcome.improved() {
        note = note.with_note("the circuit was already at its minimum clock period");
    }
    sink.emit(note);

    if outcome.fallback {
        sink.emit(
            Diagnostic::warning(
                IDENTITY_FALLBACK,
                format!("{method}: no candidate clock period was feasible"),
            )
            .with_help("the circuit was left unchanged"),
        );
    }
    Ok(outcome)
}

struct Search {
    best: Option<(Delay, Retiming)>,
    calls: usize,
}

/// Finds the smallest candidate the oracle accepts.
///
/// Feasibility is monotone in the period, so a binary search over the
/// sorted candidates suffices. The witness of the smallest accepted
/// candidate is kept.
fn smallest_feasible(
    candidates: &[Delay],
    mut oracle: impl FnMut(Delay) -> Result<Option<Retiming>, RetimeError>,
) -> Result<Search, RetimeError> {
    let mut search = Search {
        best: None,
        calls: 0,
    };
    // Closed interval: `low..=high` are the candidates not yet ruled out.
    let (mut low, mut high) = (0_isize, candidates.len() as isize - 1);
    while low <= high {
        let mid = (low + high) / 2;
        let period = candidates[mid as usize];
        search.calls += 1;
        match oracle(period)? {
            Some(r) => {
                search.best = Some((period, r));
                high = mid - 1;
            }
            None => low = mid + 1,
        }
    }
    Ok(search)
}
