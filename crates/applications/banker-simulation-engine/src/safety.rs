//! Safety checking: can every process still run to completion?
//!
//! [`is_safe`] is the deterministic check that gates request admission: it
//! repeatedly finishes the lowest-indexed unfinished process whose need fits
//! in the work vector, restarting the scan from index 0 after each finish.
//!
//! [`all_safe_sequences`] enumerates every completion order instead. It is
//! exponential in the process count and only meant for displaying how many
//! safe orders exist; the admission path never calls it.

use banker_core::{vector, Matrix, ProcessId, SimulationState};
use serde::{Deserialize, Serialize};

/// Outcome of the deterministic safety check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub safe: bool,
    /// Processes in the order they were marked finished. Complete (a safe
    /// sequence) only when `safe` is set.
    pub sequence: Vec<ProcessId>,
}

/// Deterministic safety check, lowest index wins ties
pub fn is_safe(allocation: &Matrix, need: &Matrix, available: &[u32]) -> SafetyReport {
    let processes = allocation.len();
    let mut work = available.to_vec();
    let mut finish = vec![false; processes];
    let mut sequence = Vec::with_capacity(processes);

    while let Some(pid) =
        (0..processes).find(|&i| !finish[i] && vector::fits_within(&need[i], &work))
    {
        vector::add_assign(&mut work, &allocation[pid]);
        finish[pid] = true;
        sequence.push(pid);
    }

    SafetyReport {
        safe: sequence.len() == processes,
        sequence,
    }
}

/// Every safe completion order, in lexicographic order
///
/// An empty result means the state is unsafe.
pub fn all_safe_sequences(
    allocation: &Matrix,
    need: &Matrix,
    available: &[u32],
) -> Vec<Vec<ProcessId>> {
    let mut search = Enumeration {
        allocation,
        need,
        finish: vec![false; allocation.len()],
        current: Vec::with_capacity(allocation.len()),
        found: Vec::new(),
    };
    search.explore(available.to_vec());
    search.found
}

/// Safety queries on a [`SimulationState`], for display code
pub trait StateSafety {
    /// Deterministic check of the current allocation
    fn is_safe(&self) -> SafetyReport;

    /// Every safe completion order from the current allocation (small `n` only)
    fn safe_sequences(&self) -> Vec<Vec<ProcessId>>;
}

impl StateSafety for SimulationState {
    fn is_safe(&self) -> SafetyReport {
        is_safe(&self.allocation, &self.need, &self.available)
    }

    fn safe_sequences(&self) -> Vec<Vec<ProcessId>> {
        all_safe_sequences(&self.allocation, &self.need, &self.available)
    }
}

struct Enumeration<'a> {
    allocation: &'a Matrix,
    need: &'a Matrix,
    finish: Vec<bool>,
    current: Vec<ProcessId>,
    found: Vec<Vec<ProcessId>>,
}

impl Enumeration<'_> {
    fn explore(&mut self, work: Vec<u32>) {
        if self.current.len() == self.allocation.len() {
            self.found.push(self.current.clone());
            return;
        }

        for pid in 0..self.allocation.len() {
            if self.finish[pid] || !vector::fits_within(&self.need[pid], &work) {
                continue;
            }

            let mut next = work.clone();
            vector::add_assign(&mut next, &self.allocation[pid]);

            self.finish[pid] = true;
            self.current.push(pid);
            self.explore(next);
            self.current.pop();
            self.finish[pid] = false;
        }
    }
}
