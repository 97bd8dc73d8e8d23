//! System and simulation state aggregates

use serde::{Deserialize, Serialize};

use crate::error::{BankerError, Result};
use crate::need;
use crate::types::{Matrix, ProcessId, ResourceVector};
use crate::vector;

/// Largest supported process count
pub const MAX_PROCESSES: usize = 10;

/// Largest supported resource-class count
pub const MAX_RESOURCES: usize = 5;

/// A configured system: totals, declared maxima and the initial allocation
///
/// Invariants: `allocation[i][j] ≤ max_claim[i][j] ≤ total[j]`,
/// `Σ_i allocation[i][j] ≤ total[j]`, and `need`/`available` derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    pub total: ResourceVector,
    pub max_claim: Matrix,
    pub allocation: Matrix,
    pub need: Matrix,
    pub available: ResourceVector,
}

impl SystemState {
    /// Build from matrices already known to satisfy the invariants
    /// (the generator's output).
    pub fn derive(total: ResourceVector, max_claim: Matrix, allocation: Matrix) -> Self {
        let need = need::need(&max_claim, &allocation);
        let available = need::available(&total, &allocation);
        SystemState {
            total,
            max_claim,
            allocation,
            need,
            available,
        }
    }

    /// Validate user-supplied matrices and derive need/available
    pub fn from_matrices(total: ResourceVector, max_claim: Matrix, allocation: Matrix) -> Result<Self> {
        let processes = max_claim.len();
        let resources = total.len();

        if !(1..=MAX_PROCESSES).contains(&processes) {
            return Err(BankerError::invalid(format!(
                "process count {} outside [1, {}]",
                processes, MAX_PROCESSES
            )));
        }
        if !(1..=MAX_RESOURCES).contains(&resources) {
            return Err(BankerError::invalid(format!(
                "resource class count {} outside [1, {}]",
                resources, MAX_RESOURCES
            )));
        }
        if allocation.len() != processes {
            return Err(BankerError::invalid(format!(
                "allocation has {} rows, max claim has {}",
                allocation.len(),
                processes
            )));
        }

        for i in 0..processes {
            if max_claim[i].len() != resources || allocation[i].len() != resources {
                return Err(BankerError::invalid(format!(
                    "row {} does not have {} resource classes",
                    i, resources
                )));
            }
            for j in 0..resources {
                let (held, max) = (allocation[i][j], max_claim[i][j]);
                if held > max {
                    return Err(BankerError::invalid(format!(
                        "allocation[{}][{}] = {} exceeds max claim {}",
                        i, j, held, max
                    )));
                }
                if max > total[j] {
                    return Err(BankerError::invalid(format!(
                        "max_claim[{}][{}] = {} exceeds total {}",
                        i, j, max, total[j]
                    )));
                }
            }
        }

        let held = vector::checked_column_sums(&allocation, resources).ok_or_else(|| {
            BankerError::invalid("allocation column sum overflows the resource counter")
        })?;
        for (j, (&h, &t)) in held.iter().zip(&total).enumerate() {
            if h > t {
                return Err(BankerError::invalid(format!(
                    "resource class {} is overcommitted: {} allocated of {}",
                    j, h, t
                )));
            }
        }

        Ok(Self::derive(total, max_claim, allocation))
    }

    pub fn processes(&self) -> usize {
        self.max_claim.len()
    }

    pub fn resources(&self) -> usize {
        self.total.len()
    }
}

/// Mutable aggregate advanced one tick at a time by the request processor
///
/// The processor is the only writer; presentation code reads the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub total: ResourceVector,
    pub allocation: Matrix,
    pub need: Matrix,
    pub available: ResourceVector,
    /// Cursor into the request queue
    pub tick: usize,
}

impl SimulationState {
    pub fn new(system: &SystemState) -> Self {
        SimulationState {
            total: system.total.clone(),
            allocation: system.allocation.clone(),
            need: system.need.clone(),
            available: system.available.clone(),
            tick: 0,
        }
    }

    pub fn processes(&self) -> usize {
        self.allocation.len()
    }

    pub fn resources(&self) -> usize {
        self.total.len()
    }

    /// Move `amounts` from available into `pid`'s allocation, reducing its need
    ///
    /// Callers must have checked `amounts ≤ need[pid]` and `amounts ≤ available`.
    pub fn grant(&mut self, pid: ProcessId, amounts: &[u32]) {
        vector::add_assign(&mut self.allocation[pid], amounts);
        vector::sub_assign(&mut self.need[pid], amounts);
        vector::sub_assign(&mut self.available, amounts);
    }

    /// Return everything `pid` holds to the available pool
    pub fn release(&mut self, pid: ProcessId) {
        vector::add_assign(&mut self.available, &self.allocation[pid]);
        self.allocation[pid].iter_mut().for_each(|held| *held = 0);
    }

    /// `available == total - Σ allocation`
    pub fn is_consistent(&self) -> bool {
        let Some(held) = vector::checked_column_sums(&self.allocation, self.resources()) else {
            return false;
        };
        self.total
            .iter()
            .zip(&held)
            .zip(&self.available)
            .all(|((t, h), a)| h <= t && t - h == *a)
    }
}

impl From<&SystemState> for SimulationState {
    fn from(system: &SystemState) -> Self {
        SimulationState::new(system)
    }
}
