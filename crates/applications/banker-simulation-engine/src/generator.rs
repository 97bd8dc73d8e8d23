//! Random generation of a consistent initial system
//!
//! Draw order per resource class `j`:
//! - `total[j]` uniform in `[lowest, highest]`
//! - `max_claim[i][j]` uniform in `[0, total[j]]`
//! - `allocation[i][j]` uniform in `[0, min(max_claim[i][j], remaining[j])]`,
//!   where `remaining[j]` starts at `total[j]` and is depleted row by row
//!
//! Depletion guarantees `Σ_i allocation[i][j] ≤ total[j]`, so the derived
//! available vector is never negative.

use banker_core::{Matrix, ResourceVector, SystemState};
use rand::Rng;
use tracing::info;

use crate::config::SimulationConfig;

/// Generator for total, max-claim and allocation matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixGenerator {
    processes: usize,
    resources: usize,
    lowest: u32,
    highest: u32,
}

impl MatrixGenerator {
    /// Create a generator; callers are expected to pass validated bounds
    /// (`lowest <= highest`, counts at least 1).
    pub fn new(processes: usize, resources: usize, lowest: u32, highest: u32) -> Self {
        MatrixGenerator {
            processes,
            resources,
            lowest,
            highest,
        }
    }

    /// Validate `config` and build a generator from it
    pub fn from_config(config: &SimulationConfig) -> banker_core::Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.processes,
            config.resources,
            config.lowest,
            config.highest,
        ))
    }

    /// Generate a system state from the injected random source
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SystemState {
        let total = self.generate_total(rng);
        let max_claim = self.generate_max_claim(&total, rng);
        let allocation = self.generate_allocation(&total, &max_claim, rng);

        let system = SystemState::derive(total, max_claim, allocation);
        info!(
            processes = self.processes,
            resources = self.resources,
            total = ?system.total,
            available = ?system.available,
            "Generated system"
        );
        system
    }

    fn generate_total<R: Rng + ?Sized>(&self, rng: &mut R) -> ResourceVector {
        (0..self.resources)
            .map(|_| rng.gen_range(self.lowest..=self.highest))
            .collect()
    }

    fn generate_max_claim<R: Rng + ?Sized>(&self, total: &[u32], rng: &mut R) -> Matrix {
        (0..self.processes)
            .map(|_| total.iter().map(|&t| rng.gen_range(0..=t)).collect())
            .collect()
    }

    fn generate_allocation<R: Rng + ?Sized>(
        &self,
        total: &[u32],
        max_claim: &Matrix,
        rng: &mut R,
    ) -> Matrix {
        let mut remaining = total.to_vec();

        max_claim
            .iter()
            .map(|claim_row| {
                claim_row
                    .iter()
                    .zip(remaining.iter_mut())
                    .map(|(&claim, left)| {
                        let held = rng.gen_range(0..=claim.min(*left));
                        *left -= held;
                        held
                    })
                    .collect()
            })
            .collect()
    }
}

/// Convenience wrapper: generate a system for `processes × resources`
pub fn generate<R: Rng + ?Sized>(
    processes: usize,
    resources: usize,
    lowest: u32,
    highest: u32,
    rng: &mut R,
) -> SystemState {
    MatrixGenerator::new(processes, resources, lowest, highest).generate(rng)
}
