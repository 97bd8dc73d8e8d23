//! Simulation parameters supplied by the host

use banker_core::{BankerError, MAX_PROCESSES, MAX_RESOURCES};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Number of idle entries appended after the real requests
pub const DEFAULT_PADDING: usize = 5;

/// Parameters for random system generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Process count, `1..=10`
    pub processes: usize,
    /// Resource class count, `1..=5`
    pub resources: usize,
    /// Floor for each class's total (inclusive)
    pub lowest: u32,
    /// Ceiling for each class's total (inclusive)
    pub highest: u32,
    /// Idle entries appended to the request queue
    pub padding: usize,
    /// Seed for deterministic replay; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            processes: 5,
            resources: 3,
            lowest: 3,
            highest: 20,
            padding: DEFAULT_PADDING,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(processes: usize, resources: usize, lowest: u32, highest: u32) -> Self {
        SimulationConfig {
            processes,
            resources,
            lowest,
            highest,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Reject out-of-range parameters; values are never clamped
    pub fn validate(&self) -> banker_core::Result<()> {
        if !(1..=MAX_PROCESSES).contains(&self.processes) {
            return Err(BankerError::invalid(format!(
                "process count {} outside [1, {}]",
                self.processes, MAX_PROCESSES
            )));
        }
        if !(1..=MAX_RESOURCES).contains(&self.resources) {
            return Err(BankerError::invalid(format!(
                "resource class count {} outside [1, {}]",
                self.resources, MAX_RESOURCES
            )));
        }
        if self.lowest > self.highest {
            return Err(BankerError::invalid(format!(
                "resource floor {} exceeds ceiling {}",
                self.lowest, self.highest
            )));
        }
        Ok(())
    }

    /// Random source for generation and sequencing
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
