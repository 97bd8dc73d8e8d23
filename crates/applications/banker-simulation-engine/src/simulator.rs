//! Tick-driven simulation driver
//!
//! A [`Simulator`] owns one system, its request queue and the mutable
//! [`SimulationState`]. Presentation code reads through the accessors and
//! drives time with [`Simulator::step`] / [`Simulator::skip`] or runs the whole
//! queue with [`Simulator::run`].

use banker_core::{
    Decision, ProcessId, RejectReason, RequestQueue, SimulationState, SystemState, TickOutcome,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimulationConfig;
use crate::generator::MatrixGenerator;
use crate::processor;
use crate::safety::{SafetyReport, StateSafety};
use crate::sequencer::RequestSequencer;

/// How [`Simulator::run`] treats the pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPolicy {
    /// Evaluate every request
    #[default]
    AlwaysAdvance,
    /// Discard the pending request whenever the current state is unsafe
    SkipWhenUnsafe,
}

/// Summary of a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ticks: usize,
    pub granted: usize,
    pub rejected_exceeds_need: usize,
    pub rejected_exceeds_available: usize,
    pub rejected_unsafe: usize,
    pub skipped: usize,
    pub idle: usize,
    /// Processes that reached their maximum claim, in completion order
    pub completed_processes: Vec<ProcessId>,
    pub final_state: SimulationState,
}

/// Discrete-tick simulator
#[derive(Debug)]
pub struct Simulator {
    system: SystemState,
    queue: RequestQueue,
    state: SimulationState,
    history: Vec<TickOutcome>,
}

impl Simulator {
    /// Create a simulator for an already-validated system and queue
    pub fn new(system: SystemState, queue: RequestQueue) -> Self {
        let state = SimulationState::new(&system);
        Simulator {
            system,
            queue,
            state,
            history: Vec::new(),
        }
    }

    /// Generate a random system and request queue from `config`
    pub fn from_config<R: Rng + ?Sized>(
        config: &SimulationConfig,
        rng: &mut R,
    ) -> banker_core::Result<Self> {
        let system = MatrixGenerator::from_config(config)?.generate(rng);
        let queue = RequestSequencer::new(config.padding).build(&system.need, rng);
        Ok(Self::new(system, queue))
    }

    /// Process the pending request
    pub fn step(&mut self) -> banker_core::Result<&TickOutcome> {
        let outcome = processor::advance(&mut self.state, &self.queue)?;
        Ok(self.record(outcome))
    }

    /// Discard the pending request
    pub fn skip(&mut self) -> banker_core::Result<&TickOutcome> {
        let outcome = processor::skip(&mut self.state, &self.queue)?;
        Ok(self.record(outcome))
    }

    /// Run until the queue is exhausted
    pub fn run(&mut self, policy: RunPolicy) -> banker_core::Result<SimulationResult> {
        while !self.is_finished() {
            let discard = policy == RunPolicy::SkipWhenUnsafe && !self.safety().safe;
            if discard {
                self.skip()?;
            } else {
                self.step()?;
            }
        }

        let result = self.result();
        info!(
            ticks = result.ticks,
            granted = result.granted,
            rejected = result.rejected_exceeds_need
                + result.rejected_exceeds_available
                + result.rejected_unsafe,
            completed = result.completed_processes.len(),
            "Simulation finished"
        );
        Ok(result)
    }

    /// Deterministic safety check of the current state
    pub fn safety(&self) -> SafetyReport {
        self.state.is_safe()
    }

    /// Every safe completion order from the current state (small `n` only)
    pub fn safe_sequences(&self) -> Vec<Vec<ProcessId>> {
        self.state.safe_sequences()
    }

    pub fn is_finished(&self) -> bool {
        self.state.tick >= self.queue.len()
    }

    pub fn system(&self) -> &SystemState {
        &self.system
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn history(&self) -> &[TickOutcome] {
        &self.history
    }

    /// Tally the history so far
    pub fn result(&self) -> SimulationResult {
        let mut result = SimulationResult {
            ticks: self.history.len(),
            granted: 0,
            rejected_exceeds_need: 0,
            rejected_exceeds_available: 0,
            rejected_unsafe: 0,
            skipped: 0,
            idle: 0,
            completed_processes: Vec::new(),
            final_state: self.state.clone(),
        };

        for outcome in &self.history {
            match &outcome.decision {
                Decision::Granted { completed, .. } => {
                    result.granted += 1;
                    if *completed {
                        if let Some(pid) = outcome.request.pid {
                            result.completed_processes.push(pid);
                        }
                    }
                }
                Decision::Rejected(RejectReason::ExceedsNeed) => result.rejected_exceeds_need += 1,
                Decision::Rejected(RejectReason::ExceedsAvailable) => {
                    result.rejected_exceeds_available += 1
                }
                Decision::Rejected(RejectReason::Unsafe) => result.rejected_unsafe += 1,
                Decision::Skipped => result.skipped += 1,
                Decision::Idle => result.idle += 1,
            }
        }

        result
    }

    fn record(&mut self, outcome: TickOutcome) -> &TickOutcome {
        self.history.push(outcome);
        &self.history[self.history.len() - 1]
    }
}
