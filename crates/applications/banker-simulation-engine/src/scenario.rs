//! User-supplied systems loaded from JSON
//!
//! ```json
//! {
//!   "total": [10, 5, 7],
//!   "max_claim": [[7, 5, 3], [3, 2, 2]],
//!   "allocation": [[0, 1, 0], [2, 0, 0]],
//!   "requests": [{ "pid": 1, "amounts": [1, 0, 2] }]
//! }
//! ```
//!
//! `requests` is optional; without it the queue is built by the sequencer.

use std::fs;
use std::path::Path;

use banker_core::{Matrix, Request, RequestQueue, ResourceVector, SystemState};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::sequencer::RequestSequencer;
use crate::simulator::Simulator;

/// Matrices (and optionally a request timeline) supplied by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub total: ResourceVector,
    pub max_claim: Matrix,
    pub allocation: Matrix,
    #[serde(default)]
    pub requests: Option<Vec<Request>>,
}

impl Scenario {
    /// Read a scenario from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scenario = Self::from_json(&contents)?;
        info!(path = %path.display(), "Loaded scenario");
        Ok(scenario)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the matrices and build a simulator
    ///
    /// `padding` and `rng` are only used when the scenario has no requests.
    pub fn into_simulator<R: Rng + ?Sized>(self, padding: usize, rng: &mut R) -> Result<Simulator> {
        let system = SystemState::from_matrices(self.total, self.max_claim, self.allocation)?;

        let queue = match self.requests {
            Some(requests) => {
                RequestQueue::from_requests(requests, system.processes(), system.resources())?
            }
            None => RequestSequencer::new(padding).build(&system.need, rng),
        };

        Ok(Simulator::new(system, queue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use banker_core::BankerError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCENARIO: &str = r#"{
        "total": [10, 5, 7],
        "max_claim": [[7, 5, 3], [3, 2, 2]],
        "allocation": [[0, 1, 0], [2, 0, 0]],
        "requests": [{ "pid": 1, "amounts": [1, 0, 2] }, { "amounts": [0, 0, 0] }]
    }"#;

    #[test]
    fn test_scenario_with_requests() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        let simulator = scenario
            .into_simulator(0, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(simulator.queue().len(), 2);
        assert!(simulator.queue().as_slice()[1].is_idle());
        assert_eq!(simulator.state().available, vec![8, 4, 7]);
    }

    #[test]
    fn test_scenario_without_requests_uses_sequencer() {
        let json = r#"{ "total": [4], "max_claim": [[4], [3]], "allocation": [[1], [1]] }"#;
        let simulator = Scenario::from_json(json)
            .unwrap()
            .into_simulator(2, &mut StdRng::seed_from_u64(1))
            .unwrap();

        let real: u32 = simulator
            .queue()
            .iter()
            .filter(|r| !r.is_idle())
            .map(|r| r.amounts[0])
            .sum();
        assert_eq!(real, 5);
        assert_eq!(simulator.queue().iter().filter(|r| r.is_idle()).count(), 2);
    }

    #[test]
    fn test_invalid_matrices_are_reported() {
        let json = r#"{ "total": [2], "max_claim": [[3]], "allocation": [[0]] }"#;
        let err = Scenario::from_json(json)
            .unwrap()
            .into_simulator(0, &mut StdRng::seed_from_u64(0))
            .unwrap_err();

        assert!(matches!(
            err,
            SimulationError::Banker(BankerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Scenario::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimulationError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Scenario::load("/nonexistent/banker-scenario.json").unwrap_err();
        assert!(matches!(err, SimulationError::Io(_)));
    }
}
