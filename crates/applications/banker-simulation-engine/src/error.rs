//! Error types for the simulation engine

use banker_core::BankerError;
use thiserror::Error;

/// Simulation result type
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors that can occur while configuring or running a simulation
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Engine error (invalid configuration, exhausted queue)
    #[error(transparent)]
    Banker(#[from] BankerError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulationError {
    /// True when the cursor ran past the end of the request queue
    pub fn is_queue_exhausted(&self) -> bool {
        matches!(self, Self::Banker(BankerError::QueueExhausted { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_exhausted_detection() {
        let err = SimulationError::from(BankerError::QueueExhausted { tick: 3, len: 3 });
        assert!(err.is_queue_exhausted());
        assert_eq!(err.to_string(), "Request queue exhausted: tick 3 of 3");

        let err = SimulationError::from(BankerError::invalid("bad"));
        assert!(!err.is_queue_exhausted());
    }
}
