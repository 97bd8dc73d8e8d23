//! Error types for the Banker's algorithm engine
//!
//! A rejected request is not an error: it is reported through
//! [`Decision::Rejected`](crate::types::Decision::Rejected).

use thiserror::Error;

/// Core result type
pub type Result<T> = std::result::Result<T, BankerError>;

/// Errors surfaced to the caller of the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankerError {
    /// Counts out of range, or matrices violating `allocation ≤ max_claim ≤ total`
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Advance/skip called with the cursor already at the end of the queue
    #[error("Request queue exhausted: tick {tick} of {len}")]
    QueueExhausted { tick: usize, len: usize },
}

impl BankerError {
    /// Create an invalid configuration error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
