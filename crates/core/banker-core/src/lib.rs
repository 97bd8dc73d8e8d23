//! Banker Core - Shared types for the Banker's algorithm engine
//!
//! This crate defines the data model used by the simulation engine and by any
//! presentation layer that renders its state:
//! - Resource vectors and `n × m` matrices (one row per process)
//! - Requests, request queues and per-tick outcomes
//! - Need and availability calculation
//! - `SystemState` (a configured system) and `SimulationState` (the mutable
//!   aggregate owned by the request processor)
//! - Error types

pub mod error;
pub mod need;
pub mod state;
pub mod types;
pub mod vector;

pub use error::*;
pub use need::{available, need};
pub use state::{SimulationState, SystemState, MAX_PROCESSES, MAX_RESOURCES};
pub use types::*;
