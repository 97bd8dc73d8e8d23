//! Banker Simulation Engine
//!
//! Tick-driven simulator for teaching the Banker's algorithm for deadlock
//! avoidance.
//!
//! ## Pipeline
//!
//! ```text
//! generator ──► (total, max_claim, allocation)
//!     │
//!     ▼
//! need/available ──► sequencer ──► request queue
//!                                      │
//!                                      ▼
//!                   processor ◄──► safety checker
//! ```
//!
//! The processor is the sole writer of a [`SimulationState`]; every other
//! component reads immutable inputs once at setup.

pub mod config;
pub mod error;
pub mod generator;
pub mod processor;
pub mod safety;
pub mod scenario;
pub mod sequencer;
pub mod simulator;

pub use banker_core::{
    BankerError, Decision, Matrix, ProcessId, RejectReason, Request, RequestQueue,
    ResourceVector, SimulationState, SystemState, TickOutcome,
};
pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use generator::MatrixGenerator;
pub use processor::{advance, skip};
pub use safety::{all_safe_sequences, is_safe, SafetyReport, StateSafety};
pub use scenario::Scenario;
pub use sequencer::{build_request_queue, RequestSequencer};
pub use simulator::{RunPolicy, SimulationResult, Simulator};
