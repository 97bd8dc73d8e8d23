//! Core types for the Banker's algorithm engine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BankerError, Result};

/// Index of a simulated process, `0..n`
pub type ProcessId = usize;

/// Length-`m` vector of resource counts, one entry per resource class
pub type ResourceVector = Vec<u32>;

/// `n × m` matrix, one row per process
pub type Matrix = Vec<ResourceVector>;

/// A single queued resource request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Requesting process; `None` marks an idle padding entry
    #[serde(default)]
    pub pid: Option<ProcessId>,
    pub amounts: ResourceVector,
}

impl Request {
    pub fn new(pid: ProcessId, amounts: ResourceVector) -> Self {
        Request {
            pid: Some(pid),
            amounts,
        }
    }

    /// Padding entry that extends the timeline without demanding anything
    pub fn idle(resources: usize) -> Self {
        Request {
            pid: None,
            amounts: vec![0; resources],
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pid {
            Some(pid) => write!(f, "P{} requests {:?}", pid, self.amounts),
            None => write!(f, "idle"),
        }
    }
}

/// Ordered, immutable sequence of requests
///
/// The processing cursor lives in [`SimulationState::tick`](crate::SimulationState),
/// never in the queue itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestQueue {
    requests: Vec<Request>,
}

impl RequestQueue {
    /// Wrap an already-validated request list
    pub fn new(requests: Vec<Request>) -> Self {
        RequestQueue { requests }
    }

    /// Build a queue from caller-supplied requests, checking pid range and width
    pub fn from_requests(requests: Vec<Request>, processes: usize, resources: usize) -> Result<Self> {
        for (tick, request) in requests.iter().enumerate() {
            if let Some(pid) = request.pid {
                if pid >= processes {
                    return Err(BankerError::invalid(format!(
                        "request {} names process {} but only {} exist",
                        tick, pid, processes
                    )));
                }
            }
            if request.amounts.len() != resources {
                return Err(BankerError::invalid(format!(
                    "request {} has {} resource classes, expected {}",
                    tick,
                    request.amounts.len(),
                    resources
                )));
            }
        }
        Ok(RequestQueue { requests })
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Request scheduled at `tick`, if any
    pub fn get(&self, tick: usize) -> Option<&Request> {
        self.requests.get(tick)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn as_slice(&self) -> &[Request] {
        &self.requests
    }

    /// Requests belonging to `pid`, in queue order
    pub fn requests_for(&self, pid: ProcessId) -> impl Iterator<Item = &Request> {
        self.requests.iter().filter(move |r| r.pid == Some(pid))
    }
}

/// Why a request was not granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Request exceeds the process's declared remaining need
    ExceedsNeed,
    /// Request exceeds what is currently free
    ExceedsAvailable,
    /// Granting would leave the system in an unsafe state
    Unsafe,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectReason::ExceedsNeed => "request exceeds remaining need",
            RejectReason::ExceedsAvailable => "insufficient resources available",
            RejectReason::Unsafe => "granting would leave the system unsafe",
        };
        f.write_str(reason)
    }
}

/// Result of processing one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Request committed; `completed` is set when the process reached its
    /// maximum claim and released everything it held
    Granted {
        safe_sequence: Vec<ProcessId>,
        completed: bool,
    },
    Rejected(RejectReason),
    /// Discarded by the caller without evaluation
    Skipped,
    /// Padding entry
    Idle,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted { .. })
    }
}

/// Record of one consumed tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Tick at which the request was processed (before the increment)
    pub tick: usize,
    pub request: Request,
    pub decision: Decision,
}
