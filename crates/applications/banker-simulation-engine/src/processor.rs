//! Request processing: one queued request per tick
//!
//! `advance` evaluates the request at the cursor:
//! 1. Admission: reject if it exceeds the process's remaining need or what is
//!    currently available.
//! 2. Hypothetical grant on a copy of the state.
//! 3. Safety check of the copy; commit only if safe.
//! 4. A process whose need reaches zero releases everything it holds.
//!
//! Every evaluated request consumes exactly one tick, granted or not.

use banker_core::{
    vector, BankerError, Decision, ProcessId, RejectReason, Request, RequestQueue,
    SimulationState, TickOutcome,
};
use tracing::{debug, warn};

use crate::safety::StateSafety;

/// Evaluate the request at `state.tick` and advance the cursor
///
/// Fails with [`BankerError::QueueExhausted`] when the cursor is already at the
/// end of `queue`, and with [`BankerError::InvalidConfiguration`] when the
/// request does not fit the state's dimensions. Neither failure mutates `state`.
pub fn advance(state: &mut SimulationState, queue: &RequestQueue) -> banker_core::Result<TickOutcome> {
    let request = pending(state, queue)?.clone();
    let tick = state.tick;

    let decision = match request.pid {
        None => Decision::Idle,
        Some(pid) => {
            check_dimensions(state, pid, &request)?;
            evaluate(state, pid, &request.amounts)
        }
    };

    debug!(tick, request = %request, decision = ?decision, "Processed request");
    state.tick += 1;

    Ok(TickOutcome {
        tick,
        request,
        decision,
    })
}

/// Discard the request at `state.tick` without evaluating it
pub fn skip(state: &mut SimulationState, queue: &RequestQueue) -> banker_core::Result<TickOutcome> {
    let request = pending(state, queue)?.clone();
    let tick = state.tick;

    debug!(tick, request = %request, "Skipped request");
    state.tick += 1;

    Ok(TickOutcome {
        tick,
        request,
        decision: Decision::Skipped,
    })
}

fn pending<'q>(state: &SimulationState, queue: &'q RequestQueue) -> banker_core::Result<&'q Request> {
    queue.get(state.tick).ok_or(BankerError::QueueExhausted {
        tick: state.tick,
        len: queue.len(),
    })
}

fn check_dimensions(state: &SimulationState, pid: ProcessId, request: &Request) -> banker_core::Result<()> {
    if pid >= state.processes() {
        return Err(BankerError::invalid(format!(
            "request at tick {} names process {} but only {} exist",
            state.tick,
            pid,
            state.processes()
        )));
    }
    if request.amounts.len() != state.resources() {
        return Err(BankerError::invalid(format!(
            "request at tick {} has {} resource classes, expected {}",
            state.tick,
            request.amounts.len(),
            state.resources()
        )));
    }
    Ok(())
}

fn evaluate(state: &mut SimulationState, pid: ProcessId, amounts: &[u32]) -> Decision {
    if !vector::fits_within(amounts, &state.need[pid]) {
        return Decision::Rejected(RejectReason::ExceedsNeed);
    }
    if !vector::fits_within(amounts, &state.available) {
        return Decision::Rejected(RejectReason::ExceedsAvailable);
    }

    let mut trial = state.clone();
    trial.grant(pid, amounts);

    let report = trial.is_safe();
    if !report.safe {
        warn!(tick = state.tick, pid, ?amounts, "Request would leave system unsafe");
        return Decision::Rejected(RejectReason::Unsafe);
    }

    *state = trial;
    let completed = vector::is_zero(&state.need[pid]);
    if completed {
        state.release(pid);
        debug!(pid, available = ?state.available, "Process completed, resources released");
    }

    Decision::Granted {
        safe_sequence: report.sequence,
        completed,
    }
}
