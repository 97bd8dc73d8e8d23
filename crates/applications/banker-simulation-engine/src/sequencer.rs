//! Decomposition of outstanding need into a shuffled request timeline
//!
//! Each process's need is split into partial claims whose components are drawn
//! from `[1, remaining]` (or `0` when that class is already satisfied), until
//! the remaining need is the zero vector. The per-process claims therefore sum
//! exactly to the process's need. The whole queue is then shuffled so arrivals
//! interleave across processes, and idle padding is appended.

use banker_core::{vector, Matrix, Request, RequestQueue};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::DEFAULT_PADDING;

/// Builds request queues from a need matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSequencer {
    padding: usize,
}

impl Default for RequestSequencer {
    fn default() -> Self {
        RequestSequencer {
            padding: DEFAULT_PADDING,
        }
    }
}

impl RequestSequencer {
    pub fn new(padding: usize) -> Self {
        RequestSequencer { padding }
    }

    /// Decompose `need`, shuffle, and append idle padding
    pub fn build<R: Rng + ?Sized>(&self, need: &Matrix, rng: &mut R) -> RequestQueue {
        let resources = need.first().map_or(0, Vec::len);
        let mut requests = Vec::new();

        for (pid, row) in need.iter().enumerate() {
            let mut remaining = row.clone();
            while !vector::is_zero(&remaining) {
                let claim = Self::draw_partial_claim(&remaining, rng);
                vector::sub_assign(&mut remaining, &claim);
                requests.push(Request::new(pid, claim));
            }
        }

        requests.shuffle(rng);
        debug!(
            requests = requests.len(),
            padding = self.padding,
            "Built request queue"
        );

        requests.extend((0..self.padding).map(|_| Request::idle(resources)));
        RequestQueue::new(requests)
    }

    fn draw_partial_claim<R: Rng + ?Sized>(remaining: &[u32], rng: &mut R) -> Vec<u32> {
        remaining
            .iter()
            .map(|&left| if left > 0 { rng.gen_range(1..=left) } else { 0 })
            .collect()
    }
}

/// Build a request queue for `need` with `padding` idle entries
pub fn build_request_queue<R: Rng + ?Sized>(
    need: &Matrix,
    padding: usize,
    rng: &mut R,
) -> RequestQueue {
    RequestSequencer::new(padding).build(need, rng)
}
