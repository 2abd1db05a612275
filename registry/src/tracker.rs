//! Issued-challenge tracker — consume-once accounting for outstanding
//! challenges.
//!
//! A proof is only accepted for a challenge this client actually issued, and
//! each challenge is consumed exactly once. The tracker is a bounded FIFO
//! set: when full, the oldest outstanding challenge is evicted, which also
//! caps memory under churn. It is owned by the client and built at service
//! start, never module-global.

use std::collections::{HashSet, VecDeque};
use veriport_crypto::Challenge;

pub struct ChallengeTracker {
    set: HashSet<Challenge>,
    order: VecDeque<Challenge>,
    capacity: usize,
}

impl ChallengeTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a freshly issued challenge, evicting the oldest entry if at
    /// capacity. Consumed challenges linger in the queue until they age out;
    /// popping them here is how their slots are reclaimed.
    pub fn issue(&mut self, challenge: Challenge) {
        if self.capacity == 0 {
            return;
        }
        if self.set.contains(&challenge) {
            return;
        }
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.set.remove(&oldest);
                }
                None => break,
            }
        }
        self.set.insert(challenge.clone());
        self.order.push_back(challenge);
    }

    /// Consume an outstanding challenge. Returns `false` if it was never
    /// issued, already consumed, or evicted.
    pub fn consume(&mut self, challenge: &Challenge) -> bool {
        self.set.remove(challenge)
    }

    /// Number of challenges still awaiting their response.
    pub fn outstanding(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
