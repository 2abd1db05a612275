//! Nullable clock — deterministic time for testing.

use std::cell::Cell;
use veriport_types::Timestamp;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to. Validity-window tests drive the
/// same clock through cache reads and status lookups, so window boundaries
/// are exact rather than wall-clock dependent.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn starting_at(secs: u64) -> Self {
        Self {
            current: Cell::new(Timestamp::new(secs)),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current
            .set(Timestamp::new(self.current.get().as_secs() + secs));
    }

    /// Rewind time by a number of seconds, saturating at zero.
    pub fn rewind(&self, secs: u64) {
        self.current.set(Timestamp::new(
            self.current.get().as_secs().saturating_sub(secs),
        ));
    }
}
