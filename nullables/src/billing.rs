//! Nullable billing sink — record events without forwarding them.

use std::sync::Mutex;
use veriport_billing::{BillingEvent, BillingSink};

/// A billing sink that records every accepted event for assertions.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullBillingSink {
    emitted: Mutex<Vec<BillingEvent>>,
}

impl NullBillingSink {
    pub fn new() -> Self {
        Self {
            emitted: Mutex::new(Vec::new()),
        }
    }

    /// All events emitted so far (for assertions).
    pub fn emitted(&self) -> Vec<BillingEvent> {
        self.emitted.lock().unwrap().clone()
    }

    /// Number of events emitted so far.
    pub fn emitted_count(&self) -> usize {
        self.emitted.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn reset(&self) {
        self.emitted.lock().unwrap().clear();
    }
}

impl Default for NullBillingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingSink for NullBillingSink {
    fn emit(&self, event: &BillingEvent) {
        self.emitted.lock().unwrap().push(event.clone());
    }
}
