//! Downstream settlement sink.

use crate::BillingEvent;

/// Receives accepted billing events for downstream settlement.
///
/// The engine deduplicates before emission, so a sink sees each verification
/// id at most once. Settlement rails themselves are out of scope; a sink
/// forwards, queues or records.
pub trait BillingSink: Send + Sync {
    fn emit(&self, event: &BillingEvent);
}

/// Sink that writes settlement lines to the structured log.
pub struct LogSink;

impl BillingSink for LogSink {
    fn emit(&self, event: &BillingEvent) {
        tracing::info!(
            event_id = %event.event_id,
            carrier = %event.carrier_id,
            verification = %event.verification_id,
            checkpoint = %event.checkpoint,
            amount = event.amount,
            "billing event emitted"
        );
    }
}
