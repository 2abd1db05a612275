//! The idempotent billing ledger.

use crate::{BillingEvent, BillingSink};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use veriport_types::{CarrierId, CheckpointType, Timestamp, VerificationId};

#[derive(Debug, Error)]
pub enum BillingError {
    /// The verification id was already billed. Non-fatal to the verification
    /// result; callers log it for reconciliation.
    #[error("duplicate billing event for verification {0}")]
    DuplicateEvent(VerificationId),

    /// The ledger lock was poisoned by a panicking writer.
    #[error("billing ledger lock poisoned")]
    Poisoned,
}

/// Append-only billing ledger keyed by verification id.
///
/// One mutex guards the map, so concurrent duplicate attempts race to
/// exactly one insert; the losers get `DuplicateEvent`.
pub struct BillingEngine {
    events: Mutex<HashMap<VerificationId, BillingEvent>>,
    sink: Arc<dyn BillingSink>,
}

impl BillingEngine {
    pub fn new(sink: Arc<dyn BillingSink>) -> Self {
        Self {
            events: Mutex::new(HashMap::new()),
            sink,
        }
    }

    /// Record one billable unit for this verification call.
    ///
    /// Exactly one event per verification id, ever. The accepted event is
    /// emitted to the sink after the ledger lock is released.
    pub fn charge(
        &self,
        carrier: CarrierId,
        verification_id: VerificationId,
        checkpoint: CheckpointType,
        now: Timestamp,
    ) -> Result<BillingEvent, BillingError> {
        let mut events = self.events.lock().map_err(|_| BillingError::Poisoned)?;
        let event = match events.entry(verification_id.clone()) {
            Entry::Occupied(_) => return Err(BillingError::DuplicateEvent(verification_id)),
            Entry::Vacant(slot) => {
                let event = BillingEvent::new(carrier, verification_id, checkpoint, now);
                slot.insert(event.clone());
                event
            }
        };
        drop(events);

        self.sink.emit(&event);
        Ok(event)
    }

    /// Look up the event previously recorded for a verification id.
    pub fn event_for(
        &self,
        verification_id: &VerificationId,
    ) -> Result<Option<BillingEvent>, BillingError> {
        let events = self.events.lock().map_err(|_| BillingError::Poisoned)?;
        Ok(events.get(verification_id).cloned())
    }

    /// Total events recorded since start.
    pub fn event_count(&self) -> Result<usize, BillingError> {
        let events = self.events.lock().map_err(|_| BillingError::Poisoned)?;
        Ok(events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test sink capturing every emission.
    struct RecordingSink {
        emitted: Mutex<Vec<BillingEvent>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                emitted: Mutex::new(Vec::new()),
            })
        }

        fn emitted(&self) -> Vec<BillingEvent> {
            self.emitted.lock().unwrap().clone()
        }
    }

    impl BillingSink for RecordingSink {
        fn emit(&self, event: &BillingEvent) {
            self.emitted.lock().unwrap().push(event.clone());
        }
    }

    fn test_engine() -> (BillingEngine, Arc<RecordingSink>) {
        let sink = RecordingSink::new();
        (BillingEngine::new(sink.clone()), sink)
    }

    #[test]
    fn test_charge_records_one_unit() {
        let (engine, sink) = test_engine();
        let event = engine
            .charge(
                CarrierId::from("airline-a"),
                VerificationId::new("v-1"),
                CheckpointType::from("security"),
                Timestamp::new(1_000),
            )
            .unwrap();

        assert_eq!(event.amount, 1);
        assert_eq!(event.carrier_id, CarrierId::from("airline-a"));
        assert_eq!(event.created_at, Timestamp::new(1_000));
        assert_eq!(engine.event_count().unwrap(), 1);
        assert_eq!(sink.emitted(), vec![event]);
    }

    #[test]
    fn test_duplicate_verification_id_is_rejected() {
        let (engine, sink) = test_engine();
        let first = engine
            .charge(
                CarrierId::from("airline-a"),
                VerificationId::new("v-1"),
                CheckpointType::from("security"),
                Timestamp::new(1_000),
            )
            .unwrap();

        let err = engine
            .charge(
                CarrierId::from("airline-b"),
                VerificationId::new("v-1"),
                CheckpointType::from("boarding"),
                Timestamp::new(2_000),
            )
            .unwrap_err();

        assert!(matches!(err, BillingError::DuplicateEvent(id) if id.as_str() == "v-1"));
        // The original event is untouched and retrievable for reconciliation.
        assert_eq!(
            engine.event_for(&VerificationId::new("v-1")).unwrap(),
            Some(first.clone())
        );
        assert_eq!(sink.emitted(), vec![first]);
    }

    #[test]
    fn test_concurrent_retries_bill_exactly_once() {
        let sink = RecordingSink::new();
        let engine = Arc::new(BillingEngine::new(sink.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(std::thread::spawn(move || {
                engine.charge(
                    CarrierId::from("airline-a"),
                    VerificationId::new("shared-retry"),
                    CheckpointType::from("security"),
                    Timestamp::new(1_000),
                )
            }));
        }

        let mut accepted = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => accepted += 1,
                Err(BillingError::DuplicateEvent(_)) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(engine.event_count().unwrap(), 1);
        assert_eq!(sink.emitted().len(), 1);
    }

    #[test]
    fn test_distinct_verifications_bill_independently() {
        let (engine, _sink) = test_engine();
        for n in 0..5 {
            engine
                .charge(
                    CarrierId::from("airline-a"),
                    VerificationId::new(format!("v-{n}")),
                    CheckpointType::from("security"),
                    Timestamp::new(1_000),
                )
                .unwrap();
        }
        assert_eq!(engine.event_count().unwrap(), 5);
    }

    #[test]
    fn test_event_for_unknown_id_is_none() {
        let (engine, _sink) = test_engine();
        assert_eq!(
            engine.event_for(&VerificationId::new("missing")).unwrap(),
            None
        );
    }
}
