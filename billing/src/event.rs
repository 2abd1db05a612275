//! The billable event record.

use serde::{Deserialize, Serialize};
use veriport_types::{BillingEventId, CarrierId, CheckpointType, Timestamp, VerificationId};

/// One monetizable verification. Successful calls produce exactly one,
/// cached or live alike; not-found and error outcomes produce none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingEvent {
    pub event_id: BillingEventId,
    pub carrier_id: CarrierId,
    pub verification_id: VerificationId,
    pub checkpoint: CheckpointType,
    /// Always one unit per verification call.
    pub amount: u32,
    pub created_at: Timestamp,
}

impl BillingEvent {
    pub fn new(
        carrier_id: CarrierId,
        verification_id: VerificationId,
        checkpoint: CheckpointType,
        created_at: Timestamp,
    ) -> Self {
        Self {
            event_id: BillingEventId::generate(),
            carrier_id,
            verification_id,
            checkpoint,
            amount: 1,
            created_at,
        }
    }
}
