//! The cached trust entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use veriport_types::{
    CarrierId, CheckpointType, IdentityHash, Timestamp, TrustLevel, VerificationId,
    TRUST_TTL_SECS,
};

/// One identity's cached trust result.
///
/// `expires_at` is fixed at creation (`verified_at` + 24h) and never moves.
/// `verification_count` only grows; `checkpoints` and `carrier_ids` are
/// append-only deduplicated sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustEntry {
    pub identity_hash: IdentityHash,
    pub trust_score: u8,
    pub trust_level: TrustLevel,
    /// The verification call that performed the live registry round-trip.
    pub verification_id: VerificationId,
    pub verified_at: Timestamp,
    pub expires_at: Timestamp,
    pub verification_count: u64,
    pub checkpoints: BTreeSet<CheckpointType>,
    pub carrier_ids: BTreeSet<CarrierId>,
}

impl TrustEntry {
    /// Build the entry for a just-completed live verification.
    pub fn new(
        identity_hash: IdentityHash,
        trust_score: u8,
        trust_level: TrustLevel,
        verification_id: VerificationId,
        checkpoint: CheckpointType,
        carrier: CarrierId,
        verified_at: Timestamp,
    ) -> Self {
        let mut checkpoints = BTreeSet::new();
        checkpoints.insert(checkpoint);
        let mut carrier_ids = BTreeSet::new();
        carrier_ids.insert(carrier);
        Self {
            identity_hash,
            trust_score,
            trust_level,
            verification_id,
            verified_at,
            expires_at: verified_at.add_secs(TRUST_TTL_SECS),
            verification_count: 1,
            checkpoints,
            carrier_ids,
        }
    }

    /// Whether the trust window has passed at `now`. An entry is still valid
    /// at exactly `expires_at`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Register one more checkpoint crossing within the validity window.
    ///
    /// Appends to the deduplicated sets and increments the count. Does not
    /// touch `expires_at`.
    pub fn record(&mut self, checkpoint: CheckpointType, carrier: CarrierId) {
        self.checkpoints.insert(checkpoint);
        self.carrier_ids.insert(carrier);
        self.verification_count += 1;
    }

    /// Seconds of validity left at `now` (zero once expired).
    pub fn remaining_secs(&self, now: Timestamp) -> u64 {
        self.expires_at.as_secs().saturating_sub(now.as_secs())
    }
}
