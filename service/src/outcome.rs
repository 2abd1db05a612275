//! Outcome envelope and audit record for one verification call.

use serde::{Deserialize, Serialize};
use veriport_types::{
    BillingEventId, CarrierId, CheckpointType, IdentityHash, RegistryId, Timestamp, TrustLevel,
    VerificationId,
};

use crate::VerifyRequest;

/// What a checkpoint gets back for every call.
///
/// Verification failures ride in this envelope with `success=false` and a
/// human-readable message; the orchestrator never surfaces them as errors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyOutcome {
    pub success: bool,
    pub trust_score: u8,
    pub trust_level: TrustLevel,
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_expires_at: Option<Timestamp>,
    pub verification_id: VerificationId,
    pub response_time_ms: u64,
    pub proof_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_event_id: Option<BillingEventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyOutcome {
    /// Served from an unexpired cache entry. `proof_valid` is inherited from
    /// the live verification that created the entry.
    pub fn cache_hit(
        trust_score: u8,
        trust_level: TrustLevel,
        expires_at: Timestamp,
        verification_id: VerificationId,
        billing_event_id: Option<BillingEventId>,
    ) -> Self {
        Self {
            success: true,
            trust_score,
            trust_level,
            cached: true,
            cache_expires_at: Some(expires_at),
            verification_id,
            response_time_ms: 0,
            proof_valid: true,
            billing_event_id,
            message: None,
        }
    }

    /// A live verification confirmed the identity and cached the result.
    pub fn live(
        trust_score: u8,
        trust_level: TrustLevel,
        expires_at: Timestamp,
        verification_id: VerificationId,
        billing_event_id: Option<BillingEventId>,
    ) -> Self {
        Self {
            success: true,
            trust_score,
            trust_level,
            cached: false,
            cache_expires_at: Some(expires_at),
            verification_id,
            response_time_ms: 0,
            proof_valid: true,
            billing_event_id,
            message: None,
        }
    }

    /// The registry confirmed absence: a valid negative, not an error. The
    /// proof checked out; nothing is cached and nothing is billed.
    pub fn not_found(verification_id: VerificationId, registry: &RegistryId) -> Self {
        Self {
            success: false,
            trust_score: 0,
            trust_level: TrustLevel::VeryLow,
            cached: false,
            cache_expires_at: None,
            verification_id,
            response_time_ms: 0,
            proof_valid: true,
            billing_event_id: None,
            message: Some(format!("identity not found in registry {registry}")),
        }
    }

    /// The verification could not be completed: routing, transport or proof
    /// failure. Nothing is cached and nothing is billed.
    pub fn failure(verification_id: VerificationId, message: impl Into<String>) -> Self {
        Self {
            success: false,
            trust_score: 0,
            trust_level: TrustLevel::VeryLow,
            cached: false,
            cache_expires_at: None,
            verification_id,
            response_time_ms: 0,
            proof_valid: false,
            billing_event_id: None,
            message: Some(message.into()),
        }
    }
}

/// The audit trail of one verification call, written to the structured log.
#[derive(Clone, Debug, Serialize)]
pub struct VerificationRecord {
    pub verification_id: VerificationId,
    pub identity_hash: IdentityHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<RegistryId>,
    pub carrier_id: CarrierId,
    pub checkpoint: CheckpointType,
    pub cached: bool,
    pub response_time_ms: u64,
    pub proof_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_event_id: Option<BillingEventId>,
}

impl VerificationRecord {
    pub fn from_parts(
        request: &VerifyRequest,
        registry_id: Option<&RegistryId>,
        outcome: &VerifyOutcome,
    ) -> Self {
        Self {
            verification_id: outcome.verification_id.clone(),
            identity_hash: request.identity_hash,
            registry_id: registry_id.cloned(),
            carrier_id: request.carrier_id.clone(),
            checkpoint: request.checkpoint.clone(),
            cached: outcome.cached,
            response_time_ms: outcome.response_time_ms,
            proof_valid: outcome.proof_valid,
            billing_event_id: outcome.billing_event_id,
        }
    }
}
