//! The verification state machine.
//!
//! `START → CACHE_LOOKUP`, then:
//! - **Cache hit**: `UPDATE_CACHE → BILL → RESPOND`. The lookup and the
//!   checkpoint update are one atomic store operation, so two gates racing on
//!   the same identity both land.
//! - **Cache miss**: `VERIFY_EXISTENCE`, then not-exists → `RESPOND_NOT_FOUND`
//!   (no cache write, no billing), exists → `SCORE → CACHE_WRITE → BILL →
//!   RESPOND`.
//! - **Registry or proof error**: `RESPOND_ERROR` with `success=false`; no
//!   cache write, no billing.
//!
//! An unreachable cache never rejects a request: the orchestrator degrades to
//! always-live verification until the backend returns.

use std::sync::Arc;
use std::time::Instant;

use veriport_billing::{BillingEngine, BillingError};
use veriport_cache::{TrustEntry, TrustStore};
use veriport_registry::RegistryClient;
use veriport_scoring::score;
use veriport_types::{
    BillingEventId, CarrierId, IdentityHash, RegistryId, Timestamp, VerificationId,
    SOFT_LATENCY_BUDGET_MS,
};

use crate::outcome::VerificationRecord;
use crate::{CarrierRouting, ServiceError, VerifyOutcome, VerifyRequest};

/// The orchestrator ties together the registry client, the trust cache, the
/// scorer and the billing ledger. All collaborators are constructed at
/// service start and shared behind `Arc`.
pub struct VerificationService {
    registry: Arc<RegistryClient>,
    cache: Arc<dyn TrustStore>,
    billing: Arc<BillingEngine>,
    routing: CarrierRouting,
}

impl VerificationService {
    pub fn new(
        registry: Arc<RegistryClient>,
        cache: Arc<dyn TrustStore>,
        billing: Arc<BillingEngine>,
        routing: CarrierRouting,
    ) -> Self {
        Self {
            registry,
            cache,
            billing,
            routing,
        }
    }

    /// One full verification cycle, cache-first.
    ///
    /// Never returns an error: routing, registry and proof failures are
    /// reported inside the envelope so a checkpoint always has an answer to
    /// act on.
    pub async fn verify_traveler(&self, request: VerifyRequest) -> VerifyOutcome {
        let started = Instant::now();
        let verification_id = request.verification_id();
        let registry_id = self.routing.route(&request.carrier_id).cloned();

        match self.cache.record_checkpoint(
            &request.identity_hash,
            request.checkpoint.clone(),
            request.carrier_id.clone(),
            Timestamp::now(),
        ) {
            Ok(Some(entry)) => {
                let billing_event_id =
                    charge_once(&self.billing, &request, &verification_id, Timestamp::now());
                let outcome = VerifyOutcome::cache_hit(
                    entry.trust_score,
                    entry.trust_level,
                    entry.expires_at,
                    verification_id,
                    billing_event_id,
                );
                return self.finish(&request, registry_id.as_ref(), outcome, started);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "trust cache unavailable, serving live verification");
            }
        }

        let Some(registry_id) = registry_id else {
            let outcome = VerifyOutcome::failure(
                verification_id,
                format!("no registry route for carrier {}", request.carrier_id),
            );
            return self.finish(&request, None, outcome, started);
        };

        // The live leg runs in its own task: once the registry has confirmed
        // existence, the cache write and the billing event complete even if
        // this caller has disconnected. Future callers get the entry.
        let live = tokio::spawn(live_verification(
            Arc::clone(&self.registry),
            Arc::clone(&self.cache),
            Arc::clone(&self.billing),
            registry_id.clone(),
            request.clone(),
            verification_id.clone(),
        ));
        let outcome = match live.await {
            Ok(outcome) => outcome,
            Err(e) => {
                VerifyOutcome::failure(verification_id, format!("verification task failed: {e}"))
            }
        };
        self.finish(&request, Some(&registry_id), outcome, started)
    }

    /// Cached-only lookup. Never performs a live verification, never bills.
    pub fn trust_status(
        &self,
        identity: &IdentityHash,
        carrier: &CarrierId,
        now: Timestamp,
    ) -> Result<Option<TrustEntry>, ServiceError> {
        let entry = self.cache.get(identity, now)?;
        tracing::debug!(
            identity = ?identity,
            carrier = %carrier,
            found = entry.is_some(),
            "trust status lookup"
        );
        Ok(entry)
    }

    /// Administrative cache removal (e.g. a revoked identity). Returns
    /// whether an entry was present.
    pub fn invalidate(&self, identity: &IdentityHash, reason: &str) -> Result<bool, ServiceError> {
        let removed = self.cache.remove(identity)?;
        tracing::info!(identity = ?identity, reason, removed, "trust entry invalidated");
        Ok(removed)
    }

    /// Evict expired entries. Correctness never depends on this running;
    /// expiry is enforced on every read.
    pub fn purge_expired(&self, now: Timestamp) -> Result<usize, ServiceError> {
        Ok(self.cache.purge_expired(now)?)
    }

    /// Identities physically present in the cache, expired-but-unpurged
    /// included.
    pub fn cached_identities(&self) -> Result<usize, ServiceError> {
        Ok(self.cache.len()?)
    }

    /// Billing events recorded since service start.
    pub fn billing_events(&self) -> Result<usize, ServiceError> {
        Ok(self.billing.event_count()?)
    }

    /// Name of the proof verification scheme in force.
    pub fn proof_scheme(&self) -> &str {
        self.registry.verifier_name()
    }

    fn finish(
        &self,
        request: &VerifyRequest,
        registry_id: Option<&RegistryId>,
        mut outcome: VerifyOutcome,
        started: Instant,
    ) -> VerifyOutcome {
        outcome.response_time_ms = started.elapsed().as_millis() as u64;
        if outcome.response_time_ms > SOFT_LATENCY_BUDGET_MS {
            tracing::warn!(
                elapsed_ms = outcome.response_time_ms,
                budget_ms = SOFT_LATENCY_BUDGET_MS,
                verification = %outcome.verification_id,
                "verification exceeded the soft latency budget"
            );
        }
        let record = VerificationRecord::from_parts(request, registry_id, &outcome);
        tracing::info!(
            verification = %record.verification_id,
            identity = ?record.identity_hash,
            carrier = %record.carrier_id,
            checkpoint = %record.checkpoint,
            registry = record.registry_id.as_ref().map(|r| r.as_str()),
            cached = record.cached,
            success = outcome.success,
            proof_valid = record.proof_valid,
            elapsed_ms = record.response_time_ms,
            "verification completed"
        );
        outcome
    }
}

/// The cache-miss leg: existence check, scoring, cache write, billing.
async fn live_verification(
    registry: Arc<RegistryClient>,
    cache: Arc<dyn TrustStore>,
    billing: Arc<BillingEngine>,
    registry_id: RegistryId,
    request: VerifyRequest,
    verification_id: VerificationId,
) -> VerifyOutcome {
    let check = match registry
        .verify_hash_exists(&request.identity_hash, &registry_id)
        .await
    {
        Ok(check) => check,
        Err(e) => {
            return VerifyOutcome::failure(verification_id, format!("verification failed: {e}"))
        }
    };

    if !check.exists {
        return VerifyOutcome::not_found(verification_id, &registry_id);
    }

    let (trust_score, trust_level) = score(&check.indicators);
    let verified_at = Timestamp::now();
    let entry = TrustEntry::new(
        request.identity_hash,
        trust_score,
        trust_level,
        verification_id.clone(),
        request.checkpoint.clone(),
        request.carrier_id.clone(),
        verified_at,
    );
    let expires_at = entry.expires_at;
    if let Err(e) = cache.insert(entry) {
        tracing::warn!(error = %e, "trust entry not cached, serving the result anyway");
    }

    let billing_event_id = charge_once(&billing, &request, &verification_id, verified_at);
    VerifyOutcome::live(
        trust_score,
        trust_level,
        expires_at,
        verification_id,
        billing_event_id,
    )
}

/// Record one billable unit. A duplicate verification id keeps the original
/// event (warn-logged for reconciliation); billing failures never fail the
/// verification.
fn charge_once(
    billing: &BillingEngine,
    request: &VerifyRequest,
    verification_id: &VerificationId,
    now: Timestamp,
) -> Option<BillingEventId> {
    match billing.charge(
        request.carrier_id.clone(),
        verification_id.clone(),
        request.checkpoint.clone(),
        now,
    ) {
        Ok(event) => Some(event.event_id),
        Err(BillingError::DuplicateEvent(id)) => {
            tracing::warn!(
                verification = %id,
                "duplicate billing attempt, reusing the original event"
            );
            match billing.event_for(&id) {
                Ok(Some(original)) => Some(original.event_id),
                Ok(None) | Err(_) => None,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, verification = %verification_id, "billing charge failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriport_nullables::NullBillingSink;
    use veriport_types::CheckpointType;

    fn test_request() -> VerifyRequest {
        VerifyRequest::new(
            IdentityHash::new([9u8; 32]),
            CarrierId::from("airline-a"),
            CheckpointType::from("security"),
        )
    }

    #[test]
    fn test_duplicate_charge_reuses_the_original_event() {
        let sink = Arc::new(NullBillingSink::new());
        let billing = BillingEngine::new(sink.clone());
        let request = test_request();
        let id = VerificationId::new("shared-retry");

        let first = charge_once(&billing, &request, &id, Timestamp::new(1_000));
        let second = charge_once(&billing, &request, &id, Timestamp::new(1_001));

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(sink.emitted_count(), 1);
    }

    #[test]
    fn test_distinct_verifications_charge_separately() {
        let sink = Arc::new(NullBillingSink::new());
        let billing = BillingEngine::new(sink.clone());
        let request = test_request();

        let first = charge_once(&billing, &request, &VerificationId::new("v-1"), Timestamp::new(1));
        let second = charge_once(&billing, &request, &VerificationId::new("v-2"), Timestamp::new(2));

        assert!(first.is_some());
        assert!(second.is_some());
        assert_ne!(first, second);
        assert_eq!(sink.emitted_count(), 2);
    }
}
