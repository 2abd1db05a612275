//! Prometheus metrics for the verification service.
//!
//! Counters, a gauge and a latency histogram covering the verification
//! pipeline. The [`VerificationMetrics`] struct owns a dedicated [`Registry`]
//! that the `/metrics` endpoint encodes into the Prometheus text exposition
//! format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Histogram, HistogramOpts, IntCounter, IntGauge, Opts,
    Registry,
};
use veriport_service::VerifyOutcome;

/// Central collection of all service-level Prometheus metrics.
pub struct VerificationMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    /// Total verification calls, successful or not.
    pub verifications: IntCounter,
    /// Calls served from an unexpired cache entry.
    pub cache_hits: IntCounter,
    /// Calls that completed a live registry round-trip.
    pub live_verifications: IntCounter,
    /// Valid negatives: the registry confirmed absence.
    pub not_found: IntCounter,
    /// Calls that failed on routing, transport or proof verification.
    pub failed_verifications: IntCounter,
    /// Billing events accepted by the ledger.
    pub billing_events: IntCounter,

    /// Identities physically present in the trust cache.
    pub cached_identities: IntGauge,

    /// End-to-end verification latency, in milliseconds.
    pub verification_latency_ms: Histogram,
}

impl VerificationMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let verifications = register_int_counter_with_registry!(
            Opts::new(
                "veriport_verifications_total",
                "Total verification calls handled"
            ),
            registry
        )
        .expect("failed to register verifications counter");

        let cache_hits = register_int_counter_with_registry!(
            Opts::new(
                "veriport_cache_hits_total",
                "Verifications served from the trust cache"
            ),
            registry
        )
        .expect("failed to register cache_hits counter");

        let live_verifications = register_int_counter_with_registry!(
            Opts::new(
                "veriport_live_verifications_total",
                "Verifications that completed a live registry round-trip"
            ),
            registry
        )
        .expect("failed to register live_verifications counter");

        let not_found = register_int_counter_with_registry!(
            Opts::new(
                "veriport_not_found_total",
                "Verifications where the registry confirmed absence"
            ),
            registry
        )
        .expect("failed to register not_found counter");

        let failed_verifications = register_int_counter_with_registry!(
            Opts::new(
                "veriport_failed_verifications_total",
                "Verifications that failed on routing, transport or proof"
            ),
            registry
        )
        .expect("failed to register failed_verifications counter");

        let billing_events = register_int_counter_with_registry!(
            Opts::new(
                "veriport_billing_events_total",
                "Billing events accepted by the ledger"
            ),
            registry
        )
        .expect("failed to register billing_events counter");

        let cached_identities = register_int_gauge_with_registry!(
            Opts::new(
                "veriport_cached_identities",
                "Identities physically present in the trust cache"
            ),
            registry
        )
        .expect("failed to register cached_identities gauge");

        let verification_latency_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "veriport_verification_latency_ms",
                "End-to-end verification latency in milliseconds"
            )
            .buckets(vec![1.0, 5.0, 25.0, 100.0, 250.0, 500.0, 1000.0, 2500.0]),
            registry
        )
        .expect("failed to register verification latency histogram");

        Self {
            registry,
            verifications,
            cache_hits,
            live_verifications,
            not_found,
            failed_verifications,
            billing_events,
            cached_identities,
            verification_latency_ms,
        }
    }

    /// Fold one finished verification into the counters.
    pub fn observe_verification(&self, outcome: &VerifyOutcome) {
        self.verifications.inc();
        if outcome.cached {
            self.cache_hits.inc();
        } else if outcome.success {
            self.live_verifications.inc();
        } else if outcome.proof_valid {
            self.not_found.inc();
        } else {
            self.failed_verifications.inc();
        }
        if outcome.billing_event_id.is_some() {
            self.billing_events.inc();
        }
        self.verification_latency_ms
            .observe(outcome.response_time_ms as f64);
    }
}

impl Default for VerificationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriport_types::{BillingEventId, RegistryId, Timestamp, TrustLevel, VerificationId};

    #[test]
    fn test_outcomes_land_in_the_right_counters() {
        let metrics = VerificationMetrics::new();

        metrics.observe_verification(&VerifyOutcome::cache_hit(
            85,
            TrustLevel::VeryHigh,
            Timestamp::new(90_000),
            VerificationId::new("v-1"),
            Some(BillingEventId::generate()),
        ));
        metrics.observe_verification(&VerifyOutcome::not_found(
            VerificationId::new("v-2"),
            &RegistryId::from("registry-uae"),
        ));
        metrics.observe_verification(&VerifyOutcome::failure(
            VerificationId::new("v-3"),
            "registry unreachable",
        ));

        assert_eq!(metrics.verifications.get(), 3);
        assert_eq!(metrics.cache_hits.get(), 1);
        assert_eq!(metrics.live_verifications.get(), 0);
        assert_eq!(metrics.not_found.get(), 1);
        assert_eq!(metrics.failed_verifications.get(), 1);
        assert_eq!(metrics.billing_events.get(), 1);
    }
}
