//! HTTP client for the registry existence-proof protocol.

use crate::{ChallengeTracker, ExistenceProof, ProofVerifier, RegistryDirectory, RegistryError};
use crate::proof::BindingVerifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use veriport_crypto::{generate_challenge, Challenge};
use veriport_types::{IdentityHash, RegistryId, TrustIndicators};

/// Default per-request timeout against a registry.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default bound on challenges awaiting a response.
const DEFAULT_TRACKER_CAPACITY: usize = 4096;

/// Request body of `POST <registry>/v1/existence/verify`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExistenceRequest {
    pub challenge: Challenge,
    pub identity_hash: IdentityHash,
}

/// Response body of the existence check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExistenceResponse {
    pub exists: bool,
    pub proof: ExistenceProof,
    pub trust_indicators: TrustIndicators,
}

/// Outcome of one verified existence check.
#[derive(Clone, Debug)]
pub struct ExistenceCheck {
    pub registry_id: RegistryId,
    pub exists: bool,
    pub proof: ExistenceProof,
    pub indicators: TrustIndicators,
    pub response_time_ms: u64,
}

/// Client for the existence-proof handshake with federated registries.
///
/// Owns the registry directory, a reusable HTTP client, the pluggable proof
/// verifier and the issued-challenge tracker. All state is constructed with
/// the client at service start.
pub struct RegistryClient {
    directory: RegistryDirectory,
    client: reqwest::Client,
    verifier: Arc<dyn ProofVerifier>,
    tracker: Mutex<ChallengeTracker>,
    timeout: Duration,
}

impl RegistryClient {
    /// Create a client over a directory, with the reference binding verifier.
    pub fn new(directory: RegistryDirectory) -> Self {
        Self {
            directory,
            client: reqwest::Client::new(),
            verifier: Arc::new(BindingVerifier),
            tracker: Mutex::new(ChallengeTracker::new(DEFAULT_TRACKER_CAPACITY)),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Substitute the proof verifier (e.g. a production proof system).
    pub fn with_verifier(mut self, verifier: Arc<dyn ProofVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn verifier_name(&self) -> &str {
        self.verifier.name()
    }

    /// Run the full existence-proof handshake against one registry:
    /// fresh challenge → `{challenge, identity_hash}` → registry answer →
    /// consume-once challenge accounting → proof verification.
    pub async fn verify_hash_exists(
        &self,
        identity: &IdentityHash,
        registry_id: &RegistryId,
    ) -> Result<ExistenceCheck, RegistryError> {
        let base_url = self.directory.resolve(registry_id)?;
        let url = format!("{base_url}/v1/existence/verify");

        let challenge =
            generate_challenge().map_err(|e| RegistryError::Entropy(e.to_string()))?;
        self.tracker.lock().await.issue(challenge.clone());

        let request = ExistenceRequest {
            challenge: challenge.clone(),
            identity_hash: *identity,
        };

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Transport(format!(
                "HTTP {} from registry {}",
                response.status(),
                registry_id
            )));
        }

        let body: ExistenceResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;
        let response_time_ms = started.elapsed().as_millis() as u64;

        if !self.tracker.lock().await.consume(&challenge) {
            return Err(RegistryError::ChallengeReplay);
        }

        let valid = self
            .verifier
            .verify(&body.proof, &challenge, identity, body.exists)?;
        if !valid {
            return Err(RegistryError::ProofVerification(format!(
                "registry {} returned a proof that does not bind this exchange",
                registry_id
            )));
        }

        tracing::debug!(
            registry = %registry_id,
            exists = body.exists,
            elapsed_ms = response_time_ms,
            "existence check complete"
        );

        Ok(ExistenceCheck {
            registry_id: registry_id.clone(),
            exists: body.exists,
            proof: body.proof,
            indicators: body.trust_indicators,
            response_time_ms,
        })
    }
}
