//! HTTP request handlers and wire DTOs.

use axum::extract::{Path, Query, State};
use axum::Json;
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use veriport_cache::TrustEntry;
use veriport_service::{VerifyOutcome, VerifyRequest};
use veriport_types::{CarrierId, IdentityHash, Timestamp, TrustLevel};

use crate::error::RpcError;
use crate::server::RpcState;

// ── Verification ─────────────────────────────────────────────────────────

pub async fn verify_traveler(
    State(state): State<Arc<RpcState>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyOutcome>, RpcError> {
    if !request.carrier_id.is_valid() {
        return Err(RpcError::InvalidRequest(format!(
            "malformed carrier id: {}",
            request.carrier_id
        )));
    }
    if !request.checkpoint.is_valid() {
        return Err(RpcError::InvalidRequest(format!(
            "malformed checkpoint type: {}",
            request.checkpoint
        )));
    }

    let outcome = state.service.verify_traveler(request).await;
    state.metrics.observe_verification(&outcome);
    Ok(Json(outcome))
}

// ── Trust status ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TrustStatusQuery {
    pub carrier_id: String,
}

#[derive(Serialize)]
pub struct TrustStatusResponse {
    pub identity_hash: IdentityHash,
    pub trust_score: u8,
    pub trust_level: TrustLevel,
    pub verified_at: u64,
    pub expires_at: u64,
    pub verification_count: u64,
    pub checkpoints: Vec<String>,
    pub carrier_ids: Vec<String>,
}

impl TrustStatusResponse {
    fn from_entry(entry: TrustEntry) -> Self {
        Self {
            identity_hash: entry.identity_hash,
            trust_score: entry.trust_score,
            trust_level: entry.trust_level,
            verified_at: entry.verified_at.as_secs(),
            expires_at: entry.expires_at.as_secs(),
            verification_count: entry.verification_count,
            checkpoints: entry
                .checkpoints
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            carrier_ids: entry
                .carrier_ids
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
        }
    }
}

pub async fn trust_status(
    State(state): State<Arc<RpcState>>,
    Path(identity): Path<String>,
    Query(query): Query<TrustStatusQuery>,
) -> Result<Json<TrustStatusResponse>, RpcError> {
    let identity = IdentityHash::from_str(&identity)
        .map_err(|e| RpcError::InvalidRequest(format!("malformed identity hash: {e}")))?;
    let carrier = CarrierId::from(query.carrier_id);

    let entry = state
        .service
        .trust_status(&identity, &carrier, Timestamp::now())?
        .ok_or_else(|| RpcError::TrustNotFound(format!("{identity:?}")))?;
    Ok(Json(TrustStatusResponse::from_entry(entry)))
}

// ── Invalidation ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct InvalidateRequest {
    pub identity_hash: IdentityHash,
    pub reason: String,
}

#[derive(Serialize)]
pub struct InvalidateResponse {
    pub removed: bool,
}

pub async fn invalidate_trust(
    State(state): State<Arc<RpcState>>,
    Json(request): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>, RpcError> {
    let removed = state
        .service
        .invalidate(&request.identity_hash, &request.reason)?;
    Ok(Json(InvalidateResponse { removed }))
}

// ── Telemetry ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TelemetryResponse {
    pub uptime_secs: u64,
    pub cached_identities: u64,
    pub billing_events: u64,
    pub proof_scheme: String,
}

pub async fn telemetry(
    State(state): State<Arc<RpcState>>,
) -> Result<Json<TelemetryResponse>, RpcError> {
    Ok(Json(TelemetryResponse {
        uptime_secs: state.started_at.elapsed().as_secs(),
        cached_identities: state.service.cached_identities()? as u64,
        billing_events: state.service.billing_events()? as u64,
        proof_scheme: state.service.proof_scheme().to_string(),
    }))
}

// ── Probes ───────────────────────────────────────────────────────────────

pub async fn health() -> &'static str {
    "ok"
}

pub async fn metrics(State(state): State<Arc<RpcState>>) -> Result<String, RpcError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&state.metrics.registry.gather(), &mut buffer)
        .map_err(|e| RpcError::Internal(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| RpcError::Internal(e.to_string()))
}
