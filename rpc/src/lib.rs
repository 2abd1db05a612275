//! HTTP API for the verification core.
//!
//! Endpoints:
//! - `POST /v1/verify` — run one traveler verification
//! - `GET /v1/trust/:identity_hash` — cached-only trust lookup
//! - `POST /v1/invalidate` — administrative trust removal
//! - `GET /v1/telemetry` — operator counters
//! - `GET /health` — liveness
//! - `GET /metrics` — Prometheus text exposition

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod server;

pub use error::RpcError;
pub use metrics::VerificationMetrics;
pub use server::{RpcServer, RpcState};
