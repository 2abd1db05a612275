//! Verification orchestrator — connects the trust cache, the existence-proof
//! client, the scorer and the billing ledger into one request/response cycle.
//!
//! The cycle per request:
//! 1. **Cache lookup**: a fresh entry short-circuits to an atomic checkpoint
//!    update, one billing event, and a sub-millisecond response.
//! 2. **Live verification**: on a miss, route the carrier to its registry, run
//!    the existence-proof handshake, score the returned indicators, write the
//!    cache, bill.
//! 3. **Respond**: every path returns an outcome envelope. Registry and proof
//!    failures become `success=false` responses, never crashes; an unreachable
//!    cache degrades the service to always-live verification.

pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod request;
pub mod routing;

pub use error::ServiceError;
pub use orchestrator::VerificationService;
pub use outcome::{VerificationRecord, VerifyOutcome};
pub use request::VerifyRequest;
pub use routing::CarrierRouting;
