//! Fundamental types for the VeriPort verification core.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identity hashes, opaque collaborator identifiers, timestamps,
//! bucketed trust indicators, trust levels, and operating parameters.

pub mod error;
pub mod hash;
pub mod ids;
pub mod indicators;
pub mod params;
pub mod time;
pub mod trust;

pub use error::ParseError;
pub use hash::IdentityHash;
pub use ids::{BillingEventId, CarrierId, CheckpointType, RegistryId, VerificationId};
pub use indicators::{CountBucket, RecencyBucket, RiskBucket, TrustIndicators};
pub use params::{SOFT_LATENCY_BUDGET_MS, TRUST_TTL_SECS};
pub use time::Timestamp;
pub use trust::TrustLevel;
