//! Existence-proof client for federated identity registries.
//!
//! A registry answers exactly one question, "does this identity hash
//! exist?", plus bucketed trust indicators and a proof binding
//! `{challenge, identity, exists}`. Nothing about the underlying record
//! crosses the wire, so no component downstream of this client ever sees
//! PII, only the hash and the buckets.

pub mod client;
pub mod directory;
pub mod error;
pub mod proof;
pub mod tracker;

pub use client::{ExistenceCheck, ExistenceRequest, ExistenceResponse, RegistryClient};
pub use directory::RegistryDirectory;
pub use error::RegistryError;
pub use proof::{BindingVerifier, ExistenceProof, ProofVerifier};
pub use tracker::ChallengeTracker;
