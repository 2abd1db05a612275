//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (clock, billing emission, proof verification,
//! trust storage) are abstracted behind traits or explicit `now` parameters.
//! This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod billing;
pub mod clock;
pub mod proof;
pub mod store;

pub use billing::NullBillingSink;
pub use clock::NullClock;
pub use proof::StaticProofVerifier;
pub use store::FailingTrustStore;
