//! Cryptographic primitives for VeriPort.
//!
//! - **Challenges**: fresh per-attempt nonces from the OS secure random source
//! - **Blake2b** for identity digests
//! - **SHA-256** for challenge derivation and proof binding

pub mod challenge;
pub mod hash;

pub use challenge::{generate_challenge, Challenge, ChallengeError};
pub use hash::{blake2b_256, blake2b_256_multi, digest_identity, sha256, sha256_multi};
