//! Per-attempt verification challenges.
//!
//! A challenge is a fresh nonce binding one existence-proof exchange: the
//! registry's proof must commit to it, so a captured proof cannot be replayed
//! against a later attempt.

use crate::hash::sha256;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors arising from challenge generation and decoding.
#[derive(Debug, Error)]
pub enum ChallengeError {
    /// The OS secure random source failed. Fatal to the single attempt only.
    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    /// A challenge string that is not 64 hex characters.
    #[error("malformed challenge: {0}")]
    Malformed(String),
}

/// A hex-encoded 256-bit verification nonce.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Challenge(String);

impl Challenge {
    /// Hex characters in a well-formed challenge.
    pub const HEX_LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the 32 raw bytes. Challenges received off the wire are
    /// decoded (and thereby validated) before use.
    pub fn decode(&self) -> Result<[u8; 32], ChallengeError> {
        if self.0.len() != Self::HEX_LEN {
            return Err(ChallengeError::Malformed(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                self.0.len()
            )));
        }
        let raw = hex::decode(&self.0).map_err(|e| ChallengeError::Malformed(e.to_string()))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&raw);
        Ok(bytes)
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a fresh challenge: 256 bits from the OS secure random source,
/// hashed with SHA-256 and hex-encoded.
pub fn generate_challenge() -> Result<Challenge, ChallengeError> {
    let mut seed = [0u8; 32];
    getrandom::getrandom(&mut seed)
        .map_err(|e| ChallengeError::EntropyUnavailable(e.to_string()))?;
    Ok(Challenge(hex::encode(sha256(&seed))))
}
