//! Existence proofs and their verification.
//!
//! The reference verifier here performs a structural binding check only: the
//! proof must be the SHA-256 commitment over `{challenge, identity, exists}`.
//! It proves the response was minted for this exact exchange, not that the
//! registry's answer is cryptographically sound; a production deployment
//! substitutes a real proof system behind [`ProofVerifier`].

use crate::RegistryError;
use serde::{Deserialize, Serialize};
use veriport_crypto::{sha256_multi, Challenge};
use veriport_types::IdentityHash;

/// A hex-encoded proof binding one existence answer to its challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistenceProof(String);

impl ExistenceProof {
    /// Raw length of a well-formed proof.
    pub const BYTE_LEN: usize = 32;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_bytes(bytes: [u8; Self::BYTE_LEN]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Structural validation: hex encoding and exact length.
    pub fn decode(&self) -> Result<[u8; Self::BYTE_LEN], RegistryError> {
        let raw = hex::decode(&self.0)
            .map_err(|e| RegistryError::ProofVerification(format!("proof is not hex: {e}")))?;
        if raw.len() != Self::BYTE_LEN {
            return Err(RegistryError::ProofVerification(format!(
                "proof must be {} bytes, got {}",
                Self::BYTE_LEN,
                raw.len()
            )));
        }
        let mut bytes = [0u8; Self::BYTE_LEN];
        bytes.copy_from_slice(&raw);
        Ok(bytes)
    }
}

/// Pluggable proof verification seam.
///
/// The orchestration above this trait does not care which proof scheme is in
/// play; swapping in a SNARK/STARK verifier is a constructor argument, not a
/// rewrite.
pub trait ProofVerifier: Send + Sync {
    /// Whether `proof` validly binds `{challenge, identity, exists}`.
    /// Structural failures are errors; a well-formed proof that simply does
    /// not match yields `Ok(false)`.
    fn verify(
        &self,
        proof: &ExistenceProof,
        challenge: &Challenge,
        identity: &IdentityHash,
        exists: bool,
    ) -> Result<bool, RegistryError>;

    /// Human-readable name of this verification scheme.
    fn name(&self) -> &str;
}

/// The placeholder binding verifier:
/// `proof == SHA-256(challenge_bytes ‖ identity_bytes ‖ exists_byte)`.
///
/// A party that controls the registry response can forge this; it guards
/// against replay and transport corruption, nothing more.
pub struct BindingVerifier;

impl BindingVerifier {
    /// Compute the proof a well-behaved registry would attach to `exists`.
    pub fn expected_proof(
        challenge: &Challenge,
        identity: &IdentityHash,
        exists: bool,
    ) -> Result<ExistenceProof, RegistryError> {
        let challenge_bytes = challenge
            .decode()
            .map_err(|e| RegistryError::ProofVerification(e.to_string()))?;
        let digest = sha256_multi(&[&challenge_bytes, identity.as_bytes(), &[exists as u8]]);
        Ok(ExistenceProof::from_bytes(digest))
    }
}

impl ProofVerifier for BindingVerifier {
    fn verify(
        &self,
        proof: &ExistenceProof,
        challenge: &Challenge,
        identity: &IdentityHash,
        exists: bool,
    ) -> Result<bool, RegistryError> {
        let received = proof.decode()?;
        let expected = Self::expected_proof(challenge, identity, exists)?.decode()?;
        Ok(received == expected)
    }

    fn name(&self) -> &str {
        "binding-sha256"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriport_crypto::generate_challenge;

    fn test_identity(n: u8) -> IdentityHash {
        IdentityHash::new([n; 32])
    }

    #[test]
    fn test_valid_binding_accepted() {
        let challenge = generate_challenge().unwrap();
        let identity = test_identity(7);
        let proof = BindingVerifier::expected_proof(&challenge, &identity, true).unwrap();

        assert!(BindingVerifier
            .verify(&proof, &challenge, &identity, true)
            .unwrap());
    }

    #[test]
    fn test_binding_commits_to_every_field() {
        let challenge = generate_challenge().unwrap();
        let other_challenge = generate_challenge().unwrap();
        let identity = test_identity(7);
        let proof = BindingVerifier::expected_proof(&challenge, &identity, true).unwrap();

        // Wrong answer bit.
        assert!(!BindingVerifier
            .verify(&proof, &challenge, &identity, false)
            .unwrap());
        // Wrong identity.
        assert!(!BindingVerifier
            .verify(&proof, &challenge, &test_identity(8), true)
            .unwrap());
        // Wrong challenge.
        assert!(!BindingVerifier
            .verify(&proof, &other_challenge, &identity, true)
            .unwrap());
    }

    #[test]
    fn test_structural_garbage_is_an_error() {
        let challenge = generate_challenge().unwrap();
        let identity = test_identity(7);

        let not_hex = ExistenceProof::new("zz".repeat(32));
        assert!(matches!(
            BindingVerifier.verify(&not_hex, &challenge, &identity, true),
            Err(RegistryError::ProofVerification(_))
        ));

        let wrong_len = ExistenceProof::new("ab".repeat(16));
        assert!(matches!(
            BindingVerifier.verify(&wrong_len, &challenge, &identity, true),
            Err(RegistryError::ProofVerification(_))
        ));
    }

    #[test]
    fn test_proof_bytes_roundtrip() {
        let proof = ExistenceProof::from_bytes([0xcd; 32]);
        assert_eq!(proof.decode().unwrap(), [0xcd; 32]);
        assert_eq!(proof.as_str().len(), 64);
    }
}
