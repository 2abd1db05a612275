//! Nullable proof verification — pre-configured verdicts for testing.

use veriport_crypto::Challenge;
use veriport_registry::{ExistenceProof, ProofVerifier, RegistryError};
use veriport_types::IdentityHash;

/// A proof verifier that returns a fixed verdict regardless of input.
pub struct StaticProofVerifier {
    verdict: bool,
}

impl StaticProofVerifier {
    /// Accept every proof.
    pub fn accepting() -> Self {
        Self { verdict: true }
    }

    /// Reject every proof.
    pub fn rejecting() -> Self {
        Self { verdict: false }
    }
}

impl ProofVerifier for StaticProofVerifier {
    fn verify(
        &self,
        _proof: &ExistenceProof,
        _challenge: &Challenge,
        _identity: &IdentityHash,
        _exists: bool,
    ) -> Result<bool, RegistryError> {
        Ok(self.verdict)
    }

    fn name(&self) -> &str {
        "null-proof"
    }
}
