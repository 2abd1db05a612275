use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// No endpoint registered for the requested registry identifier.
    #[error("unknown registry: {0}")]
    UnknownRegistry(String),

    /// The OS secure random source failed while generating the challenge.
    /// Fatal to this single call only.
    #[error("challenge generation failed: {0}")]
    Entropy(String),

    /// Network-level failure or non-success HTTP status. One attempt per
    /// call; retry policy belongs to the caller.
    #[error("registry transport failure: {0}")]
    Transport(String),

    /// The registry answered with a body this client cannot decode.
    #[error("invalid registry response: {0}")]
    InvalidResponse(String),

    /// Malformed proof encoding, or a proof that does not bind the
    /// challenge/identity/answer triple.
    #[error("proof verification failed: {0}")]
    ProofVerification(String),

    /// The response answered a challenge this client never issued, or one
    /// that was already consumed.
    #[error("challenge was not issued by this client or was already consumed")]
    ChallengeReplay,
}
