//! Opaque identifiers exchanged with external collaborators.
//!
//! Carriers, checkpoints and registries are addressed by identifiers this core
//! consumes but does not mint; they stay opaque strings so a new carrier or
//! checkpoint class never requires a type change here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const MAX_LABEL_LEN: usize = 64;

fn label_is_valid(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_LABEL_LEN && s.bytes().all(|b| b.is_ascii_graphic())
}

/// An airline or border-operator identifier, e.g. `airline-emirates`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarrierId(String);

impl CarrierId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Well-formed: non-empty, bounded, printable ASCII.
    pub fn is_valid(&self) -> bool {
        label_is_valid(&self.0)
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CarrierId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CarrierId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A verification touchpoint class, e.g. `security`, `boarding`, `lounge`,
/// `arrival`. The set is open-ended: new checkpoint classes are just new
/// labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CheckpointType(String);

impl CheckpointType {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        label_is_valid(&self.0)
    }
}

impl fmt::Display for CheckpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CheckpointType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CheckpointType {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Addresses one federated registry in the directory, e.g. `registry-uae`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistryId(String);

impl RegistryId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        label_is_valid(&self.0)
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegistryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RegistryId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Globally unique identifier of one verification call.
///
/// Doubles as the billing idempotency key: a caller retrying with the same
/// request id reuses the same `VerificationId` and can never be billed twice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerificationId(String);

impl VerificationId {
    /// Mint a fresh random id (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Adopt a caller-supplied idempotency key.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.len() <= 128
    }
}

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one emitted billing event (UUID v4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillingEventId(Uuid);

impl BillingEventId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BillingEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_validity() {
        assert!(CarrierId::from("airline-emirates").is_valid());
        assert!(CheckpointType::from("boarding").is_valid());
        assert!(!CarrierId::from("").is_valid());
        assert!(!CheckpointType::from("gate 4").is_valid()); // embedded space
        assert!(!RegistryId::from("x".repeat(65)).is_valid());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(VerificationId::generate(), VerificationId::generate());
        assert_ne!(BillingEventId::generate(), BillingEventId::generate());
    }

    #[test]
    fn verification_id_adopts_caller_key() {
        let id = VerificationId::new("retry-key-7");
        assert_eq!(id.as_str(), "retry-key-7");
        assert!(id.is_valid());
    }
}
