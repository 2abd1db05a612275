//! The incoming verification request.

use serde::{Deserialize, Serialize};
use veriport_types::{CarrierId, CheckpointType, IdentityHash, VerificationId};

/// One traveler verification call, as received from a carrier checkpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub identity_hash: IdentityHash,
    pub carrier_id: CarrierId,
    pub checkpoint: CheckpointType,
    /// Operational context only; never forwarded to a registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    /// Caller-supplied idempotency key. Retries carrying the same key map to
    /// the same verification id and can never be billed twice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl VerifyRequest {
    pub fn new(
        identity_hash: IdentityHash,
        carrier_id: CarrierId,
        checkpoint: CheckpointType,
    ) -> Self {
        Self {
            identity_hash,
            carrier_id,
            checkpoint,
            flight_number: None,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_flight_number(mut self, flight_number: impl Into<String>) -> Self {
        self.flight_number = Some(flight_number.into());
        self
    }

    /// The verification id for this call: the caller's request id when one is
    /// supplied and well-formed, a fresh UUID otherwise.
    pub fn verification_id(&self) -> VerificationId {
        match &self.request_id {
            Some(raw) => {
                let adopted = VerificationId::new(raw.clone());
                if adopted.is_valid() {
                    adopted
                } else {
                    VerificationId::generate()
                }
            }
            None => VerificationId::generate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_request() -> VerifyRequest {
        VerifyRequest::new(
            IdentityHash::new([7u8; 32]),
            CarrierId::from("airline-a"),
            CheckpointType::from("security"),
        )
    }

    #[test]
    fn test_request_id_is_adopted() {
        let request = test_request().with_request_id("retry-key-1");
        assert_eq!(request.verification_id().as_str(), "retry-key-1");
        assert_eq!(request.verification_id(), request.verification_id());
    }

    #[test]
    fn test_missing_request_id_generates_fresh_ids() {
        let request = test_request();
        assert_ne!(request.verification_id(), request.verification_id());
    }

    #[test]
    fn test_oversized_request_id_is_replaced() {
        let request = test_request().with_request_id("x".repeat(300));
        assert!(request.verification_id().is_valid());
        assert_ne!(request.verification_id().as_str(), "x".repeat(300));
    }

    #[test]
    fn test_optional_fields_stay_off_the_wire() {
        let json = serde_json::to_value(test_request()).unwrap();
        assert!(json.get("flight_number").is_none());
        assert!(json.get("request_id").is_none());
    }
}
