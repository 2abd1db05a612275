//! Existence-proof client tests against an in-process stub registry.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use veriport_registry::{
    BindingVerifier, ExistenceProof, ExistenceRequest, ExistenceResponse, RegistryClient,
    RegistryDirectory, RegistryError,
};
use veriport_types::{
    CountBucket, IdentityHash, RecencyBucket, RegistryId, RiskBucket, TrustIndicators,
};

#[derive(Clone, Copy)]
enum StubBehavior {
    Honest,
    GarbageProof,
    WrongBinding,
    ServerError,
}

struct StubRegistry {
    known: Vec<IdentityHash>,
    behavior: StubBehavior,
}

async fn existence_handler(
    State(stub): State<Arc<StubRegistry>>,
    Json(request): Json<ExistenceRequest>,
) -> Result<Json<ExistenceResponse>, StatusCode> {
    if matches!(stub.behavior, StubBehavior::ServerError) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let exists = stub.known.contains(&request.identity_hash);
    let proof = match stub.behavior {
        StubBehavior::Honest => {
            BindingVerifier::expected_proof(&request.challenge, &request.identity_hash, exists)
                .expect("stub proof")
        }
        StubBehavior::GarbageProof => ExistenceProof::new("definitely-not-hex"),
        StubBehavior::WrongBinding => {
            BindingVerifier::expected_proof(&request.challenge, &request.identity_hash, !exists)
                .expect("stub proof")
        }
        StubBehavior::ServerError => unreachable!(),
    };
    let trust_indicators = if exists {
        TrustIndicators {
            verification_count: CountBucket::High,
            last_verified: RecencyBucket::Recent,
            risk_level: RiskBucket::Low,
        }
    } else {
        TrustIndicators::unestablished()
    };

    Ok(Json(ExistenceResponse {
        exists,
        proof,
        trust_indicators,
    }))
}

async fn spawn_stub(stub: StubRegistry) -> SocketAddr {
    let app = Router::new()
        .route("/v1/existence/verify", post(existence_handler))
        .with_state(Arc::new(stub));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub registry");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub serve");
    });
    addr
}

fn client_for(addr: SocketAddr) -> RegistryClient {
    let mut directory = RegistryDirectory::new();
    directory.register(RegistryId::from("registry-test"), format!("http://{addr}"));
    RegistryClient::new(directory)
}

fn test_identity(n: u8) -> IdentityHash {
    IdentityHash::new([n; 32])
}

#[tokio::test]
async fn known_identity_verifies_with_indicators() {
    let addr = spawn_stub(StubRegistry {
        known: vec![test_identity(1)],
        behavior: StubBehavior::Honest,
    })
    .await;
    let client = client_for(addr);

    let check = client
        .verify_hash_exists(&test_identity(1), &RegistryId::from("registry-test"))
        .await
        .unwrap();

    assert!(check.exists);
    assert_eq!(check.indicators.verification_count, CountBucket::High);
    assert_eq!(check.registry_id, RegistryId::from("registry-test"));
    assert!(check.proof.decode().is_ok());
}

#[tokio::test]
async fn unknown_identity_is_a_valid_negative() {
    let addr = spawn_stub(StubRegistry {
        known: vec![test_identity(1)],
        behavior: StubBehavior::Honest,
    })
    .await;
    let client = client_for(addr);

    let check = client
        .verify_hash_exists(&test_identity(2), &RegistryId::from("registry-test"))
        .await
        .unwrap();

    // The registry proves absence; this is a result, not an error.
    assert!(!check.exists);
    assert_eq!(check.indicators, TrustIndicators::unestablished());
}

#[tokio::test]
async fn unknown_registry_fails_before_any_network_io() {
    let client = RegistryClient::new(RegistryDirectory::new());
    let err = client
        .verify_hash_exists(&test_identity(1), &RegistryId::from("registry-nowhere"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownRegistry(id) if id == "registry-nowhere"));
}

#[tokio::test]
async fn garbage_proof_is_a_verification_failure() {
    let addr = spawn_stub(StubRegistry {
        known: vec![test_identity(1)],
        behavior: StubBehavior::GarbageProof,
    })
    .await;
    let client = client_for(addr);

    let err = client
        .verify_hash_exists(&test_identity(1), &RegistryId::from("registry-test"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::ProofVerification(_)));
}

#[tokio::test]
async fn mis_bound_proof_is_a_verification_failure() {
    let addr = spawn_stub(StubRegistry {
        known: vec![test_identity(1)],
        behavior: StubBehavior::WrongBinding,
    })
    .await;
    let client = client_for(addr);

    let err = client
        .verify_hash_exists(&test_identity(1), &RegistryId::from("registry-test"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::ProofVerification(_)));
}

#[tokio::test]
async fn server_error_surfaces_as_transport() {
    let addr = spawn_stub(StubRegistry {
        known: vec![],
        behavior: StubBehavior::ServerError,
    })
    .await;
    let client = client_for(addr);

    let err = client
        .verify_hash_exists(&test_identity(1), &RegistryId::from("registry-test"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Transport(msg) if msg.contains("500")));
}

#[tokio::test]
async fn unreachable_registry_surfaces_as_transport() {
    let mut directory = RegistryDirectory::new();
    // Nothing listens on the discard port.
    directory.register(RegistryId::from("registry-down"), "http://127.0.0.1:9");
    let client = RegistryClient::new(directory);

    let err = client
        .verify_hash_exists(&test_identity(1), &RegistryId::from("registry-down"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Transport(_)));
}
