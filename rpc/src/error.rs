//! RPC error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use veriport_cache::CacheError;
use veriport_service::ServiceError;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no cached trust entry for {0}")]
    TrustNotFound(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("server error: {0}")]
    Server(String),
}

impl From<ServiceError> for RpcError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Cache(CacheError::Unavailable(msg)) => RpcError::Unavailable(msg),
            other => RpcError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = match &self {
            RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::TrustNotFound(_) => StatusCode::NOT_FOUND,
            RpcError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RpcError::Internal(_) | RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
