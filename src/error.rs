use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors surfaced by the payment service and its adapters.
///
/// `StoreUnavailable` is always fatal to the enclosing request.
/// `CacheUnavailable` and `PublishFailed` are recovered inside the service:
/// the variants exist so adapters can report them and the policy of logging
/// and discarding them stays explicit at the orchestration layer.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("payment '{0}' already exists")]
    AlreadyExists(String),
    #[error("payment '{0}' not found")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),
    #[error("event publish failed: {0}")]
    PublishFailed(String),
}

impl PaymentError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::AlreadyExists(_) => StatusCode::CONFLICT,
            PaymentError::StoreUnavailable(_)
            | PaymentError::CacheUnavailable(_)
            | PaymentError::PublishFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
