use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /healthz - the router is only built after the adapters initialize,
/// so serving at all means the process is ready.
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn create_router() -> Router {
    Router::new().route("/healthz", get(healthz))
}
