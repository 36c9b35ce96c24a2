use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::payment::Payment;
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub id: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub amount: i64,
    /// Whether the value was served from the cache.
    pub cache: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub fn create_router(service: AppState) -> Router {
    Router::new()
        .route("/payments", post(create_payment).get(list_payments))
        .route(
            "/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .with_state(service)
}

/// POST /payments
async fn create_payment(
    State(service): State<AppState>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<Json<StatusResponse>> {
    service.create(&req.id, req.amount).await?;
    Ok(Json(StatusResponse {
        status: "payment created",
    }))
}

/// GET /payments/{id}
async fn get_payment(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>> {
    let read = service.read(&id).await?;
    Ok(Json(PaymentResponse {
        id: read.payment.id,
        amount: read.payment.amount,
        cache: read.cached,
    }))
}

/// GET /payments
async fn list_payments(State(service): State<AppState>) -> Result<Json<Vec<Payment>>> {
    Ok(Json(service.list().await?))
}

/// PUT /payments/{id}
async fn update_payment(
    State(service): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePaymentRequest>,
) -> Result<Json<StatusResponse>> {
    service.update(&id, req.amount).await?;
    Ok(Json(StatusResponse { status: "updated" }))
}

/// DELETE /payments/{id}
async fn delete_payment(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>> {
    service.delete(&id).await?;
    Ok(Json(StatusResponse { status: "deleted" }))
}
