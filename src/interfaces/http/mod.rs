//! HTTP transport: a thin request/response mapping over the payment service.

pub mod health;
pub mod payments;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::application::service::PaymentService;

/// Shared state handed to every payment route.
pub type AppState = Arc<PaymentService>;

/// Builds the full application router.
pub fn create_router(service: AppState) -> Router {
    Router::new()
        .merge(health::create_router())
        .merge(payments::create_router(service))
        .layer(TraceLayer::new_for_http())
}
