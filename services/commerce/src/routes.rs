//! Commerce service routes

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::state::AppState;

pub mod customers;
pub mod orders;
pub mod payments;
pub mod products;
pub mod shipments;

/// Create the router for the commerce service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(products::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(shipments::router())
        .merge(customers::router())
        .with_state(state)
}

/// Service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "SportGear Online API is running!"
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "commerce-service"
    }))
}
