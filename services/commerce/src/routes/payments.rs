//! Payment routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{
    error::ApiError,
    models::{
        Page, page_window,
        payment::{CreatePaymentRequest, UpdatePaymentRequest},
    },
    state::AppState,
    validation::validate_positive,
};

/// Payment routes under /api/v1
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/payments", get(list_payments).post(create_payment))
        .route(
            "/api/v1/payments/:id",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .route("/api/v1/payments/order/:order_id", get(get_payments_by_order))
}

/// Get all payments
pub async fn list_payments(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, ApiError> {
    let (skip, limit) = page_window(page.skip, page.limit, state.config.max_page_size);

    let payments = state
        .payment_repository
        .list(skip, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list payments: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(payments))
}

/// Get a payment by ID
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .payment_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get payment: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Payment not found".to_string()))?;

    Ok(Json(payment))
}

/// Get every payment recorded against an order
pub async fn get_payments_by_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .payment_repository
        .list_by_order(order_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list payments for order {}: {}", order_id, e);
            ApiError::InternalServerError
        })?;

    Ok(Json(payments))
}

/// Record a new payment
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_positive("amount", payload.amount).map_err(ApiError::Validation)?;

    let payment = state
        .payment_repository
        .create(&payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create payment: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(payment))
}

/// Apply a sparse patch to a payment
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(amount) = payload.amount {
        validate_positive("amount", amount).map_err(ApiError::Validation)?;
    }

    let payment = state
        .payment_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update payment {}: {}", id, e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Payment not found".to_string()))?;

    Ok(Json(payment))
}

/// Delete a payment
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.payment_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete payment {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(Json(json!({"message": "Payment deleted successfully"})))
    } else {
        Err(ApiError::NotFound("Payment not found".to_string()))
    }
}
