//! Order routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde_json::json;

use crate::{
    error::ApiError,
    models::{
        page_window,
        order::{CreateOrderRequest, OrderDetail, OrderListParams, UpdateOrderRequest},
    },
    state::AppState,
};

/// Order routes under /api/v1
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/orders", get(list_orders).post(create_order))
        .route(
            "/api/v1/orders/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
}

/// Get all orders, optionally filtered by user
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (skip, limit) = page_window(params.skip, params.limit, state.config.max_page_size);

    let orders = state
        .order_repository
        .list(params.user_id.as_deref(), skip, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(orders))
}

/// Get an order with its line items
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .order_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get order: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Order not found".to_string()))?;

    let items = state.order_repository.items_for(id).await.map_err(|e| {
        tracing::error!("Failed to load items for order {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    Ok(Json(OrderDetail { order, items }))
}

/// Create a new order
///
/// Requires a bearer token; the referenced user is verified against the
/// external authentication service before anything is written.
pub async fn create_order(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let TypedHeader(auth) = auth.ok_or(ApiError::Unauthorized)?;

    let order = state.order_service.create(payload, auth.token()).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Apply a sparse patch to an order
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .order_service
        .update(id, payload)
        .await?
        .ok_or(ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(order))
}

/// Delete an order and its line items
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.order_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete order {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(Json(json!({"message": "Order deleted successfully"})))
    } else {
        Err(ApiError::NotFound("Order not found".to_string()))
    }
}
