//! Shipment routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use crate::{
    error::ApiError,
    models::{
        page_window,
        shipment::{
            CreateShipmentRequest, ShipmentListParams, ShipmentStatusUpdate, ShipmentUpdate,
        },
    },
    state::AppState,
};

/// Shipment routes under /api/v1
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/shipments", get(list_shipments).post(create_shipment))
        .route(
            "/api/v1/shipments/:id",
            get(get_shipment).put(update_shipment).delete(delete_shipment),
        )
        .route("/api/v1/shipments/:id/status", put(update_shipment_status))
        .route("/api/v1/shipments/order/:order_id", get(get_shipment_by_order))
        .route(
            "/api/v1/shipments/tracking/:tracking_number",
            get(get_shipment_by_tracking),
        )
}

/// Create a new shipment for an order
///
/// Fails with 404 when the order does not exist and 409 when the order
/// already has a shipment.
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(payload): Json<CreateShipmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let shipment = state.shipment_service.create(payload).await?;

    Ok((StatusCode::CREATED, Json(shipment)))
}

/// Get all shipments with an optional status filter
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(params): Query<ShipmentListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (skip, limit) = page_window(params.skip, params.limit, state.config.max_page_size);

    let shipments = state
        .shipment_repository
        .list(params.status, skip, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list shipments: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(shipments))
}

/// Get a shipment by ID
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let shipment = state
        .shipment_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get shipment: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound(format!("Shipment with id {id} not found")))?;

    Ok(Json(shipment))
}

/// Get the shipment belonging to an order
pub async fn get_shipment_by_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let shipment = state
        .shipment_repository
        .find_by_order(order_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get shipment for order {}: {}", order_id, e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound(format!(
            "No shipment found for order {order_id}"
        )))?;

    Ok(Json(shipment))
}

/// Get a shipment by its tracking number
pub async fn get_shipment_by_tracking(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let shipment = state
        .shipment_repository
        .find_by_tracking(&tracking_number)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to get shipment with tracking number {}: {}",
                tracking_number,
                e
            );
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound(format!(
            "No shipment found with tracking number {tracking_number}"
        )))?;

    Ok(Json(shipment))
}

/// Update shipment information (tracking number, carrier, vehicle info,
/// status)
pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ShipmentUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let shipment = state
        .shipment_service
        .update(id, payload)
        .await?
        .ok_or(ApiError::NotFound(format!("Shipment with id {id} not found")))?;

    Ok(Json(shipment))
}

/// Update the shipment status and cascade it into the parent order
pub async fn update_shipment_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ShipmentStatusUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let shipment = state
        .shipment_service
        .update_status(id, payload)
        .await?
        .ok_or(ApiError::NotFound(format!("Shipment with id {id} not found")))?;

    Ok(Json(shipment))
}

/// Delete a shipment
pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.shipment_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete shipment {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Shipment with id {id} not found")))
    }
}
