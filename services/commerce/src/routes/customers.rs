//! Customer profile routes
//!
//! Profiles cache the identity owned by the external auth service; there
//! are no credentials here.

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
        customer::{CreateCustomerRequest, CustomerListParams},
        page_window,
    },
    state::AppState,
    validation::validate_email,
};

/// Customer profile routes under /api/v1
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users", get(list_customers).post(create_customer))
        .route(
            "/api/v1/users/:id",
            get(get_customer).delete(delete_customer),
        )
}

/// Get customer profiles, optionally narrowed to one email
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(email) = &params.email {
        let profile = state
            .customer_repository
            .find_by_email(email)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up customer by email: {}", e);
                ApiError::InternalServerError
            })?;
        return Ok(Json(profile.into_iter().collect::<Vec<_>>()));
    }

    let (skip, limit) = page_window(params.skip, params.limit, state.config.max_page_size);

    let profiles = state
        .customer_repository
        .list(skip, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list customers: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(profiles))
}

/// Get a customer profile by ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .customer_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get customer: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(profile))
}

/// Create a new customer profile
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(email) = &payload.email {
        validate_email(email).map_err(ApiError::Validation)?;
    }

    let profile = state
        .customer_repository
        .create(&payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create customer: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(profile))
}

/// Delete a customer profile
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.customer_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete customer {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(Json(json!({"message": "User deleted successfully"})))
    } else {
        Err(ApiError::NotFound("User not found".to_string()))
    }
}
