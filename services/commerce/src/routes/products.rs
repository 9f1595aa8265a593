//! Product catalog routes

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
        product::{CreateProductRequest, ProductSearchParams, UpdateProductRequest},
    },
    state::AppState,
    validation::{validate_non_negative, validate_positive},
};

/// Product routes under /api/v1
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(list_products).post(create_product))
        .route("/api/v1/products/search", get(search_products))
        .route(
            "/api/v1/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Get all products
pub async fn list_products(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, ApiError> {
    let (skip, limit) = page_window(page.skip, page.limit, state.config.max_page_size);

    let products = state
        .product_repository
        .list(skip, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(products))
}

/// Search products with conjunctive filters
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ProductSearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (skip, limit) = page_window(params.skip, params.limit, state.config.max_page_size);

    let products = state
        .product_repository
        .search(&params, skip, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search products: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(products))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .product_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_positive("price", payload.price).map_err(ApiError::Validation)?;
    validate_non_negative("stock_quantity", payload.stock_quantity)
        .map_err(ApiError::Validation)?;

    let product = state
        .product_repository
        .create(&payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create product: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(product))
}

/// Apply a sparse patch to a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(price) = payload.price {
        validate_positive("price", price).map_err(ApiError::Validation)?;
    }
    if let Some(stock_quantity) = payload.stock_quantity {
        validate_non_negative("stock_quantity", stock_quantity).map_err(ApiError::Validation)?;
    }

    let product = state
        .product_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product {}: {}", id, e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

/// Delete a product and its dependent order items
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.product_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete product {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(Json(json!({"message": "Product deleted successfully"})))
    } else {
        Err(ApiError::NotFound("Product not found".to_string()))
    }
}
