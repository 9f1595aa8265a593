//! Order creation and update flow
//!
//! Creating an order is the one multi-step operation in the system: the
//! referenced user must be verified against the external authentication
//! service before anything is written. The validator is called exactly
//! once per attempt, and a rejected user aborts the request with no row
//! persisted.

use tracing::{error, warn};

use crate::{
    auth_client::{AuthServiceClient, UserCheck},
    error::ApiError,
    models::order::{CreateOrderRequest, Order, OrderDetail, UpdateOrderRequest},
    repositories::order::OrderRepository,
    validation::{validate_at_least_one, validate_positive},
};

/// Order service combining the repository with the external user validator
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    users: AuthServiceClient,
}

impl OrderService {
    /// Create a new order service
    pub fn new(orders: OrderRepository, users: AuthServiceClient) -> Self {
        Self { orders, users }
    }

    /// Create an order after verifying its user against the auth service
    ///
    /// The user check is trusted for the remainder of the request; there
    /// is no re-check at write time.
    pub async fn create(
        &self,
        payload: CreateOrderRequest,
        token: &str,
    ) -> Result<OrderDetail, ApiError> {
        validate_create(&payload).map_err(ApiError::Validation)?;

        match self.users.check_user(&payload.user_id, token).await {
            UserCheck::Verified => {}
            outcome => {
                warn!(
                    "Rejecting order for user {}: validation outcome {:?}",
                    payload.user_id, outcome
                );
                return Err(ApiError::InvalidUser(payload.user_id));
            }
        }

        let (order, items) = self.orders.create(&payload).await.map_err(|e| {
            error!("Failed to create order: {}", e);
            ApiError::InternalServerError
        })?;

        Ok(OrderDetail { order, items })
    }

    /// Apply a sparse patch to an order; the user id is not re-validated
    pub async fn update(
        &self,
        id: i32,
        payload: UpdateOrderRequest,
    ) -> Result<Option<Order>, ApiError> {
        if let Some(total) = payload.total {
            validate_positive("total", total).map_err(ApiError::Validation)?;
        }

        self.orders.update(id, &payload).await.map_err(|e| {
            error!("Failed to update order {}: {}", id, e);
            ApiError::InternalServerError
        })
    }
}

fn validate_create(payload: &CreateOrderRequest) -> Result<(), String> {
    if payload.user_id.trim().is_empty() {
        return Err("user_id is required".to_string());
    }
    validate_positive("total", payload.total)?;
    for item in &payload.items {
        validate_at_least_one("quantity", item.quantity)?;
        validate_positive("unit_price", item.unit_price)?;
    }
    Ok(())
}
