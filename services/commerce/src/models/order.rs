//! Order and order-item models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownStatus;

/// Order lifecycle status
///
/// Stored as a snake_case text column. Transitions beyond the nominal
/// pending → processing → shipped → in_transit → delivered/completed path
/// are accepted on direct update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    InTransit,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "in_transit" => Ok(OrderStatus::InTransit),
            "delivered" => Ok(OrderStatus::Delivered),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Order entity
///
/// `user_id` is the opaque external identity issued by the authentication
/// service; it is only ever persisted after that service verified it.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i32,
    pub user_id: String,
    pub total: f64,
    pub status: OrderStatus,
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order line item; `subtotal` is derived as quantity × unit_price
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Order together with its line items
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Line item supplied on order creation
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Request for order creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub total: f64,
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Sparse patch for order updates; `user_id` is not re-validated here
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub total: Option<f64>,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<String>,
}

/// Query parameters for order listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListParams {
    pub user_id: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
