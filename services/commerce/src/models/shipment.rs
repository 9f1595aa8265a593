//! Shipment models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownStatus;

/// Shipment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Shipped,
    InTransit,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::Shipped => "shipped",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ShipmentStatus::Pending),
            "shipped" => Ok(ShipmentStatus::Shipped),
            "in_transit" => Ok(ShipmentStatus::InTransit),
            "delivered" => Ok(ShipmentStatus::Delivered),
            "cancelled" => Ok(ShipmentStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Shipment entity; at most one shipment exists per order
///
/// `shipped_at` and `delivered_at` are stamped the first time the status
/// enters shipped/delivered and never overwritten afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Shipment {
    pub id: i32,
    pub order_id: i32,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub vehicle_info: Option<String>,
    pub status: ShipmentStatus,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for shipment creation; new shipments always start pending
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShipmentRequest {
    pub order_id: i32,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub vehicle_info: Option<String>,
}

/// Sparse patch of the mutable shipment fields; omitted fields are left
/// untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentUpdate {
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub vehicle_info: Option<String>,
    pub status: Option<ShipmentStatus>,
}

/// Status-only update; optionally refreshes the vehicle info
#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentStatusUpdate {
    pub status: ShipmentStatus,
    pub vehicle_info: Option<String>,
}

/// Query parameters for shipment listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentListParams {
    pub status: Option<ShipmentStatus>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipment_status_round_trips_through_text() {
        for status in [
            ShipmentStatus::Pending,
            ShipmentStatus::Shipped,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
            ShipmentStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ShipmentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn malformed_status_fails_deserialization() {
        let result = serde_json::from_str::<ShipmentStatusUpdate>(r#"{"status": "lost"}"#);
        assert!(result.is_err());
    }
}
