//! Shipment lifecycle: guarded creation, merged updates, status cascade
//!
//! A shipment can only be created for an order that exists and has no
//! shipment yet. Status transitions stamp shipped_at/delivered_at exactly
//! once, and a status change propagates to the parent order as a
//! best-effort second step: the shipment write has already committed, so
//! an order-side failure is logged and never rolled back.

use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::{
    error::ApiError,
    models::{
        order::OrderStatus,
        shipment::{
            CreateShipmentRequest, Shipment, ShipmentStatus, ShipmentStatusUpdate, ShipmentUpdate,
        },
    },
    repositories::{order::OrderRepository, shipment::ShipmentRepository},
};

/// Order status implied by a shipment status, if any
pub fn order_status_for(status: ShipmentStatus) -> Option<OrderStatus> {
    match status {
        ShipmentStatus::Shipped => Some(OrderStatus::Shipped),
        ShipmentStatus::InTransit => Some(OrderStatus::InTransit),
        ShipmentStatus::Delivered => Some(OrderStatus::Completed),
        ShipmentStatus::Pending | ShipmentStatus::Cancelled => None,
    }
}

/// Merge a sparse update into a stored shipment
///
/// Omitted fields keep their stored value. shipped_at/delivered_at are
/// stamped on the first transition into shipped/delivered and left alone
/// on repeated transitions to the same status.
pub fn apply_update(current: &Shipment, update: &ShipmentUpdate, now: DateTime<Utc>) -> Shipment {
    let mut merged = current.clone();

    if let Some(tracking_number) = &update.tracking_number {
        merged.tracking_number = Some(tracking_number.clone());
    }
    if let Some(carrier) = &update.carrier {
        merged.carrier = Some(carrier.clone());
    }
    if let Some(vehicle_info) = &update.vehicle_info {
        merged.vehicle_info = Some(vehicle_info.clone());
    }
    if let Some(status) = update.status {
        merged.status = status;
    }

    stamp_status_timestamps(&mut merged, now);
    merged.updated_at = now;
    merged
}

/// Merge a status-only update into a stored shipment
pub fn apply_status_update(
    current: &Shipment,
    update: &ShipmentStatusUpdate,
    now: DateTime<Utc>,
) -> Shipment {
    let mut merged = current.clone();

    merged.status = update.status;
    if let Some(vehicle_info) = &update.vehicle_info {
        merged.vehicle_info = Some(vehicle_info.clone());
    }

    stamp_status_timestamps(&mut merged, now);
    merged.updated_at = now;
    merged
}

fn stamp_status_timestamps(shipment: &mut Shipment, now: DateTime<Utc>) {
    if shipment.status == ShipmentStatus::Shipped && shipment.shipped_at.is_none() {
        shipment.shipped_at = Some(now);
    }
    if shipment.status == ShipmentStatus::Delivered && shipment.delivered_at.is_none() {
        shipment.delivered_at = Some(now);
    }
}

/// Shipment service combining the shipment and order repositories
#[derive(Clone)]
pub struct ShipmentService {
    shipments: ShipmentRepository,
    orders: OrderRepository,
}

impl ShipmentService {
    /// Create a new shipment service
    pub fn new(shipments: ShipmentRepository, orders: OrderRepository) -> Self {
        Self { shipments, orders }
    }

    /// Create a shipment for an existing order that has none yet
    ///
    /// The order lookup and the duplicate check are explicit so their
    /// failures are distinguishable (404 vs 409); the unique constraint
    /// on order_id remains the backstop for the check-then-write race.
    pub async fn create(&self, payload: CreateShipmentRequest) -> Result<Shipment, ApiError> {
        let order = self
            .orders
            .find_by_id(payload.order_id)
            .await
            .map_err(|e| {
                error!("Failed to look up order {}: {}", payload.order_id, e);
                ApiError::InternalServerError
            })?;
        if order.is_none() {
            return Err(ApiError::NotFound(format!(
                "Order with id {} not found",
                payload.order_id
            )));
        }

        let existing = self
            .shipments
            .find_by_order(payload.order_id)
            .await
            .map_err(|e| {
                error!(
                    "Failed to look up shipment for order {}: {}",
                    payload.order_id, e
                );
                ApiError::InternalServerError
            })?;
        if existing.is_some() {
            return Err(ApiError::Conflict(format!(
                "Shipment already exists for order {}",
                payload.order_id
            )));
        }

        self.shipments.create(&payload).await.map_err(|e| {
            error!(
                "Failed to create shipment for order {}: {}",
                payload.order_id, e
            );
            ApiError::InternalServerError
        })
    }

    /// Apply a sparse update to a shipment
    pub async fn update(
        &self,
        id: i32,
        payload: ShipmentUpdate,
    ) -> Result<Option<Shipment>, ApiError> {
        let Some(current) = self.load(id).await? else {
            return Ok(None);
        };

        let merged = apply_update(&current, &payload, Utc::now());
        self.persist(merged).await.map(Some)
    }

    /// Update the shipment status and cascade it into the parent order
    ///
    /// The cascade is the second step of an explicit two-step operation:
    /// by the time the order update runs, the shipment change is already
    /// committed, so a failure here is logged and surfaced to nobody.
    pub async fn update_status(
        &self,
        id: i32,
        payload: ShipmentStatusUpdate,
    ) -> Result<Option<Shipment>, ApiError> {
        let Some(current) = self.load(id).await? else {
            return Ok(None);
        };

        let merged = apply_status_update(&current, &payload, Utc::now());
        let saved = self.persist(merged).await?;

        if let Some(order_status) = order_status_for(saved.status) {
            match self.orders.update_status(saved.order_id, order_status).await {
                Ok(true) => {}
                Ok(false) => warn!(
                    "Order {} vanished before shipment {} status cascade",
                    saved.order_id, saved.id
                ),
                Err(e) => warn!(
                    "Status cascade from shipment {} to order {} failed: {}",
                    saved.id, saved.order_id, e
                ),
            }
        }

        Ok(Some(saved))
    }

    async fn load(&self, id: i32) -> Result<Option<Shipment>, ApiError> {
        self.shipments.find_by_id(id).await.map_err(|e| {
            error!("Failed to load shipment {}: {}", id, e);
            ApiError::InternalServerError
        })
    }

    async fn persist(&self, merged: Shipment) -> Result<Shipment, ApiError> {
        self.shipments.save(&merged).await.map_err(|e| {
            error!("Failed to save shipment {}: {}", merged.id, e);
            ApiError::InternalServerError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_shipment(status: ShipmentStatus) -> Shipment {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Shipment {
            id: 7,
            order_id: 1,
            tracking_number: Some("TRK-001".to_string()),
            carrier: Some("DHL".to_string()),
            vehicle_info: None,
            status,
            shipped_at: None,
            delivered_at: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn later() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, 8, 30, 0).unwrap()
    }

    #[test]
    fn cascade_mapping_matches_the_fixed_table() {
        assert_eq!(
            order_status_for(ShipmentStatus::Shipped),
            Some(OrderStatus::Shipped)
        );
        assert_eq!(
            order_status_for(ShipmentStatus::InTransit),
            Some(OrderStatus::InTransit)
        );
        assert_eq!(
            order_status_for(ShipmentStatus::Delivered),
            Some(OrderStatus::Completed)
        );
        assert_eq!(order_status_for(ShipmentStatus::Pending), None);
        assert_eq!(order_status_for(ShipmentStatus::Cancelled), None);
    }

    #[test]
    fn first_transition_to_shipped_stamps_shipped_at() {
        let current = sample_shipment(ShipmentStatus::Pending);
        let update = ShipmentStatusUpdate {
            status: ShipmentStatus::Shipped,
            vehicle_info: None,
        };

        let merged = apply_status_update(&current, &update, later());
        assert_eq!(merged.status, ShipmentStatus::Shipped);
        assert_eq!(merged.shipped_at, Some(later()));
        assert_eq!(merged.delivered_at, None);
        assert_eq!(merged.updated_at, later());
    }

    #[test]
    fn repeated_transition_to_shipped_keeps_the_original_timestamp() {
        let first_stamp = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
        let mut current = sample_shipment(ShipmentStatus::Shipped);
        current.shipped_at = Some(first_stamp);

        let update = ShipmentStatusUpdate {
            status: ShipmentStatus::Shipped,
            vehicle_info: None,
        };
        let merged = apply_status_update(&current, &update, later());
        assert_eq!(merged.shipped_at, Some(first_stamp));
    }

    #[test]
    fn delivery_stamps_delivered_at_once() {
        let current = sample_shipment(ShipmentStatus::InTransit);
        let update = ShipmentStatusUpdate {
            status: ShipmentStatus::Delivered,
            vehicle_info: Some("Truck 12, plate ABC-123".to_string()),
        };

        let merged = apply_status_update(&current, &update, later());
        assert_eq!(merged.delivered_at, Some(later()));
        assert_eq!(merged.vehicle_info.as_deref(), Some("Truck 12, plate ABC-123"));

        let repeat = apply_status_update(&merged, &update, Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap());
        assert_eq!(repeat.delivered_at, Some(later()));
    }

    #[test]
    fn sparse_update_keeps_omitted_fields() {
        let current = sample_shipment(ShipmentStatus::Pending);
        let update = ShipmentUpdate {
            carrier: Some("FedEx".to_string()),
            ..ShipmentUpdate::default()
        };

        let merged = apply_update(&current, &update, later());
        assert_eq!(merged.carrier.as_deref(), Some("FedEx"));
        assert_eq!(merged.tracking_number.as_deref(), Some("TRK-001"));
        assert_eq!(merged.status, ShipmentStatus::Pending);
        assert_eq!(merged.shipped_at, None);
    }

    #[test]
    fn sparse_update_with_status_also_stamps() {
        let current = sample_shipment(ShipmentStatus::Pending);
        let update = ShipmentUpdate {
            status: Some(ShipmentStatus::Delivered),
            ..ShipmentUpdate::default()
        };

        let merged = apply_update(&current, &update, later());
        assert_eq!(merged.status, ShipmentStatus::Delivered);
        assert_eq!(merged.delivered_at, Some(later()));
    }
}
