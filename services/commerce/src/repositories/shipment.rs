//! Shipment repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::models::shipment::{CreateShipmentRequest, Shipment, ShipmentStatus};

const SHIPMENT_COLUMNS: &str = "id, order_id, tracking_number, carrier, vehicle_info, status, \
                                shipped_at, delivered_at, created_at, updated_at";

/// Shipment repository for database operations
#[derive(Clone)]
pub struct ShipmentRepository {
    pool: PgPool,
}

impl ShipmentRepository {
    /// Create a new shipment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<Shipment> {
        let status: String = row.get("status");
        Ok(Shipment {
            id: row.get("id"),
            order_id: row.get("order_id"),
            tracking_number: row.get("tracking_number"),
            carrier: row.get("carrier"),
            vehicle_info: row.get("vehicle_info"),
            status: status.parse::<ShipmentStatus>()?,
            shipped_at: row.get("shipped_at"),
            delivered_at: row.get("delivered_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Create a new shipment with status pending
    ///
    /// The unique constraint on order_id is the final backstop against two
    /// concurrent creations for the same order.
    pub async fn create(&self, payload: &CreateShipmentRequest) -> Result<Shipment> {
        info!("Creating shipment for order {}", payload.order_id);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO shipments (order_id, tracking_number, carrier, vehicle_info, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SHIPMENT_COLUMNS}
            "#
        ))
        .bind(payload.order_id)
        .bind(&payload.tracking_number)
        .bind(&payload.carrier)
        .bind(&payload.vehicle_info)
        .bind(ShipmentStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Self::map_row(&row)
    }

    /// Find a shipment by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Shipment>> {
        let row = sqlx::query(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Find the shipment belonging to an order, if any
    pub async fn find_by_order(&self, order_id: i32) -> Result<Option<Shipment>> {
        let row = sqlx::query(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Find a shipment by its tracking number
    pub async fn find_by_tracking(&self, tracking_number: &str) -> Result<Option<Shipment>> {
        let row = sqlx::query(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE tracking_number = $1"
        ))
        .bind(tracking_number)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Get shipments with pagination and an optional status filter
    pub async fn list(
        &self,
        status: Option<ShipmentStatus>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Shipment>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SHIPMENT_COLUMNS}
            FROM shipments
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Persist a merged shipment, replacing every mutable field
    pub async fn save(&self, shipment: &Shipment) -> Result<Shipment> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE shipments SET
                tracking_number = $2,
                carrier = $3,
                vehicle_info = $4,
                status = $5,
                shipped_at = $6,
                delivered_at = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {SHIPMENT_COLUMNS}
            "#
        ))
        .bind(shipment.id)
        .bind(&shipment.tracking_number)
        .bind(&shipment.carrier)
        .bind(&shipment.vehicle_info)
        .bind(shipment.status.as_str())
        .bind(shipment.shipped_at)
        .bind(shipment.delivered_at)
        .bind(shipment.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Self::map_row(&row)
    }

    /// Delete a shipment
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM shipments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
