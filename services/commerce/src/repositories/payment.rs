//! Payment repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::payment::{
    CreatePaymentRequest, Payment, PaymentStatus, UpdatePaymentRequest,
};

const PAYMENT_COLUMNS: &str = "id, order_id, amount, method, status";

/// Payment repository for database operations
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<Payment> {
        let status: String = row.get("status");
        Ok(Payment {
            id: row.get("id"),
            order_id: row.get("order_id"),
            amount: row.get("amount"),
            method: row.get("method"),
            status: status.parse::<PaymentStatus>()?,
        })
    }

    /// Get payments with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Find a payment by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Get every payment recorded against an order
    pub async fn list_by_order(&self, order_id: i32) -> Result<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Record a new payment with status pending
    pub async fn create(&self, payload: &CreatePaymentRequest) -> Result<Payment> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO payments (order_id, amount, method, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payload.order_id)
        .bind(payload.amount)
        .bind(&payload.method)
        .bind(PaymentStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Self::map_row(&row)
    }

    /// Apply a sparse patch; omitted fields keep their stored value
    pub async fn update(
        &self,
        id: i32,
        payload: &UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE payments SET
                amount = COALESCE($2, amount),
                method = COALESCE($3, method),
                status = COALESCE($4, status)
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.amount)
        .bind(&payload.method)
        .bind(payload.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Delete a payment
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
