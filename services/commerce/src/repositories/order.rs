//! Order repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::models::order::{
    CreateOrderRequest, Order, OrderItem, OrderStatus, UpdateOrderRequest,
};

const ORDER_COLUMNS: &str = "id, user_id, total, status, shipping_address, created_at, updated_at";

/// Order repository for database operations
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<Order> {
        let status: String = row.get("status");
        Ok(Order {
            id: row.get("id"),
            user_id: row.get("user_id"),
            total: row.get("total"),
            status: status.parse::<OrderStatus>()?,
            shipping_address: row.get("shipping_address"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn map_item_row(row: &PgRow) -> OrderItem {
        let quantity: i32 = row.get("quantity");
        let unit_price: f64 = row.get("unit_price");
        OrderItem {
            id: row.get("id"),
            order_id: row.get("order_id"),
            product_id: row.get("product_id"),
            quantity,
            unit_price,
            subtotal: f64::from(quantity) * unit_price,
        }
    }

    /// Create a new order together with its line items in one transaction
    ///
    /// The caller has already validated the user id; nothing is written
    /// unless the whole insert succeeds.
    pub async fn create(&self, payload: &CreateOrderRequest) -> Result<(Order, Vec<OrderItem>)> {
        info!("Creating order for user {}", payload.user_id);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO orders (user_id, total, status, shipping_address)
            VALUES ($1, $2, $3, $4)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&payload.user_id)
        .bind(payload.total)
        .bind(OrderStatus::Pending.as_str())
        .bind(&payload.shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        let order = Self::map_row(&row)?;

        let mut items = Vec::with_capacity(payload.items.len());
        for item in &payload.items {
            let row = sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, product_id, quantity, unit_price
                "#,
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(Self::map_item_row(&row));
        }

        tx.commit().await?;
        Ok((order, items))
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Get the line items belonging to an order
    pub async fn items_for(&self, order_id: i32) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::map_item_row).collect())
    }

    /// Get orders with pagination and an optional user filter
    pub async fn list(
        &self,
        user_id: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE ($1::text IS NULL OR user_id = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Apply a sparse patch; omitted fields keep their stored value
    pub async fn update(&self, id: i32, payload: &UpdateOrderRequest) -> Result<Option<Order>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE orders SET
                total = COALESCE($2, total),
                status = COALESCE($3, status),
                shipping_address = COALESCE($4, shipping_address),
                updated_at = now()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.total)
        .bind(payload.status.map(|s| s.as_str()))
        .bind(&payload.shipping_address)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Set the order status, used by the shipment cascade
    pub async fn update_status(&self, id: i32, status: OrderStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE orders SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an order; its line items are removed by the cascade
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
