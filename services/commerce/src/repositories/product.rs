//! Product repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::product::{
    CreateProductRequest, Product, ProductSearchParams, UpdateProductRequest,
};

const PRODUCT_COLUMNS: &str = "id, name, description, price, category, brand, sport, gender, \
                               in_stock, stock_quantity, image_url";

/// Product repository for database operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Product {
        Product {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            price: row.get("price"),
            category: row.get("category"),
            brand: row.get("brand"),
            sport: row.get("sport"),
            gender: row.get("gender"),
            in_stock: row.get("in_stock"),
            stock_quantity: row.get("stock_quantity"),
            image_url: row.get("image_url"),
        }
    }

    /// Get products with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Search products with conjunctive filters
    ///
    /// Every filter is optional; a NULL bind leaves the corresponding
    /// predicate unconstrained, so all active filters combine with AND.
    pub async fn search(
        &self,
        params: &ProductSearchParams,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Product>> {
        let text_pattern = params.q.as_ref().map(|q| format!("%{q}%"));

        let rows = sqlx::query(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1 OR brand ILIKE $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR brand = $3)
              AND ($4::text IS NULL OR sport = $4)
              AND ($5::text IS NULL OR gender = $5)
              AND ($6::float8 IS NULL OR price >= $6)
              AND ($7::float8 IS NULL OR price <= $7)
              AND (NOT $8 OR (in_stock AND stock_quantity > 0))
            ORDER BY id
            LIMIT $9 OFFSET $10
            "#
        ))
        .bind(text_pattern)
        .bind(&params.category)
        .bind(&params.brand)
        .bind(&params.sport)
        .bind(&params.gender)
        .bind(params.min_price)
        .bind(params.max_price)
        .bind(params.in_stock.unwrap_or(false))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Create a new product
    pub async fn create(&self, payload: &CreateProductRequest) -> Result<Product> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products
                (name, description, price, category, brand, sport, gender,
                 in_stock, stock_quantity, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(&payload.category)
        .bind(&payload.brand)
        .bind(&payload.sport)
        .bind(&payload.gender)
        .bind(payload.in_stock)
        .bind(payload.stock_quantity)
        .bind(&payload.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::map_row(&row))
    }

    /// Apply a sparse patch; omitted fields keep their stored value
    pub async fn update(
        &self,
        id: i32,
        payload: &UpdateProductRequest,
    ) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                brand = COALESCE($6, brand),
                sport = COALESCE($7, sport),
                gender = COALESCE($8, gender),
                in_stock = COALESCE($9, in_stock),
                stock_quantity = COALESCE($10, stock_quantity),
                image_url = COALESCE($11, image_url)
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(&payload.category)
        .bind(&payload.brand)
        .bind(&payload.sport)
        .bind(&payload.gender)
        .bind(payload.in_stock)
        .bind(payload.stock_quantity)
        .bind(&payload.image_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Delete a product; dependent order items are removed by the
    /// ON DELETE CASCADE constraint
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
