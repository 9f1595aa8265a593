//! Customer profile repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::customer::{CreateCustomerRequest, CustomerProfile};

const CUSTOMER_COLUMNS: &str = "id, external_user_id, name, email";

/// Customer profile repository for database operations
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> CustomerProfile {
        CustomerProfile {
            id: row.get("id"),
            external_user_id: row.get("external_user_id"),
            name: row.get("name"),
            email: row.get("email"),
        }
    }

    /// Get customer profiles with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<CustomerProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer_profiles ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Find a customer profile by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<CustomerProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer_profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Find a customer profile by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<CustomerProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer_profiles WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Create a new customer profile
    pub async fn create(&self, payload: &CreateCustomerRequest) -> Result<CustomerProfile> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO customer_profiles (external_user_id, name, email)
            VALUES ($1, $2, $3)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(payload.external_user_id)
        .bind(&payload.name)
        .bind(&payload.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::map_row(&row))
    }

    /// Delete a customer profile
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customer_profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
