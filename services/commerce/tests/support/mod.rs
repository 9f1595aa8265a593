//! Shared helpers for the live-database integration tests
//!
//! These tests expect `TEST_MODE=1` (or a `DATABASE_URL` pointing at a
//! disposable database); the schema is applied idempotently and all
//! tables are truncated before each test.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use common::database::{DatabaseConfig, init_pool};
use serde_json::json;
use sqlx::PgPool;

pub async fn test_pool() -> PgPool {
    let config = DatabaseConfig::from_env().expect("database config");
    let pool = init_pool(&config).await.expect("connect to test database");

    sqlx::raw_sql(include_str!("../../../../db/schema.sql"))
        .execute(&pool)
        .await
        .expect("apply schema");

    sqlx::raw_sql(
        "TRUNCATE order_items, shipments, payments, orders, products, customer_profiles \
         RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .expect("truncate tables");

    pool
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{addr}")
}

/// Auth service stub that verifies every user and counts lookups
pub async fn spawn_accepting_auth_stub() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/api/auth/users/:id",
        get(move |Path(id): Path<String>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({"id": id}))
            }
        }),
    );

    (spawn(app).await, hits)
}

/// Auth service stub that knows no users at all
pub async fn spawn_rejecting_auth_stub() -> String {
    let app = Router::new().route(
        "/api/auth/users/:id",
        get(|| async { StatusCode::NOT_FOUND }),
    );
    spawn(app).await
}
