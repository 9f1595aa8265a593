//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    config::AppConfig,
    repositories::{
        customer::CustomerRepository, order::OrderRepository, payment::PaymentRepository,
        product::ProductRepository, shipment::ShipmentRepository,
    },
    services::{orders::OrderService, shipments::ShipmentService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: AppConfig,
    pub product_repository: ProductRepository,
    pub order_repository: OrderRepository,
    pub payment_repository: PaymentRepository,
    pub shipment_repository: ShipmentRepository,
    pub customer_repository: CustomerRepository,
    pub order_service: OrderService,
    pub shipment_service: ShipmentService,
}
