//! SportGear Online commerce service
//!
//! Thin CRUD services for products, orders, payments, shipments and
//! customer profiles over PostgreSQL, plus the cross-service order
//! creation flow that verifies user identity against the external
//! authentication service.

pub mod auth_client;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
