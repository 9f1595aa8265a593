//! Request, response and entity models for the commerce service

use serde::Deserialize;
use thiserror::Error;

pub mod customer;
pub mod order;
pub mod payment;
pub mod product;
pub mod shipment;

/// Default number of rows returned by list endpoints when `limit` is omitted
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Error returned when a stored status string does not match any known
/// variant
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status value: {0}")]
pub struct UnknownStatus(pub String);

/// Pagination query parameters shared by list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Page {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Resolve a skip/limit pair into a usable window.
///
/// `limit` is clamped to `max_page_size`; a negative or missing `skip`
/// becomes 0.
pub fn page_window(skip: Option<i64>, limit: Option<i64>, max_page_size: i64) -> (i64, i64) {
    let skip = skip.unwrap_or(0).max(0);
    let limit = limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, max_page_size.max(1));
    (skip, limit)
}
