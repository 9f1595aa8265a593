//! Product catalog models

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sport: Option<String>,
    pub gender: Option<String>,
    pub in_stock: bool,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
}

/// Request for product creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sport: Option<String>,
    pub gender: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: i32,
    pub image_url: Option<String>,
}

fn default_in_stock() -> bool {
    true
}

/// Sparse patch for product updates; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sport: Option<String>,
    pub gender: Option<String>,
    pub in_stock: Option<bool>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
}

/// Query parameters for product search
///
/// All filters combine with logical AND; omitted filters impose no
/// constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSearchParams {
    /// Free-text query matched against name, description or brand
    pub q: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sport: Option<String>,
    pub gender: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// When true, only products flagged in stock with a positive quantity
    pub in_stock: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
