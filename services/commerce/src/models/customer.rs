//! Customer profile models
//!
//! Credentials and authentication live entirely in the external auth
//! service; a profile row here is a denormalized cache keyed by the
//! external identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer profile entity
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub id: i32,
    /// Authoritative identity from the external auth service
    pub external_user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Request for customer profile creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub external_user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Query parameters for customer listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerListParams {
    pub email: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
