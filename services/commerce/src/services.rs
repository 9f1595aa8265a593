//! Domain services composing repositories with cross-service calls

pub mod orders;
pub mod shipments;
