//! Application layer: validation and the per-request product service.

pub mod product_service;
pub mod validation;
