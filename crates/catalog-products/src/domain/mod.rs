//! Domain types for the product catalog context.

pub mod events;
pub mod review;
pub mod views;
