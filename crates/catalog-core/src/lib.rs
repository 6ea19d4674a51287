//! Catalog Core — shared domain abstractions.
//!
//! This crate defines the request context, error taxonomy, event envelope and
//! the ports (persistence and notification) that the product catalog depends
//! on. It contains no infrastructure code.

pub mod clock;
pub mod context;
pub mod error;
pub mod event;
pub mod queue;
pub mod repository;
