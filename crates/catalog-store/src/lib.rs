//! Catalog Store — PostgreSQL adapters for the catalog ports.

pub mod pg_notification_queue;
pub mod pg_product_repository;
pub mod pg_rating_repository;

use catalog_core::error::DomainError;

/// Maps a `sqlx` failure onto the persistence error kind.
pub(crate) fn persistence_error(err: &sqlx::Error) -> DomainError {
    DomainError::Persistence(err.to_string())
}
