//! Product catalog — products and ratings bounded context.
//!
//! Responsible for listing products, reading a product together with its
//! ratings, validating review submissions, and recording new ratings.

pub mod application;
pub mod domain;
