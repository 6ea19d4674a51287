//! Request context extraction.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use catalog_core::clock::Clock;
use catalog_core::context::RequestContext;
use uuid::Uuid;

use crate::state::AppState;

/// Header carrying a caller-supplied correlation ID.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Extractor yielding the `RequestContext` for the current request.
///
/// Uses the `x-correlation-id` header when it holds a valid UUID and
/// generates a fresh one otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Ctx(pub RequestContext);

impl FromRequestParts<AppState> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let received_at = state.clock.now();
        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok());

        let ctx = match correlation_id {
            Some(id) => RequestContext::new(id, received_at),
            None => RequestContext::generate(received_at),
        };
        Ok(Self(ctx))
    }
}
