//! Time source for request receive times and event `occurred_at` stamps.
//!
//! Services and adapters take `&dyn Clock` so tests can pin time with a fixed
//! clock.

use chrono::{DateTime, Utc};

/// Supplies the current UTC time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by `Utc::now()`, used by the API binary.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
