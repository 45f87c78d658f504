//! Clock abstraction for the transaction processor
//!
//! The processor stamps transaction dates from a [`Clock`] rather than
//! calling `Utc::now()` directly, so date-sensitive behavior is testable
//! against a fixed instant.

use chrono::{DateTime, Utc};

/// Source of the processor's reference instant
pub trait Clock: Send + Sync {
    /// The current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
///
/// Used by tests that assert exact transaction and expiry dates.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
