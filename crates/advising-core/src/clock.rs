//! Time source for the admission window and deadline queries.

use chrono::{DateTime, FixedOffset, Local};

/// Supplies the "as of" instant for time-dependent operations.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall-clock time in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<FixedOffset> { Local::now().fixed_offset() }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<FixedOffset> { self.0 }
}
