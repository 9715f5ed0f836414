//! Time source for chronicle exports.

use chrono::{DateTime, Utc};

/// Supplies the timestamp stamped onto exported chronicles.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the `microscope` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
