//! Monotonic clock adapter.
//!
//! The engine takes the cycle time as an argument; this adapter is where
//! the control loop gets it from.  Time is measured from construction, so
//! the first cycle runs near zero.

use core::time::Duration;
use std::time::Instant;

/// Monotonic time since the controller started.
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since start (monotonic).
    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whole seconds since start.
    pub fn uptime_secs(&self) -> u64 {
        self.uptime().as_secs()
    }
}
