//! Transaction retry policy
//!
//! SQLite serializes writers. A transaction that reads first and writes
//! later can lose the race for the write lock and fail with `SQLITE_BUSY`;
//! nothing it did was committed, so it is simply run again after a short,
//! doubling pause.

use std::time::Duration;

/// How often and how patiently a conflicting transaction is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (at least 1)
    pub max_attempts: u32,
    /// Pause after the first failed attempt; doubles after each further failure
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(25),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Pause before attempt `failed_attempt + 1`
    ///
    /// # Arguments
    /// * `failed_attempt` - 1-based number of the attempt that just failed
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Whether another attempt is allowed after `failed_attempt`
    pub fn allows_retry(&self, failed_attempt: u32) -> bool {
        failed_attempt < self.max_attempts
    }
}
