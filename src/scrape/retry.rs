// src/scrape/retry.rs
use std::time::Duration;

/// Bounded retry with exponential backoff, injected into the providers'
/// network call. `max_attempts` counts the first try; 1 disables retrying.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u8,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u8, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before retrying after the given 1-based failed attempt.
    /// Doubles each attempt: base, 2*base, 4*base, ...
    pub fn backoff(&self, attempt: u8) -> Duration {
        let shift = u32::from(attempt.saturating_sub(1)).min(16);
        self.base_delay.saturating_mul(1u32 << shift)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}
