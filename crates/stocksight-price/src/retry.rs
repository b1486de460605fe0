//! Exponential backoff for the poll loop

use std::time::Duration;

/// Doubling retry delay with an upper bound
///
/// Each failure doubles the delay up to `max`; a success resets it to `base`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stocksight_price::RetryPolicy;
///
/// let mut retry = RetryPolicy::new(Duration::from_secs(1), Duration::from_secs(5));
/// assert_eq!(retry.next_delay(), Duration::from_secs(1));
/// assert_eq!(retry.next_delay(), Duration::from_secs(2));
/// assert_eq!(retry.next_delay(), Duration::from_secs(4));
/// assert_eq!(retry.next_delay(), Duration::from_secs(5));
///
/// retry.reset();
/// assert_eq!(retry.next_delay(), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    base: Duration,
    max: Duration,
    current: Duration,
    failures: u32,
}

impl RetryPolicy {
    /// Create a policy starting at `base` and capped at `max`
    pub fn new(base: Duration, max: Duration) -> Self {
        let max = max.max(base);
        Self {
            base,
            max,
            current: base,
            failures: 0,
        }
    }

    /// Delay to wait after another failure
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.failures = self.failures.saturating_add(1);
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    /// Forget past failures
    pub fn reset(&mut self) {
        self.current = self.base;
        self.failures = 0;
    }

    /// Failures since the last reset
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_up_to_cap() {
        let mut retry = RetryPolicy::new(Duration::from_secs(2), Duration::from_secs(300));
        let delays: Vec<u64> = (0..10).map(|_| retry.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![2, 4, 8, 16, 32, 64, 128, 256, 300, 300]);
        assert_eq!(retry.failures(), 10);
    }

    #[test]
    fn test_reset_after_success() {
        let mut retry = RetryPolicy::new(Duration::from_secs(1), Duration::from_secs(60));
        retry.next_delay();
        retry.next_delay();
        retry.reset();
        assert_eq!(retry.failures(), 0);
        assert_eq!(retry.next_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_cap_below_base_uses_base() {
        let mut retry = RetryPolicy::new(Duration::from_secs(10), Duration::from_secs(1));
        assert_eq!(retry.next_delay(), Duration::from_secs(10));
        assert_eq!(retry.next_delay(), Duration::from_secs(10));
    }
}
