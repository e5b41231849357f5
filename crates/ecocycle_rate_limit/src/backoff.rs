//! Exponential backoff after provider rate-limit errors.

use std::time::Duration;
use tokio::time::Instant;

/// Backoff for `consecutive` errors: `min(base * 2^min(consecutive, cap), max)`.
///
/// # Examples
///
/// ```
/// use ecocycle_rate_limit::backoff_duration;
/// use std::time::Duration;
///
/// let base = Duration::from_secs(1);
/// let max = Duration::from_secs(120);
/// assert_eq!(backoff_duration(3, 6, base, max), Duration::from_secs(8));
/// assert_eq!(backoff_duration(9, 6, base, max), Duration::from_secs(64));
/// ```
pub fn backoff_duration(consecutive: u32, cap: u32, base: Duration, max: Duration) -> Duration {
    let exponent = consecutive.min(cap).min(31);
    base.saturating_mul(1u32 << exponent).min(max)
}

/// Consecutive rate-limit errors and when the last one happened.
#[derive(Debug, Clone)]
pub struct BackoffState {
    consecutive: u32,
    last_error: Option<Instant>,
    cap: u32,
    base: Duration,
    max: Duration,
}

impl BackoffState {
    /// Create a cleared backoff state.
    pub fn new(cap: u32, base: Duration, max: Duration) -> Self {
        Self {
            consecutive: 0,
            last_error: None,
            cap,
            base,
            max,
        }
    }

    /// Current consecutive error count (saturates at the cap).
    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    /// When the most recent rate-limit error was recorded.
    pub fn last_error(&self) -> Option<Instant> {
        self.last_error
    }

    /// Record a rate-limit error at `now`.
    pub fn record_error(&mut self, now: Instant) {
        self.consecutive = (self.consecutive + 1).min(self.cap);
        self.last_error = Some(now);
    }

    /// Clear after a successful dispatch.
    pub fn reset(&mut self) {
        self.consecutive = 0;
    }

    /// Full backoff for the current error count.
    pub fn duration(&self) -> Duration {
        backoff_duration(self.consecutive, self.cap, self.base, self.max)
    }

    /// Time left before admission may resume, or `None` when not backing off.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.consecutive == 0 {
            return None;
        }
        let last = self.last_error?;
        let elapsed = now.saturating_duration_since(last);
        let remaining = self.duration().saturating_sub(elapsed);
        (!remaining.is_zero()).then_some(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> BackoffState {
        BackoffState::new(6, Duration::from_millis(1_000), Duration::from_millis(120_000))
    }

    #[test]
    fn duration_doubles_and_clamps_at_cap() {
        let base = Duration::from_millis(1_000);
        let max = Duration::from_millis(120_000);
        for n in 0..=6 {
            assert_eq!(
                backoff_duration(n, 6, base, max),
                Duration::from_millis(1_000 * 2u64.pow(n))
            );
        }
        for n in 7..12 {
            assert_eq!(backoff_duration(n, 6, base, max), backoff_duration(6, 6, base, max));
        }
    }

    #[test]
    fn max_backoff_bounds_duration() {
        let d = backoff_duration(6, 10, Duration::from_secs(4), Duration::from_secs(120));
        assert_eq!(d, Duration::from_secs(120));
    }

    #[test]
    fn counter_saturates_and_resets() {
        let now = Instant::now();
        let mut backoff = state();
        for _ in 0..10 {
            backoff.record_error(now);
        }
        assert_eq!(backoff.consecutive(), 6);
        backoff.reset();
        assert_eq!(backoff.consecutive(), 0);
        assert!(backoff.remaining(now).is_none());
    }

    #[test]
    fn remaining_counts_down_from_last_error() {
        let now = Instant::now();
        let mut backoff = state();
        backoff.record_error(now);
        assert_eq!(backoff.remaining(now), Some(Duration::from_secs(2)));
        assert_eq!(
            backoff.remaining(now + Duration::from_millis(1_500)),
            Some(Duration::from_millis(500))
        );
        assert!(backoff.remaining(now + Duration::from_secs(2)).is_none());
    }
}
