//! Sliding log of weighted dispatch timestamps.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Sliding window of `(timestamp, weight)` entries.
///
/// Used twice by the governor: once with weight 1 per dispatch (request
/// budget) and once with the estimated prompt tokens (token budget).
#[derive(Debug, Clone)]
pub struct RateWindow {
    window: Duration,
    entries: VecDeque<(Instant, u64)>,
    total: u64,
}

impl RateWindow {
    /// Create an empty window of the given length.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: VecDeque::new(),
            total: 0,
        }
    }

    /// Drop entries whose age at `now` is at least the window length.
    pub fn purge(&mut self, now: Instant) {
        let before = self.entries.len();
        while let Some(&(at, weight)) = self.entries.front() {
            if now.saturating_duration_since(at) >= self.window {
                self.entries.pop_front();
                self.total -= weight;
            } else {
                break;
            }
        }
        let pruned = before - self.entries.len();
        if pruned > 0 {
            trace!(pruned, remaining = self.entries.len(), "Pruned expired window entries");
        }
    }

    /// Append an entry.
    pub fn record(&mut self, at: Instant, weight: u64) {
        self.entries.push_back((at, weight));
        self.total += weight;
    }

    /// Number of entries retained.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of retained weights.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Timestamp of the oldest retained entry.
    pub fn oldest(&self) -> Option<Instant> {
        self.entries.front().map(|(at, _)| *at)
    }

    /// How long until at least `needed` weight has expired from the window.
    ///
    /// Returns zero when `needed` is zero, and the time until the window is
    /// empty when `needed` exceeds the retained total.
    pub fn wait_to_release(&self, now: Instant, needed: u64) -> Duration {
        if needed == 0 {
            return Duration::ZERO;
        }
        let mut released = 0;
        let mut last = None;
        for &(at, weight) in &self.entries {
            released += weight;
            last = Some(at);
            if released >= needed {
                break;
            }
        }
        last.map(|at| (at + self.window).saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}
