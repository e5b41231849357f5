//! Admission decisions combining request budget, token budget and backoff.

use crate::{BackoffState, GatewayConfig, RateWindow};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Estimated token cost of a prompt: `ceil(chars / 4)`.
///
/// # Examples
///
/// ```
/// use ecocycle_rate_limit::estimate_tokens;
///
/// assert_eq!(estimate_tokens(""), 0);
/// assert_eq!(estimate_tokens("abcd"), 1);
/// assert_eq!(estimate_tokens("abcde"), 2);
/// ```
pub fn estimate_tokens(prompt: &str) -> u64 {
    (prompt.chars().count() as u64).div_ceil(4)
}

/// Why a request may not be dispatched yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DenyReason {
    /// A provider rate-limit error is still being backed off
    #[display("backoff")]
    Backoff,
    /// The request budget for the window is spent
    #[display("requests")]
    Requests,
    /// The token budget for the window is spent
    #[display("tokens")]
    Tokens,
}

/// Result of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Dispatch now
    Admit,
    /// Hold the request for `wait`
    Deny {
        /// Time until the blocking condition clears
        wait: Duration,
        /// Which condition blocked the request
        reason: DenyReason,
    },
}

impl Admission {
    /// Whether the request was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admit)
    }
}

/// Rate and backoff state owned by a single gateway drain task.
#[derive(Debug, Clone)]
pub struct RateGovernor {
    max_requests: u32,
    max_tokens: u64,
    requests: RateWindow,
    tokens: RateWindow,
    backoff: BackoffState,
}

impl RateGovernor {
    /// Create a governor from gateway limits.
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            max_requests: config.rpm,
            max_tokens: config.tpm,
            requests: RateWindow::new(config.window()),
            tokens: RateWindow::new(config.window()),
            backoff: BackoffState::new(
                config.max_consecutive_errors,
                config.base_backoff(),
                config.max_backoff(),
            ),
        }
    }

    /// Decide whether a request of `estimated_tokens` may be dispatched at `now`.
    ///
    /// Expired window entries are purged first. Backoff is checked before
    /// either budget. The token budget only blocks once the tokens already in
    /// the window reach `tpm`; `estimated_tokens` is recorded on dispatch.
    pub fn check(&mut self, now: Instant, estimated_tokens: u64) -> Admission {
        self.requests.purge(now);
        self.tokens.purge(now);

        if let Some(wait) = self.backoff.remaining(now) {
            debug!(
                consecutive = self.backoff.consecutive(),
                wait_ms = wait.as_millis() as u64,
                "Admission denied by backoff"
            );
            return Admission::Deny {
                wait,
                reason: DenyReason::Backoff,
            };
        }

        if self.requests.len() as u64 >= u64::from(self.max_requests) {
            let overflow = self.requests.len() as u64 + 1 - u64::from(self.max_requests);
            let wait = self.requests.wait_to_release(now, overflow);
            debug!(
                in_window = self.requests.len(),
                max = self.max_requests,
                wait_ms = wait.as_millis() as u64,
                "Admission denied by request budget"
            );
            return Admission::Deny {
                wait,
                reason: DenyReason::Requests,
            };
        }

        let in_window = self.tokens.total();
        if in_window >= self.max_tokens {
            let wait = self.tokens.wait_to_release(now, in_window - self.max_tokens + 1);
            debug!(
                in_window,
                estimated_tokens,
                max = self.max_tokens,
                wait_ms = wait.as_millis() as u64,
                "Admission denied by token budget"
            );
            return Admission::Deny {
                wait,
                reason: DenyReason::Tokens,
            };
        }

        Admission::Admit
    }

    /// Record a successful dispatch and clear backoff.
    pub fn record_dispatch(&mut self, now: Instant, estimated_tokens: u64) {
        self.requests.record(now, 1);
        self.tokens.record(now, estimated_tokens);
        self.backoff.reset();
    }

    /// Record a provider rate-limit or quota error.
    pub fn record_rate_limit_error(&mut self, now: Instant) {
        self.backoff.record_error(now);
        warn!(
            consecutive = self.backoff.consecutive(),
            backoff_ms = self.backoff.duration().as_millis() as u64,
            "Provider rate limit hit, backing off"
        );
    }

    /// Full backoff for the current error count.
    pub fn current_backoff(&self) -> Duration {
        self.backoff.duration()
    }

    /// Backoff state, for inspection.
    pub fn backoff(&self) -> &BackoffState {
        &self.backoff
    }

    /// Requests currently counted in the window.
    pub fn requests_in_window(&self) -> usize {
        self.requests.len()
    }

    /// Estimated tokens currently counted in the window.
    pub fn tokens_in_window(&self) -> u64 {
        self.tokens.total()
    }
}
