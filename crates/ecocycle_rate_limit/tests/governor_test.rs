//! Admission control properties of the rate governor.

use ecocycle_rate_limit::{
    Admission, DenyReason, GatewayConfig, RateGovernor, backoff_duration, estimate_tokens,
};
use std::time::Duration;
use tokio::time::Instant;

fn governor() -> RateGovernor {
    RateGovernor::new(&GatewayConfig::default())
}

#[test]
fn test_sixth_request_in_window_is_denied() {
    let start = Instant::now();
    let mut governor = governor();

    for i in 0..5 {
        let now = start + Duration::from_millis(200 * i);
        assert!(governor.check(now, 10).is_admitted());
        governor.record_dispatch(now, 10);
    }

    let now = start + Duration::from_millis(999);
    match governor.check(now, 10) {
        Admission::Deny { wait, reason } => {
            assert_eq!(reason, DenyReason::Requests);
            assert!(wait > Duration::ZERO);
            assert!(wait <= Duration::from_secs(60));
            // Oldest request was at `start`
            assert_eq!(wait, Duration::from_millis(60_000 - 999));
        }
        Admission::Admit => panic!("sixth request should be denied"),
    }
}

#[test]
fn test_window_purges_entries_older_than_window() {
    let start = Instant::now();
    let mut governor = governor();
    for _ in 0..5 {
        governor.record_dispatch(start, 10);
    }
    assert_eq!(governor.requests_in_window(), 5);

    assert!(governor.check(start + Duration::from_secs(60), 10).is_admitted());
    assert_eq!(governor.requests_in_window(), 0);
    assert_eq!(governor.tokens_in_window(), 0);
}

#[test]
fn test_token_budget_admits_below_limit() {
    let start = Instant::now();
    let mut governor = governor();
    governor.record_dispatch(start, 4_500);

    // Only the tokens already in the window count against the budget
    let now = start + Duration::from_secs(1);
    assert_eq!(governor.tokens_in_window(), 4_500);
    assert!(governor.check(now, 600).is_admitted());
}

#[test]
fn test_token_budget_denies_at_limit() {
    let start = Instant::now();
    let mut governor = governor();
    governor.record_dispatch(start, 3_000);
    governor.record_dispatch(start + Duration::from_secs(10), 2_000);

    // 5_000 in window; the oldest entry alone brings it back under the limit
    let now = start + Duration::from_secs(20);
    match governor.check(now, 10) {
        Admission::Deny { wait, reason } => {
            assert_eq!(reason, DenyReason::Tokens);
            assert_eq!(wait, Duration::from_secs(40));
        }
        Admission::Admit => panic!("token budget should be exhausted"),
    }
    assert!(governor.check(start + Duration::from_secs(60), 10).is_admitted());
}

#[test]
fn test_rate_limit_error_starts_backoff() {
    let now = Instant::now();
    let mut governor = governor();
    assert_eq!(governor.backoff().consecutive(), 0);
    assert!(governor.backoff().last_error().is_none());

    governor.record_rate_limit_error(now);
    assert_eq!(governor.backoff().consecutive(), 1);
    assert_eq!(governor.backoff().last_error(), Some(now));
    assert_eq!(governor.current_backoff(), Duration::from_secs(2));

    governor.record_dispatch(now + Duration::from_secs(3), 1);
    assert_eq!(governor.backoff().consecutive(), 0);
}

#[test]
fn test_backoff_formula_matches_reference_values() {
    let base = Duration::from_millis(1_000);
    let max = Duration::from_millis(120_000);
    assert_eq!(backoff_duration(1, 6, base, max), Duration::from_millis(2_000));
    assert_eq!(backoff_duration(6, 6, base, max), Duration::from_millis(64_000));
    assert_eq!(backoff_duration(7, 6, base, max), Duration::from_millis(64_000));
}

#[test]
fn test_token_estimate_rounds_up() {
    assert_eq!(estimate_tokens("abc"), 1);
    assert_eq!(estimate_tokens(&"x".repeat(4_001)), 1_001);
}
