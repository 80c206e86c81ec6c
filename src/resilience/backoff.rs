//! Retry delays: doubling from a base, capped, plus up to 10% jitter.

use rand::Rng;
use std::time::Duration;

/// Delay to wait before retry number `attempt` (1-based).
///
/// Attempt 1 waits about `base_ms`, attempt 2 about twice that, and so on
/// up to `max_ms`. Attempt 0 means "no retry yet" and waits nothing.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    let Some(exponent) = attempt.checked_sub(1) else {
        return Duration::ZERO;
    };

    let factor = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);
    let delay_ms = base_ms.saturating_mul(factor).min(max_ms);

    Duration::from_millis(delay_ms.saturating_add(jitter(delay_ms)))
}

fn jitter(delay_ms: u64) -> u64 {
    match delay_ms / 10 {
        0 => 0,
        spread => rand::thread_rng().gen_range(0..spread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(delay: Duration, low: u64) -> bool {
        let ms = delay.as_millis() as u64;
        ms >= low && ms < low + low / 10 + 1
    }

    #[test]
    fn test_schedule_doubles_then_caps() {
        assert!(within(calculate_backoff(1, 100, 2000), 100));
        assert!(within(calculate_backoff(2, 100, 2000), 200));
        assert!(within(calculate_backoff(5, 100, 2000), 1600));
        assert!(within(calculate_backoff(6, 100, 2000), 2000));
    }

    #[test]
    fn test_huge_attempt_does_not_overflow() {
        assert!(within(calculate_backoff(200, 100, 5000), 5000));
    }

    #[test]
    fn test_no_delay_before_first_attempt() {
        assert_eq!(calculate_backoff(0, 100, 1000), Duration::ZERO);
    }

    #[test]
    fn test_small_delays_have_no_jitter() {
        assert_eq!(calculate_backoff(1, 5, 5), Duration::from_millis(5));
    }
}
