use std::time::Duration;

use crate::ClientOptions;

/// Attempt counter and backoff schedule for one logical call.
///
/// Lives only for the duration of a single `execute` and is never shared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct AttemptState {
    attempt: usize,
    backoff: Duration,
    max_backoff: Duration,
    max_retries: usize,
}

impl AttemptState {
    pub(crate) fn new(options: &ClientOptions) -> Self {
        let max_backoff = Duration::from_millis(options.max_backoff_ms);
        Self {
            attempt: 1,
            backoff: Duration::from_millis(options.retry_backoff_ms).min(max_backoff),
            max_backoff,
            max_retries: options.max_retries,
        }
    }

    /// One-based number of the attempt in flight.
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub(crate) fn attempt(&self) -> usize {
        self.attempt
    }

    /// Schedules another attempt and returns how long to wait before it.
    ///
    /// `retry_after` replaces the computed delay for this sleep only; the
    /// exponential schedule advances either way. Returns `None` once the
    /// retry ceiling is reached.
    pub(crate) fn next_delay(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if self.attempt > self.max_retries {
            return None;
        }
        let delay = retry_after.unwrap_or(self.backoff);
        self.backoff = self.backoff.saturating_mul(2).min(self.max_backoff);
        self.attempt += 1;
        Some(delay)
    }
}

/// Parses a `Retry-After` value given in (possibly fractional) seconds.
///
/// HTTP-date values, negatives and non-finite numbers yield `None`.
pub(crate) fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds: f64 = value.trim().parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{parse_retry_after, AttemptState};
    use crate::ClientOptions;

    fn secs(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_secs).collect()
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        let options = ClientOptions {
            max_retries: 7,
            ..ClientOptions::default()
        };
        let mut state = AttemptState::new(&options);
        let mut delays = Vec::new();
        while let Some(delay) = state.next_delay(None) {
            delays.push(delay);
        }
        assert_eq!(delays, secs(&[1, 2, 4, 8, 16, 16, 16]));
        assert_eq!(state.attempt(), 8);
    }

    #[test]
    fn ceiling_allows_five_retries_by_default() {
        let mut state = AttemptState::new(&ClientOptions::default());
        let mut retries = 0;
        while state.next_delay(None).is_some() {
            retries += 1;
        }
        assert_eq!(retries, 5);
        assert_eq!(state.attempt(), 6);
    }

    #[test]
    fn retry_after_overrides_one_sleep_without_resetting_schedule() {
        let mut state = AttemptState::new(&ClientOptions::default());
        assert_eq!(state.next_delay(None), Some(Duration::from_secs(1)));
        assert_eq!(
            state.next_delay(Some(Duration::ZERO)),
            Some(Duration::ZERO)
        );
        assert_eq!(
            state.next_delay(Some(Duration::from_secs(30))),
            Some(Duration::from_secs(30))
        );
        assert_eq!(state.next_delay(None), Some(Duration::from_secs(8)));
        assert_eq!(state.next_delay(None), Some(Duration::from_secs(16)));
        assert_eq!(state.next_delay(None), None);
    }

    #[test]
    fn zero_retries_never_schedules() {
        let options = ClientOptions {
            max_retries: 0,
            ..ClientOptions::default()
        };
        let mut state = AttemptState::new(&options);
        assert_eq!(state.next_delay(None), None);
        assert_eq!(state.attempt(), 1);
    }

    #[test]
    fn retry_after_parses_numeric_seconds_only() {
        assert_eq!(parse_retry_after("0"), Some(Duration::ZERO));
        assert_eq!(parse_retry_after(" 3 "), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after("1.5"), Some(Duration::from_millis(1_500)));
        assert_eq!(parse_retry_after("-1"), None);
        assert_eq!(parse_retry_after("NaN"), None);
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
