//! Bounded binary exponential backoff.

use crate::error::{ElevationError, Failure};
use log::warn;
use std::{thread, time::Duration};

/// How often, and how patiently, a remote call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (at least 1).
    max_attempts: u32,

    /// Delay before the first retry.
    base_delay: Duration,

    /// Upper bound for any single delay.
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// A policy which never retries.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    #[must_use]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay before retry number `retry` (1-based), which
    /// is `base_delay * 2^(retry - 1)` capped at `max_delay`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1_u32 << exp)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Runs `op` until it succeeds, fails permanently, or the attempt
    /// budget is spent. `op` receives the 1-based attempt number.
    pub fn run<T, F>(&self, mut op: F) -> Result<T, ElevationError>
    where
        F: FnMut(u32) -> Result<T, Failure>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(Failure::Rejected { status, message }) => {
                    return Err(ElevationError::InvalidRequest { status, message })
                }
                Err(Failure::Transient(source)) if attempt >= self.max_attempts => {
                    return Err(ElevationError::Service {
                        attempts: attempt,
                        source,
                    })
                }
                Err(Failure::Transient(err)) => {
                    let delay = self.backoff(attempt);
                    warn!("backing off {delay:?} after {attempt} tries; {err}");
                    thread::sleep(delay);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Duration, RetryPolicy};
    use crate::{error::Failure, ElevationError, TransientError};
    use std::cell::Cell;

    fn unavailable() -> Failure {
        Failure::Transient(TransientError::Count {
            expected: 1,
            received: 0,
        })
    }

    fn instant(attempts: u32) -> RetryPolicy {
        RetryPolicy::new(attempts, Duration::ZERO, Duration::ZERO)
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(8, Duration::from_millis(100), Duration::from_secs(60));
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(7), Duration::from_millis(6_400));
    }

    #[test]
    fn test_backoff_capped() {
        let policy = RetryPolicy::new(8, Duration::from_secs(1), Duration::from_secs(5));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(4), Duration::from_secs(5));
        assert_eq!(policy.backoff(u32::MAX), Duration::from_secs(5));
    }

    #[test]
    fn test_succeeds_on_last_attempt() {
        let calls = Cell::new(0);
        let result = instant(5).run(|attempt| {
            calls.set(calls.get() + 1);
            if attempt < 5 {
                Err(unavailable())
            } else {
                Ok(attempt)
            }
        });
        assert_eq!(result.unwrap(), 5);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_exhausts_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), _> = instant(5).run(|_| {
            calls.set(calls.get() + 1);
            Err(unavailable())
        });
        assert_eq!(calls.get(), 5);
        let err = result.as_ref().unwrap_err();
        assert_eq!(err.to_string(), "elevation service failed after 5 attempts");
        assert_eq!(
            std::error::Error::source(err).map(ToString::to_string),
            Some("expected 1 elevations, received 0".to_string())
        );
        match result {
            Err(ElevationError::Service { attempts, source }) => {
                assert_eq!(attempts, 5);
                assert!(matches!(source, TransientError::Count { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejection_is_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), _> = instant(5).run(|_| {
            calls.set(calls.get() + 1);
            Err(Failure::Rejected {
                status: None,
                message: "bad coordinates".to_string(),
            })
        });
        assert_eq!(calls.get(), 1);
        assert!(matches!(
            result,
            Err(ElevationError::InvalidRequest { message, .. }) if message == "bad coordinates"
        ));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let calls = Cell::new(0);
        let _ = instant(0).run::<(), _>(|_| {
            calls.set(calls.get() + 1);
            Err(unavailable())
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(instant(0).attempts(), 1);
    }

    #[test]
    fn test_setters() {
        let policy = RetryPolicy::default()
            .max_attempts(7)
            .base_delay(Duration::from_millis(250))
            .max_delay(Duration::from_secs(2));
        assert_eq!(
            policy,
            RetryPolicy::new(7, Duration::from_millis(250), Duration::from_secs(2))
        );
        assert_eq!(policy.attempts(), 7);
        assert_eq!(policy.backoff(4), Duration::from_secs(2));
        assert_eq!(RetryPolicy::default().max_attempts(0).attempts(), 1);
    }
}
