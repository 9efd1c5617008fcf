//! Bounded polling for element resolution
//!
//! A resolution attempt that fails with a retryable [`LocatorError`] is
//! repeated at a fixed interval until it succeeds or the wait budget measured
//! from the first attempt is spent. Driver errors end the loop immediately.

use crate::errors::LocatorError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Default wait budget for a single find (2 seconds)
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(2_000);

/// Default pause between attempts (25ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Retry settings injected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total time a find may keep polling. Zero means a single attempt.
    pub max_wait: Duration,

    /// Sleep between attempts
    pub poll_interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_MAX_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl RetryConfig {
    pub fn new(max_wait: Duration) -> Self {
        Self {
            max_wait,
            ..Self::default()
        }
    }

    /// Configuration that never polls.
    pub fn single_attempt() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Per-loop bookkeeping; lives only for one `run`.
struct RetryState {
    started: Instant,
    budget: Duration,
    attempts: u32,
}

impl RetryState {
    fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
            attempts: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn exhausted(&self) -> bool {
        self.elapsed() >= self.budget
    }
}

/// Polling loop around a fallible resolution attempt.
#[derive(Clone, Debug, Default)]
pub struct RetryEngine {
    config: RetryConfig,
}

impl RetryEngine {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RetryConfig {
        self.config
    }

    /// Run `attempt` until it succeeds, fails fatally, or the budget is spent.
    ///
    /// Only the last attempt's error is returned; earlier failures are dropped.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, LocatorError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LocatorError>>,
    {
        let config = self.config;
        let mut state = RetryState::start(config.max_wait);

        loop {
            state.attempts += 1;
            let err = match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }

            if state.exhausted() {
                warn!(
                    attempts = state.attempts,
                    elapsed_ms = state.elapsed().as_millis() as u64,
                    budget_ms = config.max_wait.as_millis() as u64,
                    "Giving up: {}",
                    err
                );
                return Err(err);
            }

            debug!(
                attempt = state.attempts,
                found = ?err.found_count(),
                "Retrying after {}ms",
                config.poll_interval.as_millis()
            );
            sleep(config.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node_driver::{DriverError, DriverErrorKind};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn not_found() -> LocatorError {
        LocatorError::ElementNotFound {
            query: "css(#missing)".to_string(),
        }
    }

    #[test]
    fn test_default_retry_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_wait, Duration::from_millis(2_000));
        assert_eq!(config.poll_interval, Duration::from_millis(25));
        assert_eq!(RetryConfig::single_attempt().max_wait, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_first_success_without_sleeping() {
        let engine = RetryEngine::new(RetryConfig::new(Duration::from_secs(1)));
        let started = Instant::now();
        let value = engine.run(|| async { Ok::<_, LocatorError>(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_budget_makes_exactly_one_attempt() {
        let engine = RetryEngine::new(RetryConfig::single_attempt());
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = engine
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(not_found()) }
            })
            .await;
        assert!(matches!(result, Err(LocatorError::ElementNotFound { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_time_is_cumulative_across_attempts() {
        let engine = RetryEngine::new(RetryConfig::new(Duration::from_millis(100)));
        let calls = AtomicU32::new(0);
        let started = Instant::now();
        let result: Result<(), _> = engine
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(not_found()) }
            })
            .await;

        assert!(result.is_err());
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(125));
        // attempts at 0, 25, 50, 75 and 100ms
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn driver_errors_are_not_retried() {
        let engine = RetryEngine::new(RetryConfig::new(Duration::from_secs(5)));
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = engine
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(LocatorError::from(DriverError::new(
                        DriverErrorKind::SessionNotFound,
                    )))
                }
            })
            .await;
        assert!(matches!(result, Err(LocatorError::Driver(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_when_attempt_starts_succeeding() {
        let engine = RetryEngine::new(RetryConfig::new(Duration::from_secs(1)));
        let calls = AtomicU32::new(0);
        let value = engine
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 3 {
                        Err(not_found())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await
            .unwrap();
        assert_eq!(value, 3);
    }
}
