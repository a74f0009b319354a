//! Retry with exponential backoff, and a circuit breaker for protecting
//! calls to unreliable external services (indexers, download clients).

use crate::{OrchestratorError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn quick() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    pub fn slow() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(300),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RetryPolicy {
    All,
    Transient,
    Never,
}

pub async fn retry_with_backoff<F, Fut, T>(
    config: RetryConfig,
    policy: RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        attempt += 1;
        debug!(operation_name, attempt, max = config.max_attempts, "attempting");

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(operation_name, attempt, "succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if !should_retry(&err, policy) {
                    debug!(operation_name, %err, "non-retryable error");
                    return Err(err);
                }

                if attempt >= config.max_attempts {
                    error!(operation_name, attempts = config.max_attempts, %err, "retries exhausted");
                    return Err(OrchestratorError::RetryExhausted {
                        operation: operation_name.to_string(),
                        attempts: config.max_attempts,
                        last_error: Box::new(err),
                    });
                }

                warn!(operation_name, attempt, ?delay, %err, "retrying after delay");
                sleep(delay).await;
                delay = calculate_next_delay(delay, &config);
            }
        }
    }
}

fn should_retry(error: &OrchestratorError, policy: RetryPolicy) -> bool {
    match policy {
        RetryPolicy::Never => false,
        RetryPolicy::All => true,
        RetryPolicy::Transient => matches!(
            error,
            OrchestratorError::NetworkError { .. }
                | OrchestratorError::Timeout { .. }
                | OrchestratorError::ExternalServiceError { .. }
                | OrchestratorError::TemporaryError { .. }
        ),
    }
}

fn calculate_next_delay(current: Duration, config: &RetryConfig) -> Duration {
    let mut next = current.mul_f64(config.backoff_multiplier);
    if next > config.max_delay {
        next = config.max_delay;
    }
    if config.jitter {
        use rand::Rng;
        let jitter_factor = rand::thread_rng().gen_range(0.5..1.5);
        next = next.mul_f64(jitter_factor);
    }
    next
}

/// Generic circuit breaker reused by the rate-limit governor, the health
/// tracker, and the download dispatcher's client calls.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    name: String,
    state: CircuitState,
    failure_threshold: u32,
    failure_count: u32,
    reset_timeout: Duration,
    opened_at: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, failure_threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            name: name.into(),
            state: CircuitState::Closed,
            failure_threshold,
            failure_count: 0,
            reset_timeout,
            opened_at: None,
        }
    }

    pub fn can_proceed(&mut self) -> bool {
        match self.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                if let Some(opened_at) = self.opened_at {
                    if opened_at.elapsed() >= self.reset_timeout {
                        debug!(service = %self.name, "circuit half-open");
                        self.state = CircuitState::HalfOpen;
                        true
                    } else {
                        false
                    }
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => true,
        }
    }

    pub fn record_success(&mut self) {
        match self.state {
            CircuitState::HalfOpen => {
                debug!(service = %self.name, "circuit closing after successful probe");
                self.state = CircuitState::Closed;
                self.failure_count = 0;
                self.opened_at = None;
            }
            CircuitState::Closed => self.failure_count = 0,
            CircuitState::Open => warn!(service = %self.name, "success recorded while open"),
        }
    }

    pub fn record_failure(&mut self) {
        match self.state {
            CircuitState::HalfOpen => {
                warn!(service = %self.name, "circuit reopening after failed probe");
                self.state = CircuitState::Open;
                self.opened_at = Some(Instant::now());
                self.failure_count = 0;
            }
            CircuitState::Closed => {
                self.failure_count += 1;
                if self.failure_count >= self.failure_threshold {
                    error!(service = %self.name, failures = self.failure_count, "circuit opening");
                    self.state = CircuitState::Open;
                    self.opened_at = Some(Instant::now());
                }
            }
            CircuitState::Open => {}
        }
    }

    pub async fn execute<F, Fut, T>(&mut self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.can_proceed() {
            return Err(OrchestratorError::CircuitBreakerOpen {
                service: self.name.clone(),
            });
        }

        match operation().await {
            Ok(result) => {
                self.record_success();
                Ok(result)
            }
            Err(err) => {
                self.record_failure();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn retries_then_succeeds() {
        let attempt = Arc::new(AtomicU32::new(0));
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(5),
            ..Default::default()
        };

        let attempt_clone = attempt.clone();
        let result = retry_with_backoff(config, RetryPolicy::All, "test_op", move || {
            let attempt = attempt_clone.clone();
            async move {
                let current = attempt.fetch_add(1, Ordering::SeqCst) + 1;
                if current == 2 {
                    Ok(42)
                } else {
                    Err(OrchestratorError::TemporaryError {
                        message: "simulated".into(),
                    })
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn exhausts_retries() {
        let config = RetryConfig {
            max_attempts: 2,
            initial_delay: Duration::from_millis(5),
            ..Default::default()
        };

        let result: Result<()> = retry_with_backoff(config, RetryPolicy::All, "test_op", || async {
            Err(OrchestratorError::TemporaryError {
                message: "always fails".into(),
            })
        })
        .await;

        assert!(matches!(result, Err(OrchestratorError::RetryExhausted { .. })));
    }

    #[test]
    fn circuit_breaker_transitions() {
        let mut cb = CircuitBreaker::new("test", 2, Duration::from_millis(50));
        assert!(cb.can_proceed());
        cb.record_failure();
        assert!(cb.can_proceed());
        cb.record_failure();
        assert!(!cb.can_proceed());
        std::thread::sleep(Duration::from_millis(60));
        assert!(cb.can_proceed());
        cb.record_success();
        assert!(cb.can_proceed());
    }
}
