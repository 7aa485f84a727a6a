use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::errors::StoreError;
use crate::observability::RETRIES_TOTAL;

/// Errors that may succeed on a later attempt.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for StoreError {
    fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Throttled(_))
    }
}

/// Fixed-count exponential backoff: the n-th retry waits `backoff_base * 2^(n-1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self { max_attempts, backoff_base }
    }

    pub fn from_config(cfg: &configs::RetryConfig) -> Self {
        Self::new(cfg.max_attempts, cfg.backoff_base())
    }

    /// Total attempts including the first call; never below one.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before the given retry (1-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry.saturating_sub(1));
        self.backoff_base.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

/// Run `operation`, retrying retryable failures until the policy's attempts
/// are used up. Non-retryable errors and the last failure are returned as is.
pub async fn retry_with_policy<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("Operation succeeded after {} retries", attempt - 1);
                }
                return Ok(result);
            }
            Err(error) if error.is_retryable() && attempt < policy.max_attempts() => {
                let delay = policy.backoff_for(attempt);
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Request throttled. Retrying in {:?}",
                    delay
                );
                RETRIES_TOTAL.inc();
                sleep(delay).await;
                attempt += 1;
            }
            Err(error) => {
                if error.is_retryable() {
                    warn!("Max retry attempts ({}) reached: {}", policy.max_attempts(), error);
                }
                return Err(error);
            }
        }
    }
}
