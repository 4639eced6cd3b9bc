//! Bounded retry with exponential backoff for transient store failures.
//!
//! Only [`AdmissionError::Persistence`] is retried; every domain
//! rejection (`Ineligible`, `Conflict`, `AtCapacity`, ...) surfaces
//! immediately.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use gather_core::error::AdmissionError;

/// Retry policy for transient persistence failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the initial call.
    pub max_retries: usize,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap for the exponential backoff.
    pub max_delay: Duration,
    /// Backoff multiplier per attempt.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries. Useful in tests asserting first-failure
    /// behavior.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (zero-based), capped at
    /// `max_delay`.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let millis =
            self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        Duration::from_millis(millis as u64).min(self.max_delay)
    }
}

/// Run `op`, retrying transient failures per `policy`.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, AdmissionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AdmissionError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                let delay = policy.delay_for_attempt(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient store failure, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
