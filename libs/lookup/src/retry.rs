//! Bounded retry with a fixed pause between attempts.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Default number of attempts for an image lookup.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between image lookup attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,

    /// Pause between consecutive attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

/// All attempts failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted<E> {
    /// Attempts made.
    pub attempts: u32,

    /// Error from the final attempt.
    pub last_error: E,
}

/// Run `operation` until it succeeds or `policy.max_attempts` is reached.
///
/// The closure receives the 1-based attempt number. A policy with
/// `max_attempts == 0` still makes one attempt.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryExhausted<E>>
where
    E: Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                debug!(
                    attempt,
                    max_attempts,
                    backoff_secs = policy.backoff.as_secs_f64(),
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(policy.backoff).await;
            }
            Err(e) => {
                return Err(RetryExhausted {
                    attempts: attempt,
                    last_error: e,
                })
            }
        }
    }
}
