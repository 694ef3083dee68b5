//! Configuration from environment variables.
//!
//! Region and profile come in through clap (`DISTAMI_REGION`,
//! `DISTAMI_PROFILE`); everything else is read here.

use std::time::Duration;

use anyhow::{Context, Result};
use distami_lookup::{RetryPolicy, WaitPolicy, DEFAULT_POLL_INTERVAL};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tracing filter directive (e.g. `info`, `distami_lookup=debug`).
    pub log_filter: String,

    /// Seconds between availability polls.
    pub poll_interval_secs: u64,

    /// Image lookup attempts per poll.
    pub max_attempts: u32,

    /// Seconds between image lookup attempts.
    pub retry_backoff_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            log_filter: "info".to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            max_attempts: retry.max_attempts,
            retry_backoff_secs: retry.backoff.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_filter = var("DISTAMI_LOG").unwrap_or(defaults.log_filter);

        let poll_interval_secs = parse_var(&var, "DISTAMI_POLL_INTERVAL")?
            .unwrap_or(defaults.poll_interval_secs);

        let max_attempts =
            parse_var(&var, "DISTAMI_MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts);

        let retry_backoff_secs =
            parse_var(&var, "DISTAMI_RETRY_BACKOFF")?.unwrap_or(defaults.retry_backoff_secs);

        Ok(Self {
            log_filter,
            poll_interval_secs,
            max_attempts,
            retry_backoff_secs,
        })
    }

    /// Retry policy for image lookups.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff: Duration::from_secs(self.retry_backoff_secs),
        }
    }

    /// Wait policy, with optional overrides from command flags.
    pub fn wait_policy(
        &self,
        poll_interval_secs: Option<u64>,
        max_wait_secs: Option<u64>,
    ) -> WaitPolicy {
        WaitPolicy {
            poll_interval: Duration::from_secs(
                poll_interval_secs.unwrap_or(self.poll_interval_secs),
            ),
            max_wait: max_wait_secs.map(Duration::from_secs),
            retry: self.retry_policy(),
        }
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {key}: {raw:?}"))
        })
        .transpose()
}
